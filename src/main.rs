use anyhow::Result;
use clap::Parser;
use std::path::Path;

use ci_release::config;
use ci_release::git::Git2Client;
use ci_release::remote::{self, RemoteTarget};
use ci_release::stage::{self, Stage};
use ci_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "ci-release",
    version,
    about = "Compute and publish the next release tag in CI"
)]
struct Args {
    #[arg(short, long, help = "Username to use for authenticated remote operations")]
    username: Option<String>,

    #[arg(short, long, help = "Organization owning the remote repository")]
    organization: Option<String>,

    #[arg(short, long, help = "Name of the remote repository")]
    repository: Option<String>,

    #[arg(short, long, value_enum, help = "The release stage to run")]
    stage: Stage,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Compute the next version without writing or pushing")]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // CLI arguments override file values
    let organization = args.organization.or(config.remote.organization);
    let repository = args.repository.or(config.remote.repository);
    let username = args.username.or(config.remote.username);
    let token = std::env::var(remote::TOKEN_ENV).ok();

    let (organization, repository) = match (organization, repository) {
        (Some(organization), Some(repository)) => (organization, repository),
        _ => {
            ui::display_error(
                "Remote organization and repository are required (--organization/--repository or ci-release.toml)",
            );
            std::process::exit(1);
        }
    };

    let target = RemoteTarget::new(config.remote.host, organization, repository)
        .with_credentials(username.clone(), token);

    // Initialize git operations
    let git = match Git2Client::discover() {
        Ok(git) => git.with_identity(username),
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let marker_path = Path::new(&config.release.marker_file);

    match stage::run(args.stage, &git, &target, marker_path, args.dry_run) {
        Ok(version) => {
            println!("version={}", version);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
