//! Status and diagnostic output.
//!
//! Everything here writes to stderr: stdout is reserved for the single
//! machine-readable `version=` line the pipeline consumes.

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a warning with a yellow warning icon.
pub fn display_warning(message: &str) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("\x1b[33m→\x1b[0m {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_warning() {
        display_warning("test warning");
    }

    #[test]
    fn test_display_success() {
        display_success("test success");
    }

    #[test]
    fn test_display_status() {
        display_status("test status");
    }
}
