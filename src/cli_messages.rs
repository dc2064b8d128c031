//! CLI command messaging
//!
//! Consistent tagged output for one-shot commands: `[INFO]` and `[SUCCESS]`
//! on stdout, `[WARN]` and `[ERROR]` on stderr.

use crate::actions::ActionFailure;

const COLOR_INFO: &str = "\x1b[1;33m";
const COLOR_WARN: &str = "\x1b[1;91m";
const COLOR_ERROR: &str = "\x1b[1;31m";
const COLOR_SUCCESS: &str = "\x1b[1;32m";
const COLOR_RESET: &str = "\x1b[0m";

fn tagged(color: &str, tag: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{}[{}]{} {}", color, tag, COLOR_RESET, title)
    } else {
        format!("{}[{}]{} {}\t {}", color, tag, COLOR_RESET, title, details)
    }
}

pub fn print_info(title: &str, details: &str) {
    println!("{}", tagged(COLOR_INFO, "INFO", title, details));
}

pub fn print_warn(title: &str, details: &str) {
    eprintln!("{}", tagged(COLOR_WARN, "WARN", title, details));
}

pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{}", tagged(COLOR_ERROR, "ERROR", title, ""));
    if let Some(details) = details {
        eprintln!("{}", tagged(COLOR_ERROR, "ERROR", "Details:", details));
    }
}

pub fn print_success(title: &str, details: &str) {
    println!("{}", tagged(COLOR_SUCCESS, "SUCCESS", title, details));
}

/// The CLI counterpart of the dashboard's notice: the label, then every line
/// of the error (status line and response body for HTTP failures).
pub fn print_failure(failure: &ActionFailure) {
    eprintln!("{}", tagged(COLOR_ERROR, "ERROR", &failure.label, ""));
    for line in failure.error.to_string().lines() {
        eprintln!("  {}", line);
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

/// Macro for CLI errors
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
