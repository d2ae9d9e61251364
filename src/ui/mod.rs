//! User interface module - report formatting and printing.
//!
//! `formatter` holds pure functions that turn a series or an outcome into
//! text, plus thin printers around them.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_outcome, display_series_report, display_status, display_success,
    format_commit_line, format_outcome, format_series_report,
};
