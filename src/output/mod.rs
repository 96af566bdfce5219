//! Output formatting module
//!
//! Provides two output formats:
//! - Styled terminal output
//! - JSON export of the run summary

pub mod json;
pub mod terminal;

pub use json::{print_json, to_json};
pub use terminal::{
    print_header, print_info, print_success, print_summary, print_untrusted_banner,
};
