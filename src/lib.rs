//! certdata2pem Library
//!
//! Converts an NSS `certdata.txt` trust store into one PEM file per
//! certificate, annotated with the trust purposes the store grants it:
//! - Parsing the certdata object database, including octal-encoded values
//! - Loading an operator blacklist of labels
//! - Resolving trust per label and refusing inconsistent trust
//! - Writing annotated PEM files
//!
//! # Usage
//!
//! ```rust,no_run
//! use certdata2pem::{runner, Settings};
//!
//! let settings = Settings::load_default().unwrap();
//! let summary = runner::run(&settings, &|_| {}).unwrap();
//! println!("{} certificates written", summary.written());
//! ```

pub mod certdata;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod report;
pub mod runner;
pub mod trust;
pub mod utils;

// Re-export commonly used types
pub use certdata::{Blacklist, Parser};
pub use cli::Cli;
pub use config::Settings;
pub use models::{Record, RunSummary, TrustDecision, Value};
pub use trust::{TrustEntry, TrustMap};
pub use utils::{CertdataError, Result};
