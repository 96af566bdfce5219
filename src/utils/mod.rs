//! Utility modules for certdata2pem
//!
//! This module contains the error types shared by every pipeline phase.

pub mod error;

pub use error::{CertdataError, ConfigError, EmitError, ParseError, Result, TrustError};
