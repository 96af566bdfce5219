//! Custom error types for certdata2pem
//!
//! This module defines domain-specific error types using `thiserror` for
//! every failure mode of the conversion pipeline. All of them are fatal:
//! the run stops at the first one.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the certdata2pem pipeline
#[derive(Error, Debug)]
pub enum CertdataError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Trust error: {0}")]
    Trust(#[from] TrustError),

    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CertdataError {
    /// Label of an explicitly distrusted certificate that was not blacklisted
    pub fn untrusted_label(&self) -> Option<&str> {
        match self {
            CertdataError::Trust(TrustError::Untrusted { label }) => Some(label),
            _ => None,
        }
    }
}

/// Record database parsing errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected at least a field name and a type, got {content:?}")]
    MalformedRecord { line: usize, content: String },

    #[error("line {line}: invalid octal data in {field}: {content:?}")]
    InvalidOctal {
        line: usize,
        field: String,
        content: String,
    },

    #[error("line {line}: multi-line value for {field} is never terminated")]
    UnterminatedBlob { line: usize, field: String },

    #[error("line {line}: object has no CKA_CLASS attribute")]
    MissingClass { line: usize },
}

/// Trust resolution errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrustError {
    #[error("untrusted but not blacklisted certificate found: {label}")]
    Untrusted { label: String },

    #[error("no trust object for certificate {label}")]
    MissingTrustEntry { label: String },

    #[error("more than one trust object for {label}")]
    DuplicateTrust { label: String },

    #[error("{class} object is missing {field}")]
    MissingField { class: String, field: String },
}

/// Certificate file emission errors
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("label {label} does not produce a usable file name")]
    InvalidFileName { label: String },

    #[error("certificate {label} has no binary CKA_VALUE")]
    MissingValue { label: String },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

/// Result type alias using CertdataError
pub type Result<T> = std::result::Result<T, CertdataError>;
