//! Data models for certdata2pem
//!
//! This module contains the data structures passed between pipeline phases.

pub mod record;
pub mod summary;
pub mod trust;

pub use record::{ObjectClass, Record, Value, CKA_CLASS, CKA_LABEL, CKA_VALUE};
pub use summary::{EmittedCertificate, RunSummary};
pub use trust::{
    TrustDecision, TrustPurpose, CKA_TRUST_EMAIL_PROTECTION, CKA_TRUST_SERVER_AUTH,
    EXPLICITLY_UNTRUSTED, TRUSTED_DELEGATOR, TRUST_PURPOSES,
};
