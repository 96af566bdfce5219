//! Trust resolution
//!
//! Joins trust objects to certificates by label and decides, per label,
//! whether the certificate is trusted, blacklisted or merely ignored.

pub mod resolver;

pub use resolver::{decide, resolve, TrustEntry, TrustMap};
