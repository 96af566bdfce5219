//! Result of one conversion run

use super::TrustDecision;
use serde::Serialize;
use std::path::PathBuf;

/// One certificate file produced (or, in a dry run, planned)
#[derive(Debug, Clone, Serialize)]
pub struct EmittedCertificate {
    pub label: String,
    pub path: PathBuf,
    pub decision: TrustDecision,
    pub trust: Vec<String>,
    pub openssl_trust: Vec<String>,
}

/// Counts and outputs of a completed run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Objects parsed from the database
    pub records: usize,
    pub trusted: usize,
    pub blacklisted: usize,
    pub ignored: usize,
    pub dry_run: bool,
    pub certificates: Vec<EmittedCertificate>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        if self.dry_run {
            0
        } else {
            self.certificates.len()
        }
    }

    pub(crate) fn count(&mut self, decision: TrustDecision) {
        match decision {
            TrustDecision::Trusted => self.trusted += 1,
            TrustDecision::Blacklisted => self.blacklisted += 1,
            TrustDecision::Ignored => self.ignored += 1,
        }
    }
}
