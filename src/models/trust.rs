//! Trust purposes and trust decisions

use serde::Serialize;

/// Trust level meaning "may vouch for others for this purpose"
pub const TRUSTED_DELEGATOR: &str = "CKT_NSS_TRUSTED_DELEGATOR";

/// Spellings of "explicitly distrusted" across certdata revisions
pub const EXPLICITLY_UNTRUSTED: &[&str] = &["CKT_NETSCAPE_UNTRUSTED", "CKT_NSS_NOT_TRUSTED"];

pub const CKA_TRUST_SERVER_AUTH: &str = "CKA_TRUST_SERVER_AUTH";
pub const CKA_TRUST_EMAIL_PROTECTION: &str = "CKA_TRUST_EMAIL_PROTECTION";

/// A usage a trust object may assert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustPurpose {
    /// Attribute name in certdata
    pub attribute: &'static str,
    /// Short name written to the `# trust=` line
    pub name: &'static str,
    /// OpenSSL name written to the `# openssl-trust=` line, if any
    pub openssl_name: Option<&'static str>,
}

const fn purpose(
    attribute: &'static str,
    name: &'static str,
    openssl_name: Option<&'static str>,
) -> TrustPurpose {
    TrustPurpose {
        attribute,
        name,
        openssl_name,
    }
}

/// Every known trust purpose, in annotation order
pub const TRUST_PURPOSES: &[TrustPurpose] = &[
    purpose("CKA_TRUST_DIGITAL_SIGNATURE", "digital-signature", None),
    purpose("CKA_TRUST_NON_REPUDIATION", "non-repudiation", None),
    purpose("CKA_TRUST_KEY_ENCIPHERMENT", "key-encipherment", None),
    purpose("CKA_TRUST_DATA_ENCIPHERMENT", "data-encipherment", None),
    purpose("CKA_TRUST_KEY_AGREEMENT", "key-agreement", None),
    purpose("CKA_TRUST_KEY_CERT_SIGN", "cert-sign", None),
    purpose("CKA_TRUST_CRL_SIGN", "crl-sign", None),
    purpose(CKA_TRUST_SERVER_AUTH, "server-auth", Some("serverAuth")),
    purpose("CKA_TRUST_CLIENT_AUTH", "client-auth", Some("clientAuth")),
    purpose("CKA_TRUST_CODE_SIGNING", "code-signing", Some("codeSigning")),
    purpose(
        CKA_TRUST_EMAIL_PROTECTION,
        "email-protection",
        Some("emailProtection"),
    ),
    purpose("CKA_TRUST_IPSEC_END_SYSTEM", "ipsec-end-system", None),
    purpose("CKA_TRUST_IPSEC_TUNNEL", "ipsec-tunnel", None),
    purpose("CKA_TRUST_IPSEC_USER", "ipsec-user", None),
    purpose("CKA_TRUST_TIME_STAMPING", "time-stamping", None),
    purpose("CKA_TRUST_STEP_UP_APPROVED", "step-up-approved", None),
];

/// Outcome of resolving one trust object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustDecision {
    /// Server-auth or email-protection is a trusted delegator
    Trusted,
    /// Listed in the blacklist; emitted without any trust purposes
    Blacklisted,
    /// Neither trusted nor distrusted for the main purposes
    Ignored,
}

impl std::fmt::Display for TrustDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustDecision::Trusted => write!(f, "trusted"),
            TrustDecision::Blacklisted => write!(f, "blacklisted"),
            TrustDecision::Ignored => write!(f, "ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openssl_names_cover_four_purposes() {
        let aliased: Vec<&str> = TRUST_PURPOSES
            .iter()
            .filter_map(|p| p.openssl_name)
            .collect();
        assert_eq!(
            aliased,
            vec!["serverAuth", "clientAuth", "codeSigning", "emailProtection"]
        );
    }
}
