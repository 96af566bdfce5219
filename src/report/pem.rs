//! PEM export functionality
//!
//! Writes a certificate as a PEM block preceded by its trust annotation
//! comments.

use crate::models::TrustPurpose;
use base64::Engine;

const BEGIN_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----";
const END_CERTIFICATE: &str = "-----END CERTIFICATE-----";
const LINE_WIDTH: usize = 64;

/// Trust purposes advertised in a certificate file header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustAnnotation {
    /// Short purpose names, e.g. `server-auth`
    pub trust: Vec<&'static str>,
    /// OpenSSL purpose names, e.g. `serverAuth`
    pub openssl_trust: Vec<&'static str>,
}

impl TrustAnnotation {
    pub fn from_purposes(purposes: &[&'static TrustPurpose]) -> Self {
        Self {
            trust: purposes.iter().map(|p| p.name).collect(),
            openssl_trust: purposes.iter().filter_map(|p| p.openssl_name).collect(),
        }
    }

    /// Header comment lines; the `openssl-trust` line only when non-empty
    pub fn header(&self) -> String {
        let mut header = format!("# trust={}\n", self.trust.join(" "));
        if !self.openssl_trust.is_empty() {
            header.push_str(&format!(
                "# openssl-trust={}\n",
                self.openssl_trust.join(" ")
            ));
        }
        header
    }
}

/// PEM exporter for certificates
pub struct PemExporter;

impl PemExporter {
    /// Export a single DER certificate to PEM format
    pub fn export_certificate(der: &[u8]) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(der);
        let lines: Vec<&str> = b64
            .as_bytes()
            .chunks(LINE_WIDTH)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
            .collect();

        let mut pem = String::with_capacity(b64.len() + b64.len() / LINE_WIDTH + 64);
        pem.push_str(BEGIN_CERTIFICATE);
        pem.push('\n');
        pem.push_str(&lines.join("\n"));
        pem.push('\n');
        pem.push_str(END_CERTIFICATE);
        pem.push('\n');
        pem
    }

    /// Export a certificate with its trust annotation header
    pub fn export_annotated(der: &[u8], annotation: &TrustAnnotation) -> String {
        let mut out = annotation.header();
        out.push_str(&Self::export_certificate(der));
        out
    }
}
