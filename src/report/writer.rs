//! Certificate file emission

use super::filename::label_to_filename;
use super::pem::{PemExporter, TrustAnnotation};
use crate::models::{EmittedCertificate, ObjectClass, Record, CKA_LABEL, CKA_VALUE};
use crate::trust::TrustMap;
use crate::utils::{CertdataError, EmitError, TrustError};
use std::path::PathBuf;
use tracing::{debug, info};

/// Writes one annotated PEM file per certificate object
#[derive(Debug, Clone)]
pub struct CertificateWriter {
    output_dir: PathBuf,
    extension: String,
    dry_run: bool,
}

impl CertificateWriter {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
            dry_run: false,
        }
    }

    /// Plan every file without touching the filesystem
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Emit every certificate in `records`, in order.
    ///
    /// Stops at the first certificate that cannot be written; files written
    /// before it stay on disk.
    pub fn write_all(
        &self,
        records: &[Record],
        trust: &TrustMap<'_>,
    ) -> Result<Vec<EmittedCertificate>, CertdataError> {
        records
            .iter()
            .filter(|r| r.is_certificate())
            .map(|record| self.write_one(record, trust))
            .collect()
    }

    /// Emit a single certificate object
    pub fn write_one(
        &self,
        record: &Record,
        trust: &TrustMap<'_>,
    ) -> Result<EmittedCertificate, CertdataError> {
        let label = record.label().ok_or_else(|| TrustError::MissingField {
            class: ObjectClass::Certificate.to_string(),
            field: CKA_LABEL.to_string(),
        })?;
        let entry = trust.lookup(label)?;
        let der = record
            .binary(CKA_VALUE)
            .ok_or_else(|| EmitError::MissingValue {
                label: label.to_string(),
            })?;

        let file_name = label_to_filename(label, &self.extension)?;
        let path = self.output_dir.join(file_name);
        let annotation = TrustAnnotation::from_purposes(&entry.purposes());

        if self.dry_run {
            debug!(path = %path.display(), "dry run, not writing");
        } else {
            let contents = PemExporter::export_annotated(der, &annotation);
            std::fs::write(&path, contents).map_err(|source| EmitError::WriteError {
                path: path.clone(),
                source,
            })?;
            info!(label = %label, path = %path.display(), decision = %entry.decision, "wrote certificate");
        }

        Ok(EmittedCertificate {
            label: label.to_string(),
            path,
            decision: entry.decision,
            trust: annotation.trust.iter().map(|s| s.to_string()).collect(),
            openssl_trust: annotation
                .openssl_trust
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certdata::{parse_str, Blacklist};
    use crate::models::TrustDecision;
    use crate::trust::resolve;

    const DATA: &str = "BEGINDATA\n\
        CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE\n\
        CKA_LABEL UTF8 \"Test Root (A)\"\n\
        CKA_VALUE MULTILINE_OCTAL\n\
        \\101\\102\\103\n\
        END\n\
        \n\
        CKA_CLASS CK_OBJECT_CLASS CKO_NSS_TRUST\n\
        CKA_LABEL UTF8 \"Test Root (A)\"\n\
        CKA_TRUST_SERVER_AUTH CK_TRUST CKT_NSS_TRUSTED_DELEGATOR\n\
        CKA_TRUST_EMAIL_PROTECTION CK_TRUST CKT_NSS_MUST_VERIFY_TRUST\n";

    #[test]
    fn test_writes_annotated_file() {
        let dir = tempfile::tempdir().unwrap();
        let records = parse_str(DATA).unwrap();
        let trust = resolve(&records, &Blacklist::new()).unwrap();

        let written = CertificateWriter::new(dir.path(), "crt")
            .write_all(&records, &trust)
            .unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].decision, TrustDecision::Trusted);

        let path = dir.path().join("Test_Root_=A=.crt");
        assert_eq!(written[0].path, path);
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            contents,
            "# trust=server-auth\n\
             # openssl-trust=serverAuth\n\
             -----BEGIN CERTIFICATE-----\n\
             QUJD\n\
             -----END CERTIFICATE-----\n"
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let records = parse_str(DATA).unwrap();
        let trust = resolve(&records, &Blacklist::new()).unwrap();

        let planned = CertificateWriter::new(dir.path(), "crt")
            .dry_run(true)
            .write_all(&records, &trust)
            .unwrap();
        assert_eq!(planned.len(), 1);
        assert!(!planned[0].path.exists());
    }

    #[test]
    fn test_certificate_without_trust_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        let records = parse_str(DATA).unwrap();
        let certificates: Vec<Record> = records.into_iter().filter(|r| r.is_certificate()).collect();
        let trust = resolve(&certificates, &Blacklist::new()).unwrap();

        let err = CertificateWriter::new(dir.path(), "crt")
            .write_all(&certificates, &trust)
            .unwrap_err();
        assert!(matches!(
            err,
            CertdataError::Trust(TrustError::MissingTrustEntry { .. })
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_certificate_without_value_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data = DATA.replace("CKA_VALUE MULTILINE_OCTAL\n\\101\\102\\103\nEND\n", "");
        let records = parse_str(&data).unwrap();
        assert!(records[0].binary(CKA_VALUE).is_none());
        let trust = resolve(&records, &Blacklist::new()).unwrap();

        let err = CertificateWriter::new(dir.path(), "crt")
            .write_all(&records, &trust)
            .unwrap_err();
        assert!(matches!(
            err,
            CertdataError::Emit(EmitError::MissingValue { ref label }) if label == "\"Test Root (A)\""
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
