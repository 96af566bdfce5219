//! Build the label → trust object map

use crate::certdata::Blacklist;
use crate::models::{
    ObjectClass, Record, TrustDecision, TrustPurpose, CKA_LABEL, CKA_TRUST_EMAIL_PROTECTION,
    CKA_TRUST_SERVER_AUTH, EXPLICITLY_UNTRUSTED, TRUSTED_DELEGATOR, TRUST_PURPOSES,
};
use crate::utils::TrustError;
use std::collections::HashMap;
use tracing::{info, warn};

/// The trust object registered for one label, with its decision
#[derive(Debug, Clone, Copy)]
pub struct TrustEntry<'a> {
    pub record: &'a Record,
    pub decision: TrustDecision,
}

impl<'a> TrustEntry<'a> {
    /// Purposes to advertise for this label, in table order.
    ///
    /// A blacklisted label advertises nothing, whatever its trust object says.
    pub fn purposes(&self) -> Vec<&'static TrustPurpose> {
        if self.decision == TrustDecision::Blacklisted {
            return Vec::new();
        }
        TRUST_PURPOSES
            .iter()
            .filter(|p| self.record.scalar(p.attribute) == Some(TRUSTED_DELEGATOR))
            .collect()
    }
}

/// Trust entries keyed by the quoted label, borrowing the parsed records
#[derive(Debug, Default)]
pub struct TrustMap<'a> {
    entries: HashMap<&'a str, TrustEntry<'a>>,
}

impl<'a> TrustMap<'a> {
    pub fn get(&self, label: &str) -> Option<&TrustEntry<'a>> {
        self.entries.get(label)
    }

    /// Like [`TrustMap::get`], but a missing label is an error
    pub fn lookup(&self, label: &str) -> Result<&TrustEntry<'a>, TrustError> {
        self.get(label).ok_or_else(|| TrustError::MissingTrustEntry {
            label: label.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &TrustEntry<'a>)> {
        self.entries.iter().map(|(label, entry)| (*label, entry))
    }
}

/// Decide how a single trust object is treated.
///
/// Fails when server authentication is explicitly distrusted and the label
/// was not blacklisted.
pub fn decide(
    record: &Record,
    label: &str,
    blacklist: &Blacklist,
) -> Result<TrustDecision, TrustError> {
    let server_auth = record.scalar(CKA_TRUST_SERVER_AUTH);
    let email_protection = record.scalar(CKA_TRUST_EMAIL_PROTECTION);

    if blacklist.contains(label) {
        return Ok(TrustDecision::Blacklisted);
    }
    if server_auth == Some(TRUSTED_DELEGATOR) || email_protection == Some(TRUSTED_DELEGATOR) {
        return Ok(TrustDecision::Trusted);
    }
    if server_auth.is_some_and(|level| EXPLICITLY_UNTRUSTED.contains(&level)) {
        return Err(TrustError::Untrusted {
            label: label.to_string(),
        });
    }
    Ok(TrustDecision::Ignored)
}

/// Resolve every trust object in `records`, in order.
///
/// Every trust object is registered, including blacklisted and ignored ones,
/// since each certificate later needs an entry.
pub fn resolve<'a>(records: &'a [Record], blacklist: &Blacklist) -> Result<TrustMap<'a>, TrustError> {
    let mut map = TrustMap::default();

    for record in records.iter().filter(|r| r.is_trust()) {
        let label = record.label().ok_or_else(|| TrustError::MissingField {
            class: ObjectClass::Trust.to_string(),
            field: CKA_LABEL.to_string(),
        })?;

        let decision = decide(record, label, blacklist)?;
        match decision {
            TrustDecision::Blacklisted => {
                warn!("Certificate {} blacklisted, ignoring.", label);
            }
            TrustDecision::Ignored => {
                warn!(
                    "Ignoring certificate {}.  SAUTH={}, EPROT={}",
                    label,
                    record.scalar(CKA_TRUST_SERVER_AUTH).unwrap_or("-"),
                    record.scalar(CKA_TRUST_EMAIL_PROTECTION).unwrap_or("-"),
                );
            }
            TrustDecision::Trusted => {}
        }

        if map.entries.contains_key(label) {
            return Err(TrustError::DuplicateTrust {
                label: label.to_string(),
            });
        }
        map.entries.insert(label, TrustEntry { record, decision });
        info!("added cert {}", label);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certdata::parse_str;

    fn trust_object(label: &str, server_auth: &str, email: &str) -> String {
        format!(
            "CKA_CLASS CK_OBJECT_CLASS CKO_NSS_TRUST\n\
             CKA_LABEL UTF8 \"{label}\"\n\
             CKA_TRUST_SERVER_AUTH CK_TRUST {server_auth}\n\
             CKA_TRUST_EMAIL_PROTECTION CK_TRUST {email}\n\
             CKA_TRUST_CODE_SIGNING CK_TRUST CKT_NSS_TRUSTED_DELEGATOR\n\n"
        )
    }

    fn records(objects: &[String]) -> Vec<Record> {
        parse_str(&format!("BEGINDATA\n{}", objects.concat())).unwrap()
    }

    #[test]
    fn test_server_auth_delegator_is_trusted() {
        let records = records(&[trust_object(
            "Root A",
            "CKT_NSS_TRUSTED_DELEGATOR",
            "CKT_NSS_MUST_VERIFY_TRUST",
        )]);
        let map = resolve(&records, &Blacklist::new()).unwrap();
        assert_eq!(
            map.get("\"Root A\"").unwrap().decision,
            TrustDecision::Trusted
        );
    }

    #[test]
    fn test_email_only_delegator_is_trusted() {
        let records = records(&[trust_object(
            "Mail Root",
            "CKT_NSS_MUST_VERIFY_TRUST",
            "CKT_NSS_TRUSTED_DELEGATOR",
        )]);
        let map = resolve(&records, &Blacklist::new()).unwrap();
        let entry = map.lookup("\"Mail Root\"").unwrap();
        assert_eq!(entry.decision, TrustDecision::Trusted);
        let names: Vec<&str> = entry.purposes().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["code-signing", "email-protection"]);
    }

    #[test]
    fn test_blacklist_wins_over_delegator() {
        let records = records(&[trust_object(
            "Revoked",
            "CKT_NSS_TRUSTED_DELEGATOR",
            "CKT_NSS_TRUSTED_DELEGATOR",
        )]);
        let blacklist: Blacklist = ["\"Revoked\""].into_iter().collect();
        let map = resolve(&records, &blacklist).unwrap();
        let entry = map.lookup("\"Revoked\"").unwrap();
        assert_eq!(entry.decision, TrustDecision::Blacklisted);
        assert!(entry.purposes().is_empty());
    }

    #[test]
    fn test_blacklist_absorbs_explicit_distrust() {
        let records = records(&[trust_object(
            "Distrusted",
            "CKT_NSS_NOT_TRUSTED",
            "CKT_NSS_NOT_TRUSTED",
        )]);
        let blacklist: Blacklist = ["\"Distrusted\""].into_iter().collect();
        let map = resolve(&records, &blacklist).unwrap();
        assert_eq!(
            map.lookup("\"Distrusted\"").unwrap().decision,
            TrustDecision::Blacklisted
        );
    }

    #[test]
    fn test_untrusted_without_blacklist_is_fatal() {
        for level in EXPLICITLY_UNTRUSTED {
            let records = records(&[trust_object("Evil", level, "CKT_NSS_MUST_VERIFY_TRUST")]);
            let err = resolve(&records, &Blacklist::new()).unwrap_err();
            assert_eq!(
                err,
                TrustError::Untrusted {
                    label: "\"Evil\"".to_string()
                }
            );
        }
    }

    #[test]
    fn test_neither_trusted_nor_distrusted_is_ignored_but_registered() {
        let records = records(&[trust_object(
            "Code Only",
            "CKT_NSS_MUST_VERIFY_TRUST",
            "CKT_NSS_MUST_VERIFY_TRUST",
        )]);
        let map = resolve(&records, &Blacklist::new()).unwrap();
        let entry = map.lookup("\"Code Only\"").unwrap();
        assert_eq!(entry.decision, TrustDecision::Ignored);
        let names: Vec<&str> = entry.purposes().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["code-signing"]);
    }

    #[test]
    fn test_absent_purpose_fields_are_ignored() {
        let records = parse_str(
            "BEGINDATA\n\
             CKA_CLASS CK_OBJECT_CLASS CKO_NSS_TRUST\n\
             CKA_LABEL UTF8 \"Bare\"\n",
        )
        .unwrap();
        let map = resolve(&records, &Blacklist::new()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.lookup("\"Bare\"").unwrap().decision,
            TrustDecision::Ignored
        );
    }

    #[test]
    fn test_duplicate_trust_objects_are_reported() {
        let object = trust_object(
            "Twice",
            "CKT_NSS_TRUSTED_DELEGATOR",
            "CKT_NSS_MUST_VERIFY_TRUST",
        );
        let records = records(&[object.clone(), object]);
        assert_eq!(
            resolve(&records, &Blacklist::new()).unwrap_err(),
            TrustError::DuplicateTrust {
                label: "\"Twice\"".to_string()
            }
        );
    }

    #[test]
    fn test_missing_entry_lookup() {
        let map = TrustMap::default();
        assert!(map.is_empty());
        assert!(matches!(
            map.lookup("\"Nobody\""),
            Err(TrustError::MissingTrustEntry { .. })
        ));
    }

    #[test]
    fn test_trust_object_without_label_is_fatal() {
        let records = parse_str(
            "BEGINDATA\n\
             CKA_CLASS CK_OBJECT_CLASS CKO_NSS_TRUST\n\
             CKA_TRUST_SERVER_AUTH CK_TRUST CKT_NSS_TRUSTED_DELEGATOR\n",
        )
        .unwrap();
        assert_eq!(
            resolve(&records, &Blacklist::new()).unwrap_err(),
            TrustError::MissingField {
                class: "CKO_NSS_TRUST".to_string(),
                field: "CKA_LABEL".to_string(),
            }
        );
    }
}
