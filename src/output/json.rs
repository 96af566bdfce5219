//! JSON output formatter

use crate::models::RunSummary;

/// Render a run summary as pretty JSON
pub fn to_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Print a run summary as JSON to stdout
pub fn print_json(summary: &RunSummary) -> serde_json::Result<()> {
    println!("{}", to_json(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmittedCertificate, TrustDecision};
    use std::path::PathBuf;

    #[test]
    fn test_summary_json_shape() {
        let summary = RunSummary {
            records: 3,
            trusted: 1,
            certificates: vec![EmittedCertificate {
                label: "\"Root\"".to_string(),
                path: PathBuf::from("Root.crt"),
                decision: TrustDecision::Trusted,
                trust: vec!["server-auth".to_string()],
                openssl_trust: vec!["serverAuth".to_string()],
            }],
            ..RunSummary::default()
        };

        let value: serde_json::Value = serde_json::from_str(&to_json(&summary).unwrap()).unwrap();
        assert_eq!(value["records"], 3);
        assert_eq!(value["certificates"][0]["decision"], "trusted");
        assert_eq!(value["certificates"][0]["path"], "Root.crt");
    }
}
