//! Operator blacklist of certificate labels
//!
//! One label per line. Blank lines and lines starting with `#` are skipped,
//! and a `#` anywhere else starts a trailing comment.

use crate::utils::CertdataError;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Labels whose trust is suppressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    labels: HashSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse blacklist text
    pub fn parse(text: &str) -> Self {
        let labels = text.lines().filter_map(parse_line).collect();
        Self { labels }
    }

    /// Load from `path`; a missing file is an empty blacklist
    pub fn load(path: &Path) -> Result<Self, CertdataError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let blacklist = Self::parse(&text);
                debug!(path = %path.display(), entries = blacklist.len(), "loaded blacklist");
                Ok(blacklist)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no blacklist");
                Ok(Self::new())
            }
            Err(source) => Err(CertdataError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn parse_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let label = line.split('#').next().unwrap_or_default().trim();
    Some(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let blacklist = Blacklist::parse(
            "# removed roots\n\
             \n\
             \"Bad Root CA\"\n\
             \x20 \"Indented Root\"  \n",
        );
        assert_eq!(blacklist.len(), 2);
        assert!(blacklist.contains("\"Bad Root CA\""));
        assert!(blacklist.contains("\"Indented Root\""));
    }

    #[test]
    fn test_inline_comment_truncates_label() {
        let blacklist = Blacklist::parse("\"Old Root\"   # distrusted 2019\n");
        assert!(blacklist.contains("\"Old Root\""));
        assert!(!blacklist.contains("\"Old Root\"   # distrusted 2019"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let blacklist = Blacklist::load(&dir.path().join("blacklist.txt")).unwrap();
        assert!(blacklist.is_empty());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.txt");
        std::fs::write(&path, "\"Revoked CA\"\n").unwrap();
        assert!(Blacklist::load(&path).unwrap().contains("\"Revoked CA\""));
    }

    #[test]
    fn test_unreadable_blacklist_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = Blacklist::load(dir.path()).unwrap_err();
        assert!(matches!(err, CertdataError::Read { ref path, .. } if path == dir.path()));
    }
}
