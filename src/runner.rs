//! Conversion pipeline
//!
//! Runs the three phases in order: parse the whole database, resolve trust
//! for every label, then write the certificate files. Nothing is written
//! until parsing and trust resolution have both succeeded.

use crate::certdata::{parse_reader, Blacklist};
use crate::config::Settings;
use crate::models::{Record, RunSummary};
use crate::report::CertificateWriter;
use crate::trust::resolve;
use crate::utils::{CertdataError, EmitError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Events emitted as the pipeline progresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Parsed { records: usize },
    BlacklistLoaded { entries: usize },
    TrustResolved { labels: usize },
    OutputStarted { certificates: usize },
}

/// Read and parse the certdata file at `path`
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|source| CertdataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(BufReader::new(file)).map_err(|e| match e {
        CertdataError::Io(source) => CertdataError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Convert already parsed records
pub fn convert(
    records: &[Record],
    blacklist: &Blacklist,
    settings: &Settings,
    on_event: &dyn Fn(RunEvent),
) -> Result<RunSummary> {
    let trust = resolve(records, blacklist)?;
    on_event(RunEvent::TrustResolved {
        labels: trust.len(),
    });

    let mut summary = RunSummary {
        records: records.len(),
        dry_run: settings.output.dry_run,
        ..RunSummary::default()
    };
    for (_, entry) in trust.iter() {
        summary.count(entry.decision);
    }

    let output_dir = &settings.paths.output_dir;
    if !settings.output.dry_run {
        std::fs::create_dir_all(output_dir).map_err(|source| EmitError::WriteError {
            path: output_dir.clone(),
            source,
        })?;
    }

    let certificates = records.iter().filter(|r| r.is_certificate()).count();
    on_event(RunEvent::OutputStarted { certificates });

    let writer = CertificateWriter::new(output_dir, settings.output.extension.as_str())
        .dry_run(settings.output.dry_run);
    summary.certificates = writer.write_all(records, &trust)?;

    debug!(
        written = summary.written(),
        trusted = summary.trusted,
        blacklisted = summary.blacklisted,
        ignored = summary.ignored,
        "conversion finished"
    );
    Ok(summary)
}

/// Run the whole conversion described by `settings`
pub fn run(settings: &Settings, on_event: &dyn Fn(RunEvent)) -> Result<RunSummary> {
    let records = read_records(&settings.paths.input)?;
    on_event(RunEvent::Parsed {
        records: records.len(),
    });

    let blacklist = Blacklist::load(&settings.paths.blacklist)?;
    on_event(RunEvent::BlacklistLoaded {
        entries: blacklist.len(),
    });

    convert(&records, &blacklist, settings, on_event)
}
