//! CLI argument definitions using clap

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "certdata2pem")]
#[command(version)]
#[command(
    about = "Split an NSS certdata.txt trust store into annotated PEM certificate files",
    long_about = None
)]
pub struct Cli {
    /// certdata file to convert [default: certdata.txt]
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Labels whose trust is suppressed, one per line [default: blacklist.txt]
    #[arg(short, long, value_name = "FILE")]
    pub blacklist: Option<PathBuf>,

    /// Directory the certificate files are written to [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Certificate file extension [default: crt]
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resolve trust and report, but write no files
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Overlay command-line values on loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(input) = &self.input {
            settings.paths.input = input.clone();
        }
        if let Some(blacklist) = &self.blacklist {
            settings.paths.blacklist = blacklist.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.paths.output_dir = output_dir.clone();
        }
        if let Some(extension) = &self.extension {
            settings.output.extension = extension.trim_start_matches('.').to_string();
        }
        if self.dry_run {
            settings.output.dry_run = true;
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.quiet || self.json {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
