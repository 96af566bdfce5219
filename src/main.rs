//! certdata2pem - split an NSS certdata.txt into PEM certificate files
//!
//! Reads `certdata.txt` (and an optional `blacklist.txt`), decides which
//! roots are trusted for which purposes, and writes one annotated `.crt`
//! file per certificate.

use certdata2pem::cli::Cli;
use certdata2pem::runner::{self, RunEvent};
use certdata2pem::{config, output, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Handle color preference
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if let Err(e) = run(&cli) {
        match e.untrusted_label() {
            Some(label) => output::print_untrusted_banner(label),
            None => eprintln!("{} {}", style("Error:").red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut settings = config::load_config(cli.config.as_deref())?;
    cli.apply(&mut settings);

    let show_progress = !cli.quiet && !cli.json;
    let summary = runner::run(&settings, &|event| {
        if show_progress {
            print_event(&event);
        }
    })?;

    if cli.json {
        output::print_json(&summary)?;
    } else if !cli.quiet {
        output::print_summary(&summary, cli.verbose);
    }

    Ok(())
}

fn print_event(event: &RunEvent) {
    match event {
        RunEvent::Parsed { records } => {
            output::print_info(&format!("Parsed {} objects", records));
        }
        RunEvent::BlacklistLoaded { entries } if *entries > 0 => {
            output::print_info(&format!("Loaded {} blacklist entries", entries));
        }
        RunEvent::BlacklistLoaded { .. } => {}
        RunEvent::TrustResolved { labels } => {
            output::print_success(&format!("Resolved trust for {} labels", labels));
        }
        RunEvent::OutputStarted { certificates } => {
            output::print_info(&format!("Writing {} certificates", certificates));
        }
    }
}
