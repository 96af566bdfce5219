//! Terminal output formatting

use crate::models::{RunSummary, TrustDecision};
use console::style;

const BANNER_WIDTH: usize = 74;

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print the loud banner for an explicitly distrusted, non-blacklisted root
pub fn print_untrusted_banner(label: &str) {
    let rule = "!".repeat(BANNER_WIDTH);
    eprintln!("{}", style(&rule).red().bold());
    eprintln!(
        "{} {}",
        style("UNTRUSTED BUT NOT BLACKLISTED CERTIFICATE FOUND:").red().bold(),
        style(label).bold()
    );
    eprintln!("{}", style(&rule).red().bold());
}

fn format_decision(decision: TrustDecision) -> String {
    match decision {
        TrustDecision::Trusted => style("✓ trusted").green().to_string(),
        TrustDecision::Blacklisted => style("✗ blacklisted").red().to_string(),
        TrustDecision::Ignored => style("- ignored").dim().to_string(),
    }
}

/// Print the conversion summary, optionally listing every certificate
pub fn print_summary(summary: &RunSummary, verbose: bool) {
    print_header("Conversion Summary");

    if verbose {
        for cert in &summary.certificates {
            println!(
                "  {}  {}",
                format_decision(cert.decision),
                style(cert.path.display()).bold()
            );
            if !cert.trust.is_empty() {
                println!("      trust: {}", cert.trust.join(" "));
            }
        }
        println!();
    }

    println!("  Objects parsed: {}", style(summary.records).bold());
    println!("  Trusted: {}", style(summary.trusted).green());
    println!("  Blacklisted: {}", style(summary.blacklisted).red());
    println!("  Ignored: {}", style(summary.ignored).dim());

    if summary.dry_run {
        println!(
            "  Certificates planned: {} {}",
            style(summary.certificates.len()).bold(),
            style("(dry run, nothing written)").yellow()
        );
    } else {
        println!("  Certificates written: {}", style(summary.written()).bold());
    }
}
