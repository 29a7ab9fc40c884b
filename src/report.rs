//! Console output for both subcommands.

use crate::cleaner::ClearReport;
use crate::counter::LineTally;

use colored::Colorize;
use std::io;
use std::path::Path;

pub fn debug(msg: &str) {
    println!("{}", format!("DEBUG: {msg}").dimmed());
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_clear_header(dir: &Path) {
    println!("Removing {} log files ...", dir.display());
}

pub fn print_removed(name: &str) {
    println!("Removed: {name}");
}

pub fn print_would_remove(name: &str) {
    println!("Would remove: {name}");
}

pub fn print_remove_failed(name: &str, err: &io::Error) {
    eprintln!("{}", format!("Remove: {name} failed: {err}").red());
}

pub fn print_clear_summary(report: &ClearReport, age_filter_active: bool) {
    println!("---");
    println!(
        "{}",
        format!("Clear complete! Total: {}", report.total())
            .green()
            .bold()
    );

    if age_filter_active {
        println!("Kept by age filter: {}", report.stats.excluded_by_time);
    }

    let failed = report.failed_count();
    if failed > 0 {
        println!("{}", format!("Failed: {failed}").red());
    }

    if report.dry_run {
        println!(
            "Dry run mode: no files were deleted from {}.",
            report.directory.display()
        );
    }
}

pub fn print_line_report(tally: &LineTally) {
    for record in tally.records() {
        println!("{}: {} lines", record.key, record.lines);
    }

    if !tally.skipped().is_empty() {
        for skipped in tally.skipped() {
            print_warning(&format!(
                "Skipping unreadable file {}: {}",
                skipped.path.display(),
                skipped.reason
            ));
        }
        println!(
            "{}",
            format!("Skipped unreadable files: {}", tally.skipped().len()).yellow()
        );
    }

    println!(
        "{}",
        format!("Total lines of code: {}", tally.total()).bold()
    );
}
