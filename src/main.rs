use anyhow::{Context, Result};
use buildtidy::{
    clear_logs, count_lines, report, ClearOptions, CountOptions, KeyMode, ReadErrorPolicy,
    Settings, TimeFilter, ToolError,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Clear timestamped build logs and count source lines",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete build logs named like "log-2024-01-01 10:00:00.123.txt"
    ClearLogs {
        /// Directory holding the logs (defaults to build)
        dir: Option<PathBuf>,

        /// Show what would be removed without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Only remove logs stamped longer ago than this (e.g. 48h, 7d, 2w, 3m)
        #[arg(long, value_name = "DURATION")]
        older_than: Option<String>,

        /// Only remove logs stamped before this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        before: Option<String>,

        /// Show every entry checked
        #[arg(long, short)]
        verbose: bool,
    },

    /// Count lines of .cpp, .h, .hpp and .txt files under a directory tree
    CountLines {
        /// Root of the tree (defaults to current directory)
        root: Option<PathBuf>,

        /// Additional directory names to skip (can be specified multiple times)
        #[arg(long = "exclude", short = 'x', value_name = "NAME")]
        exclude: Vec<String>,

        /// Report paths relative to the root instead of bare filenames
        #[arg(long)]
        full_paths: bool,

        /// Warn about unreadable files and keep counting instead of failing
        #[arg(long)]
        skip_unreadable: bool,

        /// Show skipped directories and every counted file
        #[arg(long, short)]
        verbose: bool,
    },
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load().context("Failed to load built-in defaults")?;

    match cli.command {
        Command::ClearLogs {
            dir,
            dry_run,
            older_than,
            before,
            verbose,
        } => {
            let dir = dir.unwrap_or(settings.clear.directory);
            let time_filter = TimeFilter::from_args(older_than.as_deref(), before.as_deref())?;
            let options = ClearOptions { dry_run, verbose };

            clear_logs(&dir, options, &time_filter)?;
        }
        Command::CountLines {
            root,
            exclude,
            full_paths,
            skip_unreadable,
            verbose,
        } => {
            let root = root.unwrap_or(settings.count.root);
            let mut exclude_dirs = settings.count.exclude_dirs;
            exclude_dirs.extend(exclude);

            let options = CountOptions {
                key_mode: if full_paths {
                    KeyMode::RelativePath
                } else {
                    KeyMode::FileName
                },
                on_read_error: if skip_unreadable {
                    ReadErrorPolicy::Skip
                } else {
                    ReadErrorPolicy::Abort
                },
                verbose,
            };

            let tally = count_lines(&root, &settings.count.extensions, &exclude_dirs, options)?;
            report::print_line_report(&tally);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::print_error(&format!("{err:#}"));
            let code = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<ToolError>())
                .map(ToolError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
