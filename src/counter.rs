//! Recursive line counting over a source tree.

use crate::error::{Result, ToolError};
use crate::patterns::{has_counted_extension, is_excluded_dir};
use crate::report;

use ignore::WalkBuilder;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How counted files are keyed in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Bare filename. Files sharing a name in different directories collide
    /// and the one visited last wins.
    #[default]
    FileName,
    /// Path relative to the walk root
    RelativePath,
}

/// What to do when a counted file cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadErrorPolicy {
    /// Stop the whole run with an error
    #[default]
    Abort,
    /// Warn, record the file as skipped and keep going
    Skip,
}

/// Options controlling the walk (runtime flags)
#[derive(Debug, Clone, Copy, Default)]
pub struct CountOptions {
    pub key_mode: KeyMode,
    pub on_read_error: ReadErrorPolicy,
    pub verbose: bool,
}

/// Line count for one report key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLineCount {
    pub key: String,
    pub lines: usize,
}

/// A file left out under [`ReadErrorPolicy::Skip`]
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-file line counts in first-insertion order
#[derive(Debug, Default)]
pub struct LineTally {
    records: Vec<FileLineCount>,
    index: HashMap<String, usize>,
    skipped: Vec<SkippedFile>,
}

impl LineTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for `key`, returning the count it replaced.
    ///
    /// A replaced key keeps its original position.
    pub fn record(&mut self, key: String, lines: usize) -> Option<usize> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.records[i].lines, lines)),
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.records.push(FileLineCount { key, lines });
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&i| self.records[i].lines)
    }

    pub fn records(&self) -> &[FileLineCount] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn total(&self) -> usize {
        self.records.iter().map(|r| r.lines).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Count lines the way splitting on newlines does: terminators + 1.
///
/// `\r\n` and a lone `\r` each count as one terminator. Empty text is one
/// line, and a trailing newline adds an extra empty line.
pub fn count_line_segments(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut terminators = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => terminators += 1,
            b'\r' => {
                terminators += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    terminators + 1
}

fn report_key(path: &Path, root: &Path, key_mode: KeyMode) -> String {
    match key_mode {
        KeyMode::FileName => path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default(),
        KeyMode::RelativePath => path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned(),
    }
}

/// Path carried by a walk error, if any
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn is_dangling_link(path: &Path) -> bool {
    let is_link = fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
    is_link && fs::metadata(path).is_err()
}

/// Walk `root` and count lines of every file with a counted extension.
///
/// Hidden directories and directories named in `exclude_dirs` are pruned
/// without being read. The root itself is always walked. Symlinks are
/// followed; dangling links are ignored and link loops are walk errors.
pub fn count_lines(
    root: &Path,
    extensions: &[String],
    exclude_dirs: &[String],
    options: CountOptions,
) -> Result<LineTally> {
    if !root.exists() {
        return Err(ToolError::MissingDirectory(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ToolError::io(
            root,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    if options.verbose {
        report::debug(&format!("Counting lines under {}", root.display()));
    }

    let mut tally = LineTally::new();
    let exclude_clone = exclude_dirs.to_vec();
    let verbose = options.verbose;

    let walker = WalkBuilder::new(root)
        .hidden(false)
        // Only the fixed excludes apply, never .gitignore and friends
        .git_ignore(false)
        .ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }

            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                if is_excluded_dir(&name, &exclude_clone) {
                    if verbose {
                        report::debug(&format!(
                            "Skipping excluded directory: {}",
                            entry.path().display()
                        ));
                    }
                    return false;
                }
            }

            true
        })
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let failed_path = error_path(&err).map(Path::to_path_buf);

                // A dangling link is neither a file nor a directory, so it is ignored
                if let Some(path) = failed_path.as_deref().filter(|p| is_dangling_link(p)) {
                    if verbose {
                        report::debug(&format!("Ignoring dangling link: {}", path.display()));
                    }
                    continue;
                }

                match options.on_read_error {
                    ReadErrorPolicy::Abort => {
                        let message = err.to_string();
                        let source = err
                            .into_io_error()
                            .unwrap_or_else(|| io::Error::other(message));
                        let path = failed_path.unwrap_or_else(|| root.to_path_buf());
                        return Err(ToolError::io(path, source));
                    }
                    ReadErrorPolicy::Skip => {
                        report::print_warning(&format!("Failed to access entry: {err}"));
                        continue;
                    }
                }
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !has_counted_extension(path, extensions) {
            continue;
        }

        if verbose {
            report::debug(&format!("Counting {}", path.display()));
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => match options.on_read_error {
                ReadErrorPolicy::Abort => {
                    return Err(ToolError::SourceRead {
                        path: path.to_path_buf(),
                        source: err,
                    });
                }
                ReadErrorPolicy::Skip => {
                    tally.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            },
        };

        let key = report_key(path, root, options.key_mode);
        let lines = count_line_segments(&text);
        if let Some(previous) = tally.record(key.clone(), lines) {
            if verbose {
                report::debug(&format!(
                    "{key} seen before ({previous} lines), replaced by {}",
                    path.display()
                ));
            }
        }
    }

    Ok(tally)
}
