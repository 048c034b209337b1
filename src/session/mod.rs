//! Translation session - walks a source tree and applies the language pairs
//!
//! Files are collected first and translated in path order, so output written
//! during the run is never walked again. Per-file failures are recorded in
//! the [`SessionReport`]; nothing but a missing source root stops a session.

#[cfg(test)]
mod tests;

use crate::diagnostics::{codes, from_error, warning_diag, Diagnostics};
use crate::error::{Result, TranspileError};
use crate::pairs::{Direction, Language, LanguagePair, SourceUnit, TranslationStats, UnitTranslation};
use crate::path_map::PathMapper;
use crate::unsupported_features::UnsupportedConstructGuard;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

const PHASE: &str = "session";

/// Directory names never descended into
const SKIPPED_DIRS: &[&str] = &["testdata"];

/// Session settings, built from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub src_root: PathBuf,
    pub dest_root: PathBuf,
    pub direction: Direction,
    /// Dotted Java package prefix
    pub namespace: String,
    /// Translate without writing anything
    pub check: bool,
    /// Leave `_test.go`, `*Test.java` and friends alone
    pub skip_tests: bool,
}

impl SessionConfig {
    pub fn new(src_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            src_root: src_root.into(),
            dest_root: dest_root.into(),
            direction: Direction::default(),
            namespace: "transpiled".to_string(),
            check: false,
            skip_tests: true,
        }
    }
}

/// What happened to one source file
#[derive(Debug)]
pub enum FileOutcome {
    Translated(UnitTranslation),
    /// `partial` holds the translation when only writing it failed
    Failed {
        error: TranspileError,
        partial: Option<UnitTranslation>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Translated,
    Failed,
}

/// Report line for one source file
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub pair: &'static str,
    pub status: FileStatus,
    pub outputs: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub direction: Direction,
    pub check: bool,
    pub stats: TranslationStats,
    pub files: Vec<FileSummary>,
    /// Files with an extension no enabled pair accepts
    pub skipped: usize,
    pub diagnostics: Diagnostics,
}

impl SessionReport {
    fn new(direction: Direction, check: bool) -> Self {
        Self {
            direction,
            check,
            stats: TranslationStats::default(),
            files: Vec::new(),
            skipped: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn translated(&self) -> usize {
        self.count(FileStatus::Translated)
    }

    pub fn failed(&self) -> usize {
        self.count(FileStatus::Failed)
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let report_error = |message: String| TranspileError::Report {
            path: path.to_path_buf(),
            message,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| report_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| report_error(e.to_string()))
    }
}

pub struct TranslationSession {
    config: SessionConfig,
    pairs: Vec<Box<dyn LanguagePair>>,
    mapper: PathMapper,
    guard: UnsupportedConstructGuard,
}

impl TranslationSession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        if !config.src_root.is_dir() {
            return Err(TranspileError::SourceRootMissing(config.src_root));
        }
        Ok(Self {
            pairs: config.direction.pairs(),
            mapper: PathMapper::new(&config.dest_root, &config.namespace),
            guard: UnsupportedConstructGuard::default(),
            config,
        })
    }

    /// Replace the default guard (every category enabled)
    pub fn with_guard(mut self, guard: UnsupportedConstructGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// First enabled pair accepting the file's extension
    pub fn pair_for(&self, rel: &Path) -> Option<&dyn LanguagePair> {
        self.pairs.iter().find(|p| p.accepts(rel)).map(|p| p.as_ref())
    }

    /// Candidate files relative to the source root, in path order
    pub fn source_files(&self) -> Vec<PathBuf> {
        let root = &self.config.src_root;
        let dest = fs::canonicalize(&self.config.dest_root).ok();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e, dest.as_deref()));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(event = "walk_error", error = %err);
                    continue;
                }
            };
            if !entry.file_type().is_file() || is_hidden(&entry) {
                continue;
            }
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.config.skip_tests && is_test_file(rel) {
                debug!(event = "skip_test_file", path = %rel.display());
                continue;
            }
            files.push(rel.to_path_buf());
        }
        files
    }

    /// Read and translate one file without writing anything
    pub fn translate_file(&self, pair: &dyn LanguagePair, rel: &Path) -> FileOutcome {
        let path = self.config.src_root.join(rel);
        let text = match read_source(&path) {
            Ok(text) => text,
            Err(error) => {
                return FileOutcome::Failed {
                    error,
                    partial: None,
                }
            }
        };
        let unit = SourceUnit::new(rel, &text);
        FileOutcome::Translated(pair.translate(&unit, &self.mapper, &self.guard))
    }

    pub fn run(&self) -> SessionReport {
        info!(
            event = "session_start",
            src = %self.config.src_root.display(),
            dest = %self.config.dest_root.display(),
            direction = ?self.config.direction,
            check = self.config.check
        );

        let mut report = SessionReport::new(self.config.direction, self.config.check);
        let mut written: HashSet<PathBuf> = HashSet::new();

        for rel in self.source_files() {
            let Some(pair) = self.pair_for(&rel) else {
                debug!(event = "skip_unmatched", path = %rel.display());
                report.skipped += 1;
                continue;
            };
            debug!(event = "translate", path = %rel.display(), pair = pair.name());

            let mut outcome = self.translate_file(pair, &rel);
            if let FileOutcome::Translated(unit) = &mut outcome {
                note_collisions(&rel, unit, &mut written);
            }
            if !self.config.check {
                outcome = write_outputs(outcome);
            }
            fold(&mut report, &rel, pair.name(), outcome);
        }

        info!(
            event = "session_end",
            translated = report.translated(),
            failed = report.failed(),
            skipped = report.skipped
        );
        report
    }
}

fn fold(report: &mut SessionReport, rel: &Path, pair: &'static str, outcome: FileOutcome) {
    match outcome {
        FileOutcome::Translated(unit) => {
            report.stats += unit.stats;
            report.files.push(FileSummary {
                path: rel.to_path_buf(),
                pair,
                status: FileStatus::Translated,
                outputs: unit.outputs.iter().map(|o| o.path.clone()).collect(),
                error: None,
            });
            report.diagnostics.extend(unit.diagnostics);
        }
        FileOutcome::Failed { error, partial } => {
            warn!(event = "file_failed", path = %rel.display(), error = %error);
            let mut diagnostics = from_error(&error, rel);
            if let Some(unit) = partial {
                diagnostics.extend(unit.diagnostics);
            }
            report.files.push(FileSummary {
                path: rel.to_path_buf(),
                pair,
                status: FileStatus::Failed,
                outputs: Vec::new(),
                error: Some(error.to_string()),
            });
            report.diagnostics.extend(diagnostics);
        }
    }
}

/// Warn when an output path was already produced in this session
fn note_collisions(rel: &Path, unit: &mut UnitTranslation, written: &mut HashSet<PathBuf>) {
    for output in &unit.outputs {
        if written.insert(output.path.clone()) {
            continue;
        }
        warn!(event = "output_collision", path = %output.path.display(), source = %rel.display());
        let mut diag = warning_diag(
            codes::OUTPUT_COLLISION,
            format!("{} was already written; overwriting", output.path.display()),
            1,
            PHASE,
        );
        diag.span.file = Some(rel.display().to_string());
        unit.diagnostics.add(diag);
    }
}

fn write_outputs(outcome: FileOutcome) -> FileOutcome {
    let unit = match outcome {
        FileOutcome::Translated(unit) => unit,
        failed => return failed,
    };
    for output in &unit.outputs {
        if let Err(error) = write_file(&output.path, &output.contents) {
            return FileOutcome::Failed {
                error,
                partial: Some(unit),
            };
        }
    }
    FileOutcome::Translated(unit)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TranspileError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| TranspileError::io(path, e))
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| TranspileError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| TranspileError::Decode {
        path: path.to_path_buf(),
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_skipped_dir(entry: &DirEntry, dest: Option<&Path>) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') || SKIPPED_DIRS.iter().any(|d| name == *d) {
        return true;
    }
    // output nested inside the source tree
    dest.is_some_and(|dest| fs::canonicalize(entry.path()).is_ok_and(|p| p == dest))
}

/// `_test.go`, `FooTest.java`, `FooTests.java`, `foo_test.cpp`
pub fn is_test_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    match ext {
        "go" => stem.ends_with("_test"),
        "java" => stem.ends_with("Test") || stem.ends_with("Tests"),
        e if Language::CPP_EXTENSIONS.contains(&e) => stem.ends_with("_test"),
        _ => false,
    }
}
