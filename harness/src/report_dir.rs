//! Report directory persistence: write/read/verify a run report on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   run_report.json     canonical JSON of the RunReportV1
//!   report_digest.txt   "sha256:<hex>" of run_report.json (RunReport domain)
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing file → error
//! - Extra file → error
//! - Stored digest differs from the recomputed one → error
//! - Report JSON that does not parse, or carries another schema → error

use std::collections::BTreeSet;
use std::path::Path;

use pushbox_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::runner::{RunOutcome, RUN_REPORT_SCHEMA};

const REPORT_FILENAME: &str = "run_report.json";
const DIGEST_FILENAME: &str = "report_digest.txt";

const EXPECTED_FILENAMES: &[&str] = &[REPORT_FILENAME, DIGEST_FILENAME];

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    Io { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    Io { detail: String },
    /// A required file is missing.
    MissingFile { filename: String },
    /// A file the layout does not declare.
    ExtraFile { name: String },
    /// `run_report.json` is not valid JSON.
    ReportParseError { detail: String },
    /// `schema_version` is not [`RUN_REPORT_SCHEMA`].
    SchemaMismatch { found: String },
    /// `report_digest.txt` doesn't match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ReportParseError { detail } => write!(f, "report parse error: {detail}"),
            Self::SchemaMismatch { found } => write!(f, "report schema mismatch: {found}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// A report read back from disk, digest already verified.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub bytes: Vec<u8>,
    pub value: serde_json::Value,
    pub digest: ContentHash,
}

/// Write a run's report and digest into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O failure.
pub fn write_report_dir(outcome: &RunOutcome, dir: &Path) -> Result<(), ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;
    write_atomic(&dir.join(REPORT_FILENAME), &outcome.report_bytes)?;
    write_atomic(
        &dir.join(DIGEST_FILENAME),
        outcome.report_digest.to_string().as_bytes(),
    )?;
    Ok(())
}

/// Read a report directory and verify its digest.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<LoadedReport, ReportDirReadError> {
    let bytes = read_required(dir, REPORT_FILENAME)?;
    let digest_text = read_required(dir, DIGEST_FILENAME)?;

    for name in list_files(dir)? {
        if !EXPECTED_FILENAMES.contains(&name.as_str()) {
            return Err(ReportDirReadError::ExtraFile { name });
        }
    }

    let recomputed = canonical_hash(HashDomain::RunReport, &bytes);
    let stored = String::from_utf8_lossy(&digest_text).trim().to_string();
    if recomputed.to_string() != stored {
        return Err(ReportDirReadError::DigestMismatch {
            stored,
            recomputed: recomputed.to_string(),
        });
    }

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ReportDirReadError::ReportParseError {
            detail: e.to_string(),
        })?;
    let schema = value["schema_version"].as_str().unwrap_or("");
    if schema != RUN_REPORT_SCHEMA {
        return Err(ReportDirReadError::SchemaMismatch {
            found: schema.to_string(),
        });
    }

    Ok(LoadedReport {
        bytes,
        value,
        digest: recomputed,
    })
}

/// Write via temp file + rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));
    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReportDirReadError::MissingFile {
            filename: filename.to_string(),
        },
        _ => ReportDirReadError::Io {
            detail: format!("read {filename}: {e}"),
        },
    })
}

/// Regular files in `dir`, skipping leftover temp files.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirReadError> {
    let io = |e: std::io::Error| ReportDirReadError::Io {
        detail: e.to_string(),
    };
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if entry.file_type().map_err(io)?.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with(".tmp_") {
                    files.insert(name.to_string());
                }
            }
        }
    }
    Ok(files)
}
