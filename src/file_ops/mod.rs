// File operations: directory scanning, natural ordering and per-file renaming

use crate::error::RenameError;
use crate::security::can_rename_in;
use crate::types::{digit_value, FileRecord, RenameOutcome};
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Regular files directly inside `folder`, in natural order of their names.
pub fn list_directory_entries(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        anyhow::bail!("Path does not exist: {}", folder.display());
    }
    if !folder.is_dir() {
        anyhow::bail!("Not a directory: {}", folder.display());
    }

    let entries =
        fs::read_dir(folder).with_context(|| format!("Failed to read: {}", folder.display()))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.with_context(|| "Failed to read entry")?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    tracing::info!(folder = %folder.display(), files = files.len(), "Scanned folder");
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// One run of a natural sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NaturalToken {
    /// Lowercased non-digit text
    Text(String),
    /// Digit run as ASCII with leading zeros dropped; compared by numeric value
    Number(String),
}

impl Ord for NaturalToken {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NaturalToken::Number(a), NaturalToken::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (NaturalToken::Text(a), NaturalToken::Text(b)) => a.cmp(b),
            (NaturalToken::Number(_), NaturalToken::Text(_)) => Ordering::Less,
            (NaturalToken::Text(_), NaturalToken::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for NaturalToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Alternating text/number tokens, always starting and ending with text
// (possibly empty), so keys of different names line up position by position.
pub fn natural_key(name: &str) -> Vec<NaturalToken> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = name.chars().peekable();

    while let Some(&c) = chars.peek() {
        if digit_value(c).is_some() {
            tokens.push(NaturalToken::Text(std::mem::take(&mut text).to_lowercase()));
            let mut digits = String::new();
            while let Some(value) = chars.peek().and_then(|&d| digit_value(d)) {
                digits.push(char::from(b'0' + value as u8));
                chars.next();
            }
            let value = digits.trim_start_matches('0');
            let value = if value.is_empty() { "0" } else { value };
            tokens.push(NaturalToken::Number(value.to_string()));
        } else {
            text.push(c);
            chars.next();
        }
    }
    tokens.push(NaturalToken::Text(text.to_lowercase()));
    tokens
}

// Natural sort: compares numbers numerically within strings
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Renames `from` to `to` after checking the source exists and the
/// destination does not.
pub fn rename_file(from: &Path, to: &Path) -> Result<(), RenameError> {
    if !from.exists() {
        return Err(RenameError::SourceMissing(from.display().to_string()));
    }
    if to.exists() {
        return Err(RenameError::DestinationExists(to.display().to_string()));
    }
    fs::rename(from, to).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => RenameError::PermissionDenied,
        _ => RenameError::Io(e),
    })
}

/// Outcome of a rename batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RenameOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }
}

/// Renames every changed record, one by one. A failure is recorded for that
/// file and the batch carries on.
pub fn execute_rename(records: &[FileRecord]) -> BatchReport {
    let mut access: HashMap<PathBuf, bool> = HashMap::new();
    let mut report = BatchReport {
        outcomes: Vec::with_capacity(records.len()),
    };

    for record in records {
        let original_name = Arc::clone(&record.original_name);
        if !record.is_changed() {
            report.outcomes.push(RenameOutcome {
                success: true,
                original_name,
                message: "No change needed".to_string(),
            });
            continue;
        }

        let outcome = match rename_record(record, &mut access) {
            Ok(()) => RenameOutcome {
                success: true,
                original_name,
                message: format!("Renamed to {}", record.derived_name),
            },
            Err(e) => {
                tracing::warn!(file = %record.original_name, error = %e, "Rename failed");
                RenameOutcome {
                    success: false,
                    original_name,
                    message: e.to_string(),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Rename batch finished"
    );
    report
}

// Checks directory access once per directory before renaming
fn rename_record(
    record: &FileRecord,
    access: &mut HashMap<PathBuf, bool>,
) -> Result<(), RenameError> {
    if record.original_path.exists() {
        let dir = match record.original_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let allowed = *access
            .entry(dir)
            .or_insert_with_key(|dir| can_rename_in(dir));
        if !allowed {
            return Err(RenameError::PermissionDenied);
        }
    }
    rename_file(&record.original_path, &record.target_path())
}
