// Rename session: owns the records, the offered patterns and the undo slots

use crate::error::SessionError;
use crate::file_ops::{execute_rename, list_directory_entries, BatchReport};
use crate::history::{EditHistory, EditKind};
use crate::limits::{MAX_FILES, PADDING_WIDTHS};
use crate::pattern::analyze_paths;
use crate::rename::{self, NameTemplate};
use crate::types::{AddPosition, FileRecord, Pattern, RemovePosition};
use crate::validation::{check_conflicts, validate_filename};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// State a front end keeps between engine calls.
///
/// Every edit replaces `records` with the list returned by a pure transform;
/// undoable edits first stash the previous list in their history slot.
#[derive(Debug, Clone, Default)]
pub struct Session {
    folder: Option<PathBuf>,
    records: Vec<FileRecord>,
    patterns: Vec<Pattern>,
    selected: Option<usize>,
    history: EditHistory,
}

impl Session {
    // Scans `folder` and analyzes its files
    pub fn load(folder: &Path) -> Result<Self> {
        let paths = list_directory_entries(folder)?;
        let mut session = Self::from_paths(&paths);
        session.folder = Some(folder.to_path_buf());
        Ok(session)
    }

    /// Analyzes `paths`, keeping only the first [`MAX_FILES`].
    pub fn from_paths(paths: &[PathBuf]) -> Self {
        let paths = if paths.len() > MAX_FILES {
            tracing::warn!(found = paths.len(), max = MAX_FILES, "Too many files, truncating");
            &paths[..MAX_FILES]
        } else {
            paths
        };
        let (records, patterns) = analyze_paths(paths);
        Self {
            folder: None,
            records,
            patterns,
            selected: None,
            history: EditHistory::new(),
        }
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn selected_pattern(&self) -> Option<&Pattern> {
        self.selected.and_then(|i| self.patterns.get(i))
    }

    pub fn can_undo(&self, kind: EditKind) -> bool {
        self.history.can_undo(kind)
    }

    /// Applies representative pattern `index` to all records.
    pub fn select_pattern(&mut self, index: usize) -> Result<(), SessionError> {
        let pattern = self
            .patterns
            .get(index)
            .ok_or(SessionError::PatternOutOfRange {
                index,
                count: self.patterns.len(),
            })?;
        self.records = rename::apply_pattern(&self.records, pattern);
        self.selected = Some(index);
        Ok(())
    }

    pub fn remove_text(&mut self, text: &str, position: RemovePosition) -> Result<(), SessionError> {
        if text.is_empty() {
            return Err(SessionError::EmptyText(EditKind::Remove));
        }
        let updated = rename::remove_text(&self.records, text, position);
        self.commit_edit(EditKind::Remove, updated);
        Ok(())
    }

    pub fn add_text(&mut self, text: &str, position: AddPosition) -> Result<(), SessionError> {
        if text.is_empty() {
            return Err(SessionError::EmptyText(EditKind::Add));
        }
        let updated = rename::add_text(&self.records, text, position);
        self.commit_edit(EditKind::Add, updated);
        Ok(())
    }

    pub fn change_padding_width(&mut self, width: usize) -> Result<(), SessionError> {
        if !PADDING_WIDTHS.contains(&width) {
            return Err(SessionError::InvalidPadding(width));
        }
        self.records = rename::change_padding_width(&self.records, width);
        Ok(())
    }

    pub fn apply_template(&mut self, template: &str) -> Result<(), SessionError> {
        let parsed = NameTemplate::parse(template)?;
        if parsed.is_empty() {
            return Err(SessionError::EmptyText(EditKind::CustomTemplate));
        }
        if !parsed.has_placeholder() && self.records.len() > 1 {
            tracing::warn!(template, "Template has no {{number}} placeholder, names will collide");
        }
        let updated = rename::apply_name_template(&self.records, &parsed);
        self.commit_edit(EditKind::CustomTemplate, updated);
        Ok(())
    }

    // Restores the list saved before the last edit of `kind`
    pub fn undo(&mut self, kind: EditKind) -> Result<(), SessionError> {
        let previous = self
            .history
            .take(kind)
            .ok_or(SessionError::NothingToUndo(kind))?;
        self.records = previous;
        Ok(())
    }

    /// Runs the pre-commit checks without touching the filesystem.
    ///
    /// Only names that will actually change are validated; every name takes
    /// part in the conflict check.
    pub fn check(&self) -> Result<(), SessionError> {
        if self.records.is_empty() {
            return Err(SessionError::NoFiles);
        }
        for record in self.records.iter().filter(|r| r.is_changed()) {
            validate_filename(&record.derived_name).map_err(|source| {
                SessionError::InvalidName {
                    name: record.derived_name.clone(),
                    source,
                }
            })?;
        }
        check_conflicts(&self.records)?;
        Ok(())
    }

    /// Validates and renames the batch.
    ///
    /// When every file succeeds and the session came from a folder, the folder
    /// is scanned again and the session starts over on the new names.
    pub fn commit(&mut self) -> Result<BatchReport, SessionError> {
        if self.records.is_empty() {
            return Err(SessionError::NoFiles);
        }
        if self.selected.is_none() {
            return Err(SessionError::NoPatternSelected);
        }
        self.check()?;

        let report = execute_rename(&self.records);
        if report.is_success() {
            self.reload();
        }
        Ok(report)
    }

    fn commit_edit(&mut self, kind: EditKind, updated: Vec<FileRecord>) {
        let previous = std::mem::replace(&mut self.records, updated);
        self.history.record(kind, previous);
    }

    fn reload(&mut self) {
        let Some(folder) = self.folder.clone() else {
            return;
        };
        match Session::load(&folder) {
            Ok(fresh) => *self = fresh,
            Err(e) => tracing::warn!(error = %e, "Failed to reload folder after rename"),
        }
    }
}
