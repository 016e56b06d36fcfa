// Error types: template parsing, name validation, renames and the session workflow

use crate::history::EditKind;
use thiserror::Error;

/// Invalid `remove`/`add` position text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown position: '{0}'")]
pub struct ParsePositionError(pub String);

/// Custom template could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template too long (max {max} chars)")]
    TooLong { max: usize },

    #[error("Template may contain only one {{number}} placeholder")]
    MultiplePlaceholders,

    #[error("Padding width {width} too large (max {max})")]
    WidthTooLarge { width: usize, max: usize },
}

/// Filename rejected before any rename is attempted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name contains a forbidden character: < > : \" / \\ | ? *")]
    IllegalCharacter,

    #[error("'{0}' is a reserved device name")]
    ReservedName(String),

    #[error("Name too long ({len} chars, max {max})")]
    TooLong { len: usize, max: usize },

    #[error("Name has no text before the extension")]
    Empty,
}

/// Two or more records share a derived name (case-insensitive)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Duplicate target names: {}", .0.join(", "))]
pub struct ConflictError(pub Vec<String>);

impl ConflictError {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Per-file filesystem failure
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Source not found: {0}")]
    SourceMissing(String),

    #[error("Destination already exists: {0}")]
    DestinationExists(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Rename failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Caller-facing workflow errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No files loaded")]
    NoFiles,

    #[error("Select a pattern first")]
    NoPatternSelected,

    #[error("Pattern {index} out of range ({count} available)")]
    PatternOutOfRange { index: usize, count: usize },

    #[error("Nothing entered for {0}")]
    EmptyText(EditKind),

    #[error("Padding width must be 1, 2 or 3 (got {0})")]
    InvalidPadding(usize),

    #[error("Nothing to undo for {0}")]
    NothingToUndo(EditKind),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Invalid name '{name}': {source}")]
    InvalidName {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}
