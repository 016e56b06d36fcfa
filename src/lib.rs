// Smart Rename - pattern detection and bulk renaming for numbered archives

#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod file_ops;
pub mod history;
pub mod limits;
pub mod pattern;
pub mod rename;
pub mod security;
pub mod session;
pub mod settings;
pub mod types;
pub mod validation;

pub use error::{ConflictError, RenameError, SessionError, TemplateError, ValidationError};
pub use file_ops::{execute_rename, list_directory_entries, natural_cmp, natural_key, BatchReport};
pub use history::{EditHistory, EditKind};
pub use pattern::{analyze, analyze_paths, extract, group, representatives};
pub use rename::{
    add_text, apply_custom_template, apply_pattern, change_padding_width, remove_text,
    NameTemplate,
};
pub use session::Session;
pub use types::{AddPosition, FileRecord, GroupKey, Pattern, RemovePosition, RenameOutcome};
pub use validation::{check_conflicts, validate_filename};
