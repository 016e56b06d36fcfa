// Pre-commit checks: illegal names and duplicate targets

use crate::error::{ConflictError, ValidationError};
use crate::limits::MAX_FILENAME_LENGTH;
use crate::pattern::split_extension;
use crate::types::FileRecord;
use std::collections::HashSet;

const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Checks a filename against the forbidden characters, the reserved device
/// names (case-insensitive, extension ignored) and the length limit.
/// A name with nothing but dots and spaces before its extension is rejected.
pub fn validate_filename(name: &str) -> Result<(), ValidationError> {
    let (stem, _) = split_extension(name);
    if stem.trim_matches(|c: char| c == '.' || c.is_whitespace()).is_empty() {
        return Err(ValidationError::Empty);
    }

    if name.contains(FORBIDDEN_CHARS) {
        return Err(ValidationError::IllegalCharacter);
    }

    let upper = stem.to_uppercase();
    if RESERVED_NAMES.contains(&upper.as_str()) {
        return Err(ValidationError::ReservedName(stem.to_string()));
    }

    let len = name.chars().count();
    if len > MAX_FILENAME_LENGTH {
        return Err(ValidationError::TooLong {
            len,
            max: MAX_FILENAME_LENGTH,
        });
    }

    Ok(())
}

// Reports every derived name used by more than one record, once each
pub fn check_conflicts(records: &[FileRecord]) -> Result<(), ConflictError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut reported: HashSet<String> = HashSet::new();
    let mut conflicts = Vec::new();

    for record in records {
        let lower = record.derived_name.to_lowercase();
        if !seen.insert(lower.clone()) && reported.insert(lower) {
            conflicts.push(record.derived_name.clone());
        }
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(ConflictError(conflicts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn with_names(names: &[&str]) -> Vec<FileRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut record = FileRecord::new(PathBuf::from(format!("f{}", i)));
                record.derived_name = name.to_string();
                record
            })
            .collect()
    }

    #[test]
    fn reserved_names_fail() {
        assert_eq!(
            validate_filename("CON.zip"),
            Err(ValidationError::ReservedName("CON".to_string()))
        );
        assert!(validate_filename("lpt1").is_err());
        assert!(validate_filename("CONSOLE.zip").is_ok());
    }

    #[test]
    fn illegal_characters_fail() {
        assert_eq!(
            validate_filename("file<1>.zip"),
            Err(ValidationError::IllegalCharacter)
        );
        assert!(validate_filename("a:b").is_err());
        assert!(validate_filename("[G] A 01권.zip").is_ok());
    }

    #[test]
    fn long_names_fail() {
        let name = format!("{}.zip", "가".repeat(196));
        assert!(validate_filename(&name).is_ok());
        let name = format!("{}.zip", "가".repeat(198));
        assert!(matches!(
            validate_filename(&name),
            Err(ValidationError::TooLong { len: 202, max: 200 })
        ));
    }

    #[test]
    fn empty_names_fail() {
        for name in ["", "   ", ".zip", " .cbz", "..", "."] {
            assert_eq!(validate_filename(name), Err(ValidationError::Empty), "{name:?}");
        }
        assert!(validate_filename("1.zip").is_ok());
        assert!(validate_filename("a.b.zip").is_ok());
    }

    #[test]
    fn conflicts_are_case_insensitive() {
        let records = with_names(&["a.zip", "A.zip", "b.zip"]);
        let err = check_conflicts(&records).unwrap_err();
        assert_eq!(err.names(), ["A.zip"]);
    }

    #[test]
    fn each_conflict_reported_once() {
        let records = with_names(&["x.zip", "X.zip", "x.ZIP", "y.zip", "y.zip"]);
        let err = check_conflicts(&records).unwrap_err();
        assert_eq!(err.names(), ["X.zip", "y.zip"]);
        assert!(check_conflicts(&with_names(&["1.zip", "2.zip"])).is_ok());
    }
}
