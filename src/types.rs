// Shared types used across modules

use crate::error::ParsePositionError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Decomposed filename: `[prefix] title <number><suffix>.extension`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub prefix: String,
    pub title: String,
    pub number: String,
    pub suffix: String,
    pub extension: String,
    pub padding_width: usize,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            title: String::new(),
            number: String::new(),
            suffix: String::new(),
            extension: String::new(),
            padding_width: 2,
        }
    }
}

impl Pattern {
    /// Rebuilds a filename from the fields.
    ///
    /// Prefix, title and the number+suffix block are joined by single spaces,
    /// empty parts are skipped. The number is re-padded to `padding_width`.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);

        let prefix = self.prefix.trim();
        if !prefix.is_empty() {
            parts.push(prefix.to_string());
        }
        let title = self.title.trim();
        if !title.is_empty() {
            parts.push(title.to_string());
        }

        let mut number_suffix = pad_number(&self.number, self.padding_width);
        number_suffix.push_str(self.suffix.trim());
        if !number_suffix.is_empty() {
            parts.push(number_suffix);
        }

        let mut filename = parts.join(" ");
        if !self.extension.is_empty() {
            filename.push('.');
            filename.push_str(&self.extension);
        }
        filename
    }

    /// Key shared by every file of the same series (number excluded)
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            prefix: self.prefix.clone(),
            title: self.title.clone(),
            suffix: self.suffix.clone(),
            extension: self.extension.clone(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// Drops leading zeros, then left-pads with zeros to `width`. Never truncates.
// Digits from other scripts are rewritten as ASCII first.
fn pad_number(number: &str, width: usize) -> String {
    if number.is_empty() {
        return String::new();
    }
    let ascii = ascii_digits(number);
    if !ascii.bytes().all(|b| b.is_ascii_digit()) {
        return number.to_string();
    }
    let trimmed = ascii.trim_start_matches('0');
    let value = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{:0>width$}", value, width = width)
}

// Code points of '0' in the decimal digit blocks we normalise
const DIGIT_ZEROS: [u32; 8] = [
    0x0030, // ASCII
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0E50, // Thai
    0x1040, // Myanmar
    0xFF10, // Fullwidth
];

/// Numeric value of a decimal digit, ASCII or from one of the common
/// non-ASCII digit blocks (fullwidth included).
pub fn digit_value(c: char) -> Option<u32> {
    let code = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|zero| code - zero)
}

/// Rewrites every recognised digit as its ASCII form, keeping other chars.
pub fn ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match digit_value(c) {
            Some(v) => char::from(b'0' + v as u8),
            None => c,
        })
        .collect()
}

/// Grouping key: everything but the number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub prefix: String,
    pub title: String,
    pub suffix: String,
    pub extension: String,
}

/// One file under consideration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub original_path: PathBuf,
    pub original_name: Arc<String>,
    pub derived_name: String,
    pub pattern: Option<Pattern>,
}

impl FileRecord {
    // Record with derived name equal to the original, no pattern yet
    pub fn new(original_path: PathBuf) -> Self {
        let name = original_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            original_path,
            derived_name: name.clone(),
            original_name: Arc::new(name),
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Directory of the original file joined with the derived name
    pub fn target_path(&self) -> PathBuf {
        self.original_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.derived_name)
    }

    pub fn is_changed(&self) -> bool {
        self.derived_name != self.original_name.as_str()
    }
}

/// Where `remove_text` takes effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovePosition {
    #[default]
    All,
    Front,
    Back,
}

/// Where `add_text` inserts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPosition {
    #[default]
    Front,
    Back,
}

impl fmt::Display for RemovePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovePosition::All => write!(f, "all"),
            RemovePosition::Front => write!(f, "front"),
            RemovePosition::Back => write!(f, "back"),
        }
    }
}

impl fmt::Display for AddPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddPosition::Front => write!(f, "front"),
            AddPosition::Back => write!(f, "back"),
        }
    }
}

impl FromStr for RemovePosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RemovePosition::All),
            "front" => Ok(RemovePosition::Front),
            "back" => Ok(RemovePosition::Back),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

impl FromStr for AddPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(AddPosition::Front),
            "back" => Ok(AddPosition::Back),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

/// Result of one rename attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub success: bool,
    pub original_name: Arc<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(prefix: &str, title: &str, number: &str, suffix: &str, ext: &str) -> Pattern {
        Pattern {
            prefix: prefix.to_string(),
            title: title.to_string(),
            number: number.to_string(),
            suffix: suffix.to_string(),
            extension: ext.to_string(),
            padding_width: 2,
        }
    }

    #[test]
    fn render_joins_non_empty_parts() {
        let p = pattern("[Grp]", "Title", "06", "권", "zip");
        assert_eq!(p.render(), "[Grp] Title 06권.zip");

        let p = pattern("", "Title", "", "", "");
        assert_eq!(p.render(), "Title");

        let p = pattern("", "", "3", "", "cbz");
        assert_eq!(p.render(), "03.cbz");
    }

    #[test]
    fn render_repads_number() {
        let mut p = pattern("", "Vol", "006", "", "zip");
        assert_eq!(p.render(), "Vol 06.zip");
        p.padding_width = 1;
        assert_eq!(p.render(), "Vol 6.zip");
        p.padding_width = 3;
        assert_eq!(p.render(), "Vol 006.zip");
        p.number = "1234".to_string();
        assert_eq!(p.render(), "Vol 1234.zip");
        p.number = "000".to_string();
        p.padding_width = 1;
        assert_eq!(p.render(), "Vol 0.zip");
    }

    #[test]
    fn render_normalises_fullwidth_digits() {
        let mut p = pattern("", "제목", "１２", "권", "zip");
        assert_eq!(p.render(), "제목 12권.zip");
        p.number = "０７".to_string();
        p.padding_width = 3;
        assert_eq!(p.render(), "제목 007권.zip");
    }

    #[test]
    fn digit_values_cover_other_scripts() {
        assert_eq!(digit_value('7'), Some(7));
        assert_eq!(digit_value('９'), Some(9));
        assert_eq!(digit_value('٣'), Some(3));
        assert_eq!(digit_value('a'), None);
        assert_eq!(digit_value('十'), None);
        assert_eq!(ascii_digits("Vol １０b"), "Vol 10b");
    }

    #[test]
    fn render_keeps_suffix_without_number() {
        let p = pattern("[A]", "Extras", "", "[v2]", "zip");
        assert_eq!(p.render(), "[A] Extras [v2].zip");
    }

    #[test]
    fn target_path_uses_parent_directory() {
        let mut record = FileRecord::new(PathBuf::from("/books/a 01.zip"));
        assert_eq!(record.original_name.as_str(), "a 01.zip");
        assert!(!record.is_changed());
        record.derived_name = "b 01.zip".to_string();
        assert_eq!(record.target_path(), PathBuf::from("/books/b 01.zip"));
        assert!(record.is_changed());
    }

    #[test]
    fn positions_parse_case_insensitively() {
        assert_eq!("Back".parse::<RemovePosition>().unwrap(), RemovePosition::Back);
        assert_eq!("front".parse::<AddPosition>().unwrap(), AddPosition::Front);
        assert!("all".parse::<AddPosition>().is_err());
    }
}
