// Rename transforms: each takes the current records and returns a fresh list

mod template;

pub use template::NameTemplate;

use crate::limits::PADDING_WIDTHS;
use crate::pattern::split_extension;
use crate::types::{AddPosition, FileRecord, Pattern, RemovePosition};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Applies a representative pattern to every record that has one.
///
/// Each record keeps its own number; prefix, title, suffix, extension and
/// padding come from `template`.
pub fn apply_pattern(records: &[FileRecord], template: &Pattern) -> Vec<FileRecord> {
    let updated: Vec<FileRecord> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(own) = &record.pattern {
                let pattern = Pattern {
                    number: own.number.clone(),
                    ..template.clone()
                };
                record.derived_name = pattern.render();
                record.pattern = Some(pattern);
            }
            record
        })
        .collect();

    log_changes("apply_pattern", records, &updated);
    updated
}

// Removes `text` from the derived names (and the pattern text fields)
pub fn remove_text(
    records: &[FileRecord],
    text: &str,
    position: RemovePosition,
) -> Vec<FileRecord> {
    if text.is_empty() {
        return records.to_vec();
    }

    let updated: Vec<FileRecord> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.derived_name =
                edit_stem(&record.derived_name, |stem| remove_at(stem, text, position));
            if let Some(pattern) = &mut record.pattern {
                pattern.prefix = remove_at(&pattern.prefix, text, position);
                pattern.title = remove_at(&pattern.title, text, position);
                pattern.suffix = remove_at(&pattern.suffix, text, position);
            }
            record
        })
        .collect();

    log_changes("remove_text", records, &updated);
    updated
}

// Adds `text` verbatim at the front or back of the derived names
pub fn add_text(records: &[FileRecord], text: &str, position: AddPosition) -> Vec<FileRecord> {
    if text.is_empty() {
        return records.to_vec();
    }

    let updated: Vec<FileRecord> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.derived_name = edit_stem(&record.derived_name, |stem| match position {
                AddPosition::Front => format!("{}{}", text, stem),
                AddPosition::Back => format!("{}{}", stem, text),
            });
            if let Some(pattern) = &mut record.pattern {
                match position {
                    AddPosition::Front => pattern.prefix.insert_str(0, text),
                    AddPosition::Back => pattern.suffix.push_str(text),
                }
            }
            record
        })
        .collect();

    log_changes("add_text", records, &updated);
    updated
}

/// Re-pads the number of every numbered record to `width` (1, 2 or 3).
///
/// Any other width returns the records unchanged.
pub fn change_padding_width(records: &[FileRecord], width: usize) -> Vec<FileRecord> {
    if !PADDING_WIDTHS.contains(&width) {
        tracing::warn!(width, "Ignoring unsupported padding width");
        return records.to_vec();
    }

    let updated: Vec<FileRecord> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(pattern) = record.pattern.as_mut().filter(|p| !p.number.is_empty()) {
                pattern.padding_width = width;
                record.derived_name = pattern.render();
            }
            record
        })
        .collect();

    log_changes("change_padding_width", records, &updated);
    updated
}

// Parses `template` and applies it; an unparseable template changes nothing
pub fn apply_custom_template(records: &[FileRecord], template: &str) -> Vec<FileRecord> {
    match NameTemplate::parse(template) {
        Ok(parsed) => apply_name_template(records, &parsed),
        Err(e) => {
            tracing::warn!(template, error = %e, "Ignoring custom template");
            records.to_vec()
        }
    }
}

/// Sets each numbered record's derived name to `template` with its number
/// substituted. The result bypasses [`Pattern::render`] and the pattern is
/// left as it was.
pub fn apply_name_template(records: &[FileRecord], template: &NameTemplate) -> Vec<FileRecord> {
    if template.is_empty() {
        return records.to_vec();
    }

    let updated: Vec<FileRecord> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            let number = record
                .pattern
                .as_ref()
                .map(|p| p.number.as_str())
                .filter(|n| !n.is_empty());
            if let Some(number) = number {
                record.derived_name = template.render(number);
            }
            record
        })
        .collect();

    log_changes("apply_custom_template", records, &updated);
    updated
}

// Applies `edit` to the part before the last '.', then collapses whitespace
fn edit_stem(name: &str, edit: impl FnOnce(&str) -> String) -> String {
    let (stem, extension) = split_extension(name);
    let edited = edit(stem);
    let stem = WHITESPACE_RUN.replace_all(&edited, " ");
    let stem = stem.trim();
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}

fn remove_at(haystack: &str, needle: &str, position: RemovePosition) -> String {
    match position {
        RemovePosition::All => haystack.replace(needle, ""),
        RemovePosition::Front => haystack.replacen(needle, "", 1),
        RemovePosition::Back => match haystack.rfind(needle) {
            Some(i) => format!("{}{}", &haystack[..i], &haystack[i + needle.len()..]),
            None => haystack.to_string(),
        },
    }
}

fn log_changes(operation: &str, before: &[FileRecord], after: &[FileRecord]) {
    let changed = before
        .iter()
        .zip(after)
        .filter(|(old, new)| old.derived_name != new.derived_name)
        .count();
    tracing::debug!(operation, changed, total = after.len(), "Transform applied");
}
