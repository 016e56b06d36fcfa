// Pattern extraction: splits a filename into prefix/title/number/suffix/extension

mod grouping;

pub use grouping::{group, padding_for_count, representatives, PatternGroup};

use crate::types::{FileRecord, Pattern};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

// Leading release-group tag, e.g. "[Grp] "
static PREFIX_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\[.*?\])\s*").expect("Invalid regex"));

// Trailing tag, capturing the whitespace in front of it
static TRAILING_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s*)(\[.*?\])$").expect("Invalid regex"));

// Unicode decimal digits, so fullwidth volume numbers count too
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid regex"));

/// Splits `name` at the last `.` into (stem, extension).
///
/// A name without a dot has an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or((name, ""))
}

/// Parses a filename into a [`Pattern`]. Never fails.
///
/// The last digit run outside the leading and trailing brackets is the
/// sequence number. Without one, the whole stem becomes the title.
pub fn extract(filename: &str) -> Pattern {
    let (stem, extension) = split_extension(filename);
    let mut rest = stem;

    let mut prefix = "";
    if let Some(bracket) = PREFIX_BRACKET.captures(rest).and_then(|c| c.get(1)) {
        prefix = bracket.as_str();
        rest = rest[bracket.end()..].trim();
    }

    let mut trailing = "";
    let mut spaced_trailing = false;
    let body = match TRAILING_BRACKET.captures(rest) {
        Some(caps) => {
            spaced_trailing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            trailing = caps.get(2).map_or("", |m| m.as_str());
            let start = caps.get(0).map_or(rest.len(), |m| m.start());
            rest[..start].trim()
        }
        None => rest,
    };

    let mut pattern = Pattern {
        prefix: prefix.to_string(),
        extension: extension.to_string(),
        ..Pattern::default()
    };

    match DIGIT_RUN.find_iter(body).last() {
        Some(number) => {
            pattern.number = number.as_str().to_string();
            pattern.title = body[..number.start()].trim().to_string();
            let after = body[number.end()..].trim();
            pattern.suffix = join_suffix(after, trailing, spaced_trailing);
        }
        None => {
            pattern.title = body.trim().to_string();
            pattern.suffix = trailing.to_string();
        }
    }

    pattern
}

// Text after the number plus the trailing tag, spaced as in the original name
fn join_suffix(text: &str, bracket: &str, spaced: bool) -> String {
    match (text.is_empty(), bracket.is_empty()) {
        (false, false) if spaced => format!("{} {}", text, bracket),
        (false, false) => format!("{}{}", text, bracket),
        (false, true) => text.to_string(),
        (true, _) => bracket.to_string(),
    }
}

/// Extracts a pattern per filename and groups them.
///
/// Returns the records (derived name = original name) and one representative
/// pattern per group, in first-seen order.
pub fn analyze<S: AsRef<str>>(filenames: &[S]) -> (Vec<FileRecord>, Vec<Pattern>) {
    let paths: Vec<PathBuf> = filenames
        .iter()
        .map(|name| PathBuf::from(name.as_ref()))
        .collect();
    analyze_paths(&paths)
}

// Same as `analyze`, keeping full paths so the records can be renamed later
pub fn analyze_paths(paths: &[PathBuf]) -> (Vec<FileRecord>, Vec<Pattern>) {
    let records: Vec<FileRecord> = paths
        .iter()
        .map(|path| {
            let record = FileRecord::new(path.clone());
            let pattern = extract(&record.original_name);
            record.with_pattern(pattern)
        })
        .collect();

    let padding_width = padding_for_count(records.len());
    let mut patterns = representatives(&group(&records));
    for pattern in &mut patterns {
        pattern.padding_width = padding_width;
    }

    tracing::debug!(
        files = records.len(),
        groups = patterns.len(),
        "Analyzed filenames"
    );
    (records, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fields() {
        let p = extract("[Grp] Title 06권.zip");
        assert_eq!(p.prefix, "[Grp]");
        assert_eq!(p.title, "Title");
        assert_eq!(p.number, "06");
        assert_eq!(p.suffix, "권");
        assert_eq!(p.extension, "zip");
        assert_eq!(p.padding_width, 2);
        assert_eq!(p.render(), "[Grp] Title 06권.zip");
    }

    #[test]
    fn last_digit_run_is_the_number() {
        let p = extract("Mob Psycho 100 v12.cbz");
        assert_eq!(p.title, "Mob Psycho 100 v");
        assert_eq!(p.number, "12");
        assert_eq!(p.suffix, "");
    }

    #[test]
    fn digits_in_brackets_are_not_the_number() {
        let p = extract("[2023Scans] Title 03 [1080].zip");
        assert_eq!(p.prefix, "[2023Scans]");
        assert_eq!(p.title, "Title");
        assert_eq!(p.number, "03");
        assert_eq!(p.suffix, "[1080]");
    }

    #[test]
    fn trailing_bracket_keeps_original_spacing() {
        let spaced = extract("Title 05 end [v2].zip");
        assert_eq!(spaced.number, "05");
        assert_eq!(spaced.suffix, "end [v2]");

        let tight = extract("Title 05화[v2].zip");
        assert_eq!(tight.suffix, "화[v2]");
        assert_eq!(tight.render(), "Title 05화[v2].zip");
    }

    #[test]
    fn no_number_keeps_whole_stem_as_title() {
        let p = extract("[Grp] Side Story [Extra].zip");
        assert_eq!(p.prefix, "[Grp]");
        assert_eq!(p.title, "Side Story");
        assert_eq!(p.number, "");
        assert_eq!(p.suffix, "[Extra]");

        let plain = extract("README");
        assert_eq!(plain.title, "README");
        assert_eq!(plain.extension, "");
    }

    #[test]
    fn empty_title_is_not_an_error() {
        let p = extract("[Grp] 12.zip");
        assert_eq!(p.prefix, "[Grp]");
        assert_eq!(p.title, "");
        assert_eq!(p.number, "12");
        assert_eq!(p.render(), "[Grp] 12.zip");
    }

    #[test]
    fn fullwidth_number_is_extracted() {
        let p = extract("제목 １２권.zip");
        assert_eq!(p.title, "제목");
        assert_eq!(p.number, "１２");
        assert_eq!(p.suffix, "권");
        assert_eq!(p.render(), "제목 12권.zip");
    }

    #[test]
    fn representative_pattern_keeps_fullwidth_numbers() {
        let (records, patterns) = analyze(&["제목 01권.zip", "제목 １２권.zip"]);
        assert_eq!(patterns.len(), 1);
        let updated = crate::rename::apply_pattern(&records, &patterns[0]);
        let names: Vec<&str> = updated.iter().map(|r| r.derived_name.as_str()).collect();
        assert_eq!(names, ["제목 01권.zip", "제목 12권.zip"]);
    }

    #[test]
    fn render_round_trips() {
        for name in [
            "[Grp] Title 06권.zip",
            "Series 01.cbz",
            "[A] Long Title Here 113화 [完].zip",
            "Notes.txt",
        ] {
            let once = extract(name).render();
            assert_eq!(extract(&once).render(), once);
        }
    }

    #[test]
    fn analyze_groups_and_sets_padding() {
        let names = ["[G] A 01.zip", "[G] A 02.zip", "Other 1.cbz"];
        let (records, patterns) = analyze(&names);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| !r.is_changed()));
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].number, "01");
        assert_eq!(patterns[0].padding_width, 2);
        assert_eq!(patterns[1].title, "Other");

        let many: Vec<String> = (1..=120).map(|i| format!("Vol {}.zip", i)).collect();
        let (_, patterns) = analyze(&many);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].padding_width, 3);
    }
}
