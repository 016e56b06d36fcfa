// Custom name templates: literal text around one `{number}` placeholder

use crate::error::TemplateError;
use crate::limits::{MAX_PADDING_WIDTH, MAX_TEMPLATE_LENGTH};
use crate::types::ascii_digits;
use regex::Regex;
use std::sync::LazyLock;

// {number} or {number:0Nd}
static NUMBER_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{number(?::0(\d+)d)?\}").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Zero-padded to at least `width` digits when set
    Number { width: Option<usize> },
}

/// Parsed template such as `Title {number:03d}화.zip`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameTemplate {
    segments: Vec<Segment>,
}

impl NameTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        if template.chars().count() > MAX_TEMPLATE_LENGTH {
            return Err(TemplateError::TooLong {
                max: MAX_TEMPLATE_LENGTH,
            });
        }

        let mut segments = Vec::new();
        let mut has_number = false;
        let mut last_end = 0;

        for caps in NUMBER_PLACEHOLDER.captures_iter(template) {
            let Some(whole) = caps.get(0) else { continue };
            if has_number {
                return Err(TemplateError::MultiplePlaceholders);
            }
            has_number = true;

            let width = match caps.get(1) {
                Some(digits) => {
                    let width = digits.as_str().parse().unwrap_or(usize::MAX);
                    if width > MAX_PADDING_WIDTH {
                        return Err(TemplateError::WidthTooLarge {
                            width,
                            max: MAX_PADDING_WIDTH,
                        });
                    }
                    Some(width)
                }
                None => None,
            };

            if whole.start() > last_end {
                segments.push(Segment::Literal(template[last_end..whole.start()].to_string()));
            }
            segments.push(Segment::Number { width });
            last_end = whole.end();
        }

        if last_end < template.len() {
            segments.push(Segment::Literal(template[last_end..].to_string()));
        }

        Ok(Self { segments })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_placeholder(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Number { .. }))
    }

    // Substitutes `number` into the placeholder; zero-filled numbers are
    // written with ASCII digits
    pub fn render(&self, number: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Number { width: Some(width) } => {
                    out.push_str(&format!("{:0>width$}", ascii_digits(number), width = *width));
                }
                Segment::Number { width: None } => out.push_str(number),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals_around_placeholder() {
        let t = NameTemplate::parse("Title_{number:03d}화.zip").unwrap();
        assert_eq!(
            t.segments,
            [
                Segment::Literal("Title_".to_string()),
                Segment::Number { width: Some(3) },
                Segment::Literal("화.zip".to_string()),
            ]
        );
        assert_eq!(t.render("7"), "Title_007화.zip");
    }

    #[test]
    fn padding_never_truncates() {
        let t = NameTemplate::parse("{number:02d}.cbz").unwrap();
        assert_eq!(t.render("006"), "006.cbz");
        assert_eq!(t.render("5"), "05.cbz");

        let plain = NameTemplate::parse("Vol {number}.zip").unwrap();
        assert_eq!(plain.render("006"), "Vol 006.zip");
        assert_eq!(plain.render("１２"), "Vol １２.zip");
        assert_eq!(t.render("７"), "07.cbz");
    }

    #[test]
    fn other_braces_are_literal() {
        let t = NameTemplate::parse("{title} {number}").unwrap();
        assert_eq!(t.render("1"), "{title} 1");
    }

    #[test]
    fn template_without_placeholder_is_literal() {
        let t = NameTemplate::parse("same.zip").unwrap();
        assert!(!t.has_placeholder());
        assert_eq!(t.render("3"), "same.zip");
        assert!(NameTemplate::parse("").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_templates() {
        assert_eq!(
            NameTemplate::parse("{number}-{number}"),
            Err(TemplateError::MultiplePlaceholders)
        );
        assert_eq!(
            NameTemplate::parse("{number:011d}"),
            Err(TemplateError::WidthTooLarge { width: 11, max: 10 })
        );
        let long = "x".repeat(MAX_TEMPLATE_LENGTH + 1);
        assert!(matches!(
            NameTemplate::parse(&long),
            Err(TemplateError::TooLong { .. })
        ));
    }
}
