// Command-line surface: one-shot subcommands and the interactive shell grammar

use crate::history::EditKind;
use crate::types::{AddPosition, RemovePosition};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smart-rename")]
#[command(about = "Detect the naming pattern of numbered archives and rename them in bulk.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List files in natural order and the detected patterns
    Scan {
        folder: PathBuf,
    },
    /// Apply edits in order (pattern, remove, add, padding, template) and print the result
    Plan {
        folder: PathBuf,

        /// Index of the detected pattern to apply (see `scan`)
        #[arg(long)]
        pattern: Option<usize>,

        /// Text to remove from every name
        #[arg(long)]
        remove: Option<String>,

        /// Which occurrence to remove: all, front or back
        #[arg(long)]
        remove_at: Option<RemovePosition>,

        /// Text to add to every name
        #[arg(long)]
        add: Option<String>,

        /// Where to add: front or back
        #[arg(long)]
        add_at: Option<AddPosition>,

        /// Number padding width (1, 2 or 3)
        #[arg(long)]
        padding: Option<usize>,

        /// Custom name template, e.g. "Title {number:03d}.zip"
        #[arg(long)]
        template: Option<String>,

        /// Rename the files instead of only printing the plan
        #[arg(long)]
        apply: bool,
    },
    /// Edit interactively with undo; type `help` for commands
    Shell {
        folder: PathBuf,
    },
}

/// One line of input in `shell` mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Patterns,
    Pattern(usize),
    Remove(RemovePosition, String),
    Add(AddPosition, String),
    /// `None` reuses the saved padding width
    Pad(Option<usize>),
    /// Empty reuses the saved template
    Template(String),
    Undo(EditKind),
    Check,
    Commit,
    Help,
    Quit,
}

pub const SHELL_HELP: &str = "\
commands:
  list                          show original -> derived names
  patterns                      show detected patterns
  pattern N                     apply pattern N
  remove [all|front|back] TEXT  remove TEXT (default: all)
  add [front|back] TEXT         add TEXT (default: front)
  pad [N]                       set number padding (1-3, default: last used)
  template [T]                  rename to T, {number} or {number:03d} is replaced
                                (default: last used template)
  undo remove|add|template      undo the last edit of that kind
  check                         validate names and look for conflicts
  commit                        rename the files
  quit";

impl ShellCommand {
    /// Parses one input line.
    ///
    /// Only the single space after a keyword is consumed; the rest of the line
    /// is kept as typed, so `add back  v2` adds `" v2"`.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(ShellCommand::List),
            "patterns" => Ok(ShellCommand::Patterns),
            "pattern" => parse_index(rest).map(ShellCommand::Pattern),
            "remove" | "rm" => {
                let (position, text) = split_option(rest, |w| w.parse::<RemovePosition>().ok());
                Ok(ShellCommand::Remove(position.unwrap_or_default(), text.to_string()))
            }
            "add" => {
                let (position, text) = split_option(rest, |w| w.parse::<AddPosition>().ok());
                Ok(ShellCommand::Add(position.unwrap_or_default(), text.to_string()))
            }
            "pad" | "padding" if rest.trim().is_empty() => Ok(ShellCommand::Pad(None)),
            "pad" | "padding" => parse_index(rest).map(|w| ShellCommand::Pad(Some(w))),
            "template" => Ok(ShellCommand::Template(rest.to_string())),
            "undo" => match rest.trim().to_ascii_lowercase().as_str() {
                "remove" => Ok(ShellCommand::Undo(EditKind::Remove)),
                "add" => Ok(ShellCommand::Undo(EditKind::Add)),
                "template" => Ok(ShellCommand::Undo(EditKind::CustomTemplate)),
                other => Err(format!("Unknown undo target: '{}'", other)),
            },
            "check" => Ok(ShellCommand::Check),
            "commit" => Ok(ShellCommand::Commit),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command: '{}'", other)),
        }
    }
}

fn parse_index(text: &str) -> Result<usize, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("Expected a number, got '{}'", text.trim()))
}

// Peels an optional leading position word off `rest`
fn split_option<T>(rest: &str, parse: impl Fn(&str) -> Option<T>) -> (Option<T>, &str) {
    if let Some((word, text)) = rest.split_once(' ') {
        if let Some(value) = parse(word) {
            return (Some(value), text);
        }
    }
    (None, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(ShellCommand::parse("list"), Ok(ShellCommand::List));
        assert_eq!(ShellCommand::parse("  pattern 2 "), Ok(ShellCommand::Pattern(2)));
        assert_eq!(ShellCommand::parse("pad 3\n"), Ok(ShellCommand::Pad(Some(3))));
        assert_eq!(ShellCommand::parse("pad"), Ok(ShellCommand::Pad(None)));
        assert_eq!(
            ShellCommand::parse("undo template"),
            Ok(ShellCommand::Undo(EditKind::CustomTemplate))
        );
        assert!(ShellCommand::parse("pattern x").is_err());
        assert!(ShellCommand::parse("dance").is_err());
    }

    #[test]
    fn keeps_text_whitespace() {
        assert_eq!(
            ShellCommand::parse("add back  v2"),
            Ok(ShellCommand::Add(AddPosition::Back, " v2".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("add [New] "),
            Ok(ShellCommand::Add(AddPosition::Front, "[New] ".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("remove front 권"),
            Ok(ShellCommand::Remove(RemovePosition::Front, "권".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("remove [Grp]"),
            Ok(ShellCommand::Remove(RemovePosition::All, "[Grp]".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("template Title {number:03d}.zip"),
            Ok(ShellCommand::Template("Title {number:03d}.zip".to_string()))
        );
    }
}
