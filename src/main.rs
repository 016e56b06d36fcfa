// Smart Rename - command-line front end for the pattern rename engine

#![warn(clippy::all)]

use anyhow::{Context, Result};
use clap::Parser;
use smart_rename::cli::{Cli, Command, ShellCommand, SHELL_HELP};
use smart_rename::file_ops::BatchReport;
use smart_rename::settings::{load_settings, save_settings, Settings};
use smart_rename::{EditKind, Session, SessionError};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    // RUST_LOG overrides; logs go to stderr so stdout stays a clean listing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("smart_rename=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { folder } => scan(&folder),
        Command::Plan {
            folder,
            pattern,
            remove,
            remove_at,
            add,
            add_at,
            padding,
            template,
            apply,
        } => {
            let settings = load_settings();
            let mut session = Session::load(&folder)?;

            if let Some(index) = pattern {
                session.select_pattern(index)?;
            }
            if let Some(text) = remove {
                session.remove_text(&text, remove_at.unwrap_or(settings.remove_position))?;
            }
            if let Some(text) = add {
                session.add_text(&text, add_at.unwrap_or(settings.add_position))?;
            }
            if let Some(width) = padding {
                session.change_padding_width(width)?;
            }
            if let Some(template) = template {
                session.apply_template(&template)?;
            }

            print_records(&session);
            if !apply {
                return Ok(());
            }
            let report = session.commit()?;
            print_report(&report);
            if !report.is_success() {
                anyhow::bail!("{} file(s) failed to rename", report.failed());
            }
            Ok(())
        }
        Command::Shell { folder } => shell(&folder),
    }
}

fn scan(folder: &Path) -> Result<()> {
    let session = Session::load(folder)?;
    for record in session.records() {
        println!("{}", record.original_name);
    }
    println!();
    print_patterns(&session);
    Ok(())
}

fn shell(folder: &Path) -> Result<()> {
    let mut settings = load_settings();
    let mut session = Session::load(folder)?;
    println!("Loaded {} file(s) from {}", session.records().len(), folder.display());
    print_patterns(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else { break };
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        if let Err(e) = run_shell_command(&mut session, &mut settings, command) {
            println!("Error: {}", e);
        }
    }
    Ok(())
}

fn run_shell_command(
    session: &mut Session,
    settings: &mut Settings,
    command: ShellCommand,
) -> Result<(), SessionError> {
    match command {
        ShellCommand::List => print_records(session),
        ShellCommand::Patterns => print_patterns(session),
        ShellCommand::Help => println!("{}", SHELL_HELP),
        ShellCommand::Pattern(index) => {
            session.select_pattern(index)?;
            print_records(session);
        }
        ShellCommand::Remove(position, text) => {
            session.remove_text(&text, position)?;
            settings.remove_position = position;
            save_settings(settings);
            print_records(session);
        }
        ShellCommand::Add(position, text) => {
            session.add_text(&text, position)?;
            settings.add_position = position;
            save_settings(settings);
            print_records(session);
        }
        ShellCommand::Pad(width) => {
            let width = width.unwrap_or(settings.padding_width);
            session.change_padding_width(width)?;
            settings.padding_width = width;
            save_settings(settings);
            print_records(session);
        }
        ShellCommand::Template(template) => {
            let template = if template.is_empty() {
                settings.custom_template.clone()
            } else {
                template
            };
            session.apply_template(&template)?;
            settings.custom_template = template;
            save_settings(settings);
            print_records(session);
        }
        ShellCommand::Undo(kind) => {
            session.undo(kind)?;
            println!("Restored state before the last {}", kind);
            print_records(session);
        }
        ShellCommand::Check => {
            session.check()?;
            println!("No problems found");
        }
        ShellCommand::Commit => {
            let report = session.commit()?;
            print_report(&report);
            if report.is_success() {
                print_patterns(session);
            }
        }
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn print_records(session: &Session) {
    for record in session.records() {
        let marker = if record.is_changed() { "*" } else { " " };
        println!("{} {}  ->  {}", marker, record.original_name, record.derived_name);
    }
    let undo: Vec<String> = EditKind::ALL
        .iter()
        .filter(|k| session.can_undo(**k))
        .map(|k| k.to_string())
        .collect();
    if !undo.is_empty() {
        println!("(undo available: {})", undo.join(", "));
    }
}

fn print_patterns(session: &Session) {
    if session.patterns().is_empty() {
        println!("No filename patterns found");
        return;
    }
    println!("Detected patterns:");
    for (i, pattern) in session.patterns().iter().enumerate() {
        let selected = session.selected_pattern() == Some(pattern);
        println!("  [{}]{} {}", i, if selected { "*" } else { "" }, pattern);
    }
}

fn print_report(report: &BatchReport) {
    for outcome in report.failures() {
        println!("FAILED {}: {}", outcome.original_name, outcome.message);
    }
    println!(
        "Renamed: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
}
