// Settings persistence using SQLite

use crate::limits::{MAX_TEMPLATE_LENGTH, PADDING_WIDTHS};
use crate::types::{AddPosition, RemovePosition};
use rusqlite::{Connection, Result as SqlResult};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub padding_width: usize,
    pub custom_template: String,
    pub remove_position: RemovePosition,
    pub add_position: AddPosition,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            padding_width: 2,
            custom_template: String::from("{number}"),
            remove_position: RemovePosition::All,
            add_position: AddPosition::Front,
        }
    }
}

impl Settings {
    // Clamps values to what the engine accepts
    pub fn sanitize(&mut self) {
        if !PADDING_WIDTHS.contains(&self.padding_width) {
            self.padding_width = Settings::default().padding_width;
        }
        if self.custom_template.chars().count() > MAX_TEMPLATE_LENGTH {
            self.custom_template = self
                .custom_template
                .chars()
                .take(MAX_TEMPLATE_LENGTH)
                .collect();
        }
    }
}

// Returns path to settings database
fn get_db_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("smart-rename").join("settings.db"))
}

// Initializes database and creates tables if needed
fn init_db(conn: &Connection) -> SqlResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn open_db() -> Option<Connection> {
    let db_path = get_db_path()?;
    if let Some(parent) = db_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let conn = Connection::open(&db_path).ok()?;
    init_db(&conn).ok()?;
    Some(conn)
}

/// Loads saved settings, falling back to defaults on any failure.
pub fn load_settings() -> Settings {
    match open_db() {
        Some(conn) => load_from(&conn),
        None => Settings::default(),
    }
}

// Saves settings; failures are logged and otherwise ignored
pub fn save_settings(settings: &Settings) {
    let Some(conn) = open_db() else {
        tracing::warn!("Settings database unavailable, not saving");
        return;
    };
    if let Err(e) = save_to(&conn, settings) {
        tracing::warn!(error = %e, "Failed to save settings");
    }
}

// Reads every known key; missing or malformed values keep their defaults
pub fn load_from(conn: &Connection) -> Settings {
    let mut settings = Settings::default();
    if init_db(conn).is_err() {
        return settings;
    }

    if let Ok(val) = get_setting(conn, "padding_width") {
        settings.padding_width = val.parse().unwrap_or(settings.padding_width);
    }
    if let Ok(val) = get_setting(conn, "custom_template") {
        settings.custom_template = val;
    }
    if let Ok(val) = get_setting(conn, "remove_position") {
        settings.remove_position = val.parse().unwrap_or_default();
    }
    if let Ok(val) = get_setting(conn, "add_position") {
        settings.add_position = val.parse().unwrap_or_default();
    }

    settings.sanitize();
    settings
}

pub fn save_to(conn: &Connection, settings: &Settings) -> SqlResult<()> {
    init_db(conn)?;
    let mut settings = settings.clone();
    settings.sanitize();

    set_setting(conn, "padding_width", &settings.padding_width.to_string())?;
    set_setting(conn, "custom_template", &settings.custom_template)?;
    set_setting(conn, "remove_position", &settings.remove_position.to_string())?;
    set_setting(conn, "add_position", &settings.add_position.to_string())?;
    Ok(())
}

fn get_setting(conn: &Connection, key: &str) -> SqlResult<String> {
    conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
        row.get(0)
    })
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> SqlResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        [key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_gives_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(load_from(&conn), Settings::default());
    }

    #[test]
    fn saved_values_round_trip() {
        let conn = Connection::open_in_memory().unwrap();
        let settings = Settings {
            padding_width: 3,
            custom_template: "Title {number:03d}.zip".to_string(),
            remove_position: RemovePosition::Back,
            add_position: AddPosition::Back,
        };
        save_to(&conn, &settings).unwrap();
        assert_eq!(load_from(&conn), settings);
    }

    #[test]
    fn malformed_values_are_sanitized() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        set_setting(&conn, "padding_width", "9").unwrap();
        set_setting(&conn, "remove_position", "sideways").unwrap();
        set_setting(&conn, "custom_template", &"x".repeat(MAX_TEMPLATE_LENGTH + 5)).unwrap();

        let settings = load_from(&conn);
        assert_eq!(settings.padding_width, 2);
        assert_eq!(settings.remove_position, RemovePosition::All);
        assert_eq!(settings.custom_template.len(), MAX_TEMPLATE_LENGTH);
    }
}
