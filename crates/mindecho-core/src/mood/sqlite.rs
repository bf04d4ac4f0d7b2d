use super::{schema, MoodEntry, MoodLabel, MoodRepository};
use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use std::path::Path;

/// Mood log persisted in a single SQLite table.
pub struct SqliteMoodStore {
    conn: Mutex<Connection>,
}

impl SqliteMoodStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> CoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        info!("[mood] Opening mood store at {:?}", path);
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> CoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> CoreResult<Self> {
        schema::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, mood, intensity, note, timestamp FROM mood_entries";

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Rows are decoded into raw parts first so label and timestamp parsing can
/// report through `CoreError` instead of `rusqlite::Error`.
type RawRow = (String, String, u8, String, String);

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn decode((id, mood, intensity, note, timestamp): RawRow) -> CoreResult<MoodEntry> {
    let mood: MoodLabel = mood.parse()?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| CoreError::Other(format!("bad timestamp {timestamp:?}: {e}")))?
        .with_timezone(&Utc);
    Ok(MoodEntry {
        id,
        mood,
        intensity,
        note,
        timestamp,
    })
}

impl SqliteMoodStore {
    fn query(&self, sql: &str, args: impl rusqlite::Params) -> CoreResult<Vec<MoodEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(args, raw_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(decode(row?)?);
        }
        Ok(entries)
    }
}

impl MoodRepository for SqliteMoodStore {
    fn append(&self, entry: MoodEntry) -> CoreResult<MoodEntry> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO mood_entries (id, mood, intensity, note, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.id,
                entry.mood.as_str(),
                entry.intensity,
                entry.note,
                encode_timestamp(&entry.timestamp)
            ],
        )?;
        Ok(entry)
    }

    fn list_recent(&self, n: usize) -> CoreResult<Vec<MoodEntry>> {
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let mut entries = self.query(
            &format!("{SELECT_COLUMNS} ORDER BY seq DESC LIMIT ?1"),
            params![limit],
        )?;
        entries.reverse();
        Ok(entries)
    }

    fn list_since(&self, since: DateTime<Utc>) -> CoreResult<Vec<MoodEntry>> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE timestamp >= ?1 ORDER BY seq ASC"),
            params![encode_timestamp(&since)],
        )
    }

    fn list_all(&self) -> CoreResult<Vec<MoodEntry>> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY seq ASC"), [])
    }

    fn count(&self) -> CoreResult<usize> {
        let conn = self.conn.lock();
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM mood_entries", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
