// Mood store schema and migrations.
// Called once by SqliteMoodStore::open() / open_in_memory().
// Adding a column: append an idempotent ALTER TABLE … ADD COLUMN at the end
// of run_migrations() and ignore its error; never edit existing SQL.

use crate::error::CoreResult;
use log::info;
use rusqlite::Connection;

pub(crate) fn run_migrations(conn: &Connection) -> CoreResult<()> {
    // `seq` preserves insertion order; `timestamp` is fixed-width RFC 3339
    // UTC so string comparison matches time order.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS mood_entries (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            mood TEXT NOT NULL,
            intensity INTEGER NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mood_entries_timestamp
            ON mood_entries(timestamp);
        ",
    )?;

    info!("[mood] Schema ready");
    Ok(())
}
