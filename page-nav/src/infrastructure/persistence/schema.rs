use rusqlite::{Connection, Result};

/// Initialize the SQLite database with the required schema.
/// This function is idempotent and can be safely called multiple times.
pub fn initialize_database(conn: &Connection) -> Result<()> {
    // Enable foreign key constraints; element cleanup on page delete relies on them
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Create pages table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pages (
            id TEXT PRIMARY KEY,
            file_id TEXT NOT NULL,
            name TEXT NOT NULL,
            page_number INTEGER NOT NULL CHECK (page_number > 0),
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // One page per number within a file
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_pages_file_number ON pages(file_id, page_number)",
        [],
    )?;

    // Diagram elements live on a page and go away with it
    conn.execute(
        "CREATE TABLE IF NOT EXISTS diagram_elements (
            id TEXT PRIMARY KEY,
            page_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (page_id) REFERENCES pages(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_elements_page ON diagram_elements(page_id)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_tables(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_database() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_database(&conn).unwrap();

        assert_eq!(user_tables(&conn), vec!["diagram_elements", "pages"]);

        // Verify foreign keys are enabled
        let foreign_keys: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_initialize_database_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        assert_eq!(user_tables(&conn).len(), 2);
    }

    #[test]
    fn test_page_number_unique_per_file() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_database(&conn).unwrap();

        let insert = "INSERT INTO pages (id, file_id, name, page_number, created_at)
                      VALUES (?1, ?2, 'Page 1', 1, datetime('now'))";
        conn.execute(insert, ["a", "file-1"]).unwrap();
        conn.execute(insert, ["b", "file-2"]).unwrap();
        assert!(conn.execute(insert, ["c", "file-1"]).is_err());
    }
}
