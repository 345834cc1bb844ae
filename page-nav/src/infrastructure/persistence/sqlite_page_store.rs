use crate::application::repositories::{NewPage, PageStore};
use crate::domain::base::DomainError;
use crate::domain::entities::Page;
use crate::domain::value_objects::{FileId, PageId, PageName, PageNumber};
use crate::domain::DomainResult;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use tracing::{debug, warn};
use uuid::Uuid;

/// SQLite-based implementation of the PageStore trait
pub struct SqlitePageStore {
    conn: Connection,
}

impl SqlitePageStore {
    /// Create a new SQLite store with the given connection
    pub fn new(conn: Connection) -> SqliteResult<Self> {
        super::schema::initialize_database(&conn)?;
        Ok(SqlitePageStore { conn })
    }

    /// Create a new in-memory SQLite store (useful for testing)
    pub fn new_in_memory() -> SqliteResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Create a new file-based SQLite store
    pub fn new_with_path(path: impl AsRef<std::path::Path>) -> SqliteResult<Self> {
        Self::new(Connection::open(path)?)
    }

    /// Attach a diagram element to a page, returning the element id
    pub fn add_diagram_element(&mut self, page_id: &PageId, kind: &str) -> DomainResult<String> {
        let id = Uuid::new_v4().to_string();
        self.conn
            .execute(
                "INSERT INTO diagram_elements (id, page_id, kind, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, page_id.as_str(), kind, Utc::now()],
            )
            .map_err(db_error)?;
        Ok(id)
    }

    /// Number of diagram elements stored for a page
    pub fn count_diagram_elements(&self, page_id: &PageId) -> DomainResult<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM diagram_elements WHERE page_id = ?1",
                params![page_id.as_str()],
                |row| row.get(0),
            )
            .map_err(db_error)?;
        usize::try_from(count).map_err(|e| {
            db_error(rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(e)))
        })
    }

    /// Insert a page in a single transaction, moving it past the current
    /// maximum if its number is already taken in the file. A default name
    /// follows the reassigned number; a custom name is kept.
    fn insert_page_transaction(&mut self, page: NewPage) -> SqliteResult<Page> {
        let tx = self.conn.transaction()?;

        let taken: Option<String> = tx
            .query_row(
                "SELECT id FROM pages WHERE file_id = ?1 AND page_number = ?2",
                params![page.file_id.as_str(), page.page_number.value()],
                |row| row.get(0),
            )
            .optional()?;

        let page_number = if taken.is_some() {
            let next: u32 = tx.query_row(
                "SELECT COALESCE(MAX(page_number), 0) + 1 FROM pages WHERE file_id = ?1",
                params![page.file_id.as_str()],
                |row| row.get(0),
            )?;
            warn!(
                "Page number {} already used in file {}, assigning {}",
                page.page_number, page.file_id, next
            );
            PageNumber::new(next).map_err(|e| conversion_error(0, e))?
        } else {
            page.page_number
        };

        let name = if page_number != page.page_number
            && page.name == PageName::default_for(page.page_number)
        {
            PageName::default_for(page_number)
        } else {
            page.name
        };

        let id = PageId::new(Uuid::new_v4().to_string()).map_err(|e| conversion_error(0, e))?;
        let created_at = Utc::now();

        tx.execute(
            "INSERT INTO pages (id, file_id, name, page_number, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.as_str(),
                page.file_id.as_str(),
                name.as_str(),
                page_number.value(),
                created_at,
            ],
        )?;

        tx.commit()?;

        Ok(Page::new(id, page.file_id, name, page_number, created_at))
    }
}

impl PageStore for SqlitePageStore {
    fn list_pages(&self, file_id: &FileId) -> DomainResult<Vec<Page>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, file_id, name, page_number, created_at
                 FROM pages
                 WHERE file_id = ?1
                 ORDER BY page_number ASC",
            )
            .map_err(db_error)?;

        let pages = stmt
            .query_map(params![file_id.as_str()], row_to_page)
            .map_err(db_error)?
            .collect::<SqliteResult<Vec<_>>>()
            .map_err(db_error)?;

        debug!("Listed {} page(s) for file {}", pages.len(), file_id);
        Ok(pages)
    }

    fn create_page(&mut self, page: NewPage) -> DomainResult<Page> {
        self.insert_page_transaction(page).map_err(db_error)
    }

    fn rename_page(&mut self, id: &PageId, name: &PageName) -> DomainResult<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE pages SET name = ?2 WHERE id = ?1",
                params![id.as_str(), name.as_str()],
            )
            .map_err(db_error)?;

        if rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Page {} not found", id)));
        }
        Ok(())
    }

    fn delete_page(&mut self, id: &PageId) -> DomainResult<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM pages WHERE id = ?1", params![id.as_str()])
            .map_err(db_error)?;

        if rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Page {} not found", id)));
        }
        Ok(())
    }
}

fn row_to_page(row: &Row<'_>) -> SqliteResult<Page> {
    let id: String = row.get(0)?;
    let file_id: String = row.get(1)?;
    let name: String = row.get(2)?;
    let page_number: u32 = row.get(3)?;
    let created_at: DateTime<Utc> = row.get(4)?;

    Ok(Page::new(
        PageId::new(id).map_err(|e| conversion_error(0, e))?,
        FileId::new(file_id).map_err(|e| conversion_error(1, e))?,
        PageName::new(name).map_err(|e| conversion_error(2, e))?,
        PageNumber::new(page_number).map_err(|e| conversion_error(3, e))?,
        created_at,
    ))
}

fn conversion_error(column: usize, e: DomainError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
}

fn db_error(e: rusqlite::Error) -> DomainError {
    DomainError::InvalidOperation(format!("Database error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::base::Entity;

    fn file() -> FileId {
        FileId::new("file-1").unwrap()
    }

    fn numbered(n: u32) -> NewPage {
        NewPage::numbered(file(), PageNumber::new(n).unwrap())
    }

    #[test]
    fn test_create_and_list_pages() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();

        let created = store.create_page(numbered(1)).unwrap();
        assert_eq!(created.name().as_str(), "Page 1");
        assert!(Uuid::parse_str(created.id().as_str()).is_ok());

        let pages = store.list_pages(&file()).unwrap();
        assert_eq!(pages, vec![created]);
    }

    #[test]
    fn test_list_orders_by_page_number() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        store.create_page(numbered(3)).unwrap();
        store.create_page(numbered(1)).unwrap();
        store.create_page(numbered(2)).unwrap();

        let numbers: Vec<u32> = store
            .list_pages(&file())
            .unwrap()
            .iter()
            .map(|p| p.page_number().value())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_is_scoped_to_file() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        store.create_page(numbered(1)).unwrap();
        store
            .create_page(NewPage::numbered(FileId::new("file-2").unwrap(), PageNumber::first()))
            .unwrap();

        assert_eq!(store.list_pages(&file()).unwrap().len(), 1);
        assert!(store
            .list_pages(&FileId::new("file-3").unwrap())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_colliding_number_moves_past_maximum() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        store.create_page(numbered(1)).unwrap();
        store.create_page(numbered(4)).unwrap();

        let created = store.create_page(numbered(1)).unwrap();
        assert_eq!(created.page_number().value(), 5);
        assert_eq!(created.name().as_str(), "Page 5");

        let stored = store.list_pages(&file()).unwrap();
        assert_eq!(stored.last().unwrap().name().as_str(), "Page 5");
    }

    #[test]
    fn test_colliding_number_keeps_custom_name() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        store.create_page(numbered(1)).unwrap();

        let request = NewPage {
            file_id: file(),
            name: PageName::new("Piping").unwrap(),
            page_number: PageNumber::first(),
        };
        let created = store.create_page(request).unwrap();

        assert_eq!(created.page_number().value(), 2);
        assert_eq!(created.name().as_str(), "Piping");
    }

    #[test]
    fn test_count_diagram_elements_on_empty_page() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        let page = store.create_page(numbered(1)).unwrap();
        assert_eq!(store.count_diagram_elements(page.id()).unwrap(), 0);
    }

    #[test]
    fn test_rename_page() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        let page = store.create_page(numbered(1)).unwrap();

        store
            .rename_page(page.id(), &PageName::new("Piping").unwrap())
            .unwrap();

        let pages = store.list_pages(&file()).unwrap();
        assert_eq!(pages[0].name().as_str(), "Piping");
        assert_eq!(pages[0].created_at(), page.created_at());
    }

    #[test]
    fn test_rename_and_delete_unknown_page() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        let id = PageId::new("nonexistent").unwrap();

        assert!(matches!(
            store.rename_page(&id, &PageName::new("x").unwrap()),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(store.delete_page(&id), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_delete_cascades_to_diagram_elements() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        let doomed = store.create_page(numbered(1)).unwrap();
        let kept = store.create_page(numbered(2)).unwrap();

        store.add_diagram_element(doomed.id(), "valve").unwrap();
        store.add_diagram_element(doomed.id(), "pipe").unwrap();
        store.add_diagram_element(kept.id(), "pump").unwrap();
        assert_eq!(store.count_diagram_elements(doomed.id()).unwrap(), 2);

        store.delete_page(doomed.id()).unwrap();

        assert_eq!(store.count_diagram_elements(doomed.id()).unwrap(), 0);
        assert_eq!(store.count_diagram_elements(kept.id()).unwrap(), 1);
    }

    #[test]
    fn test_element_requires_existing_page() {
        let mut store = SqlitePageStore::new_in_memory().unwrap();
        let result = store.add_diagram_element(&PageId::new("ghost").unwrap(), "valve");
        assert!(result.is_err());
    }
}
