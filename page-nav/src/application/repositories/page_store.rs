use crate::domain::{
    entities::Page,
    value_objects::{FileId, PageId, PageName, PageNumber},
    DomainResult,
};

/// A page the store has not created yet.
///
/// The store assigns `id` and `created_at`; `page_number` is what the
/// caller asks for, a store may hand out a different number if that one
/// is already taken in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub file_id: FileId,
    pub name: PageName,
    pub page_number: PageNumber,
}

impl NewPage {
    /// A page named "Page {n}" for the given number
    pub fn numbered(file_id: FileId, page_number: PageNumber) -> Self {
        NewPage {
            file_id,
            name: PageName::default_for(page_number),
            page_number,
        }
    }
}

/// Contract of the persisted store backing pages.
///
/// Implementations can be backed by different storage mechanisms
/// (in-memory, SQLite, a remote service). Deleting a page must also remove
/// everything the store keeps under that page.
pub trait PageStore {
    /// Returns every page of the file ordered by page number ascending.
    fn list_pages(&self, file_id: &FileId) -> DomainResult<Vec<Page>>;

    /// Creates a page and returns the stored record.
    fn create_page(&mut self, page: NewPage) -> DomainResult<Page>;

    /// Changes the name of an existing page.
    fn rename_page(&mut self, id: &PageId, name: &PageName) -> DomainResult<()>;

    /// Deletes a page together with its dependent records.
    fn delete_page(&mut self, id: &PageId) -> DomainResult<()>;
}
