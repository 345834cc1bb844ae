/// Domain entities
use super::base::Entity;
use super::value_objects::{FileId, PageId, PageName, PageNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Page is one addressable sheet of a diagram file.
///
/// `id`, `file_id`, `page_number` and `created_at` are fixed once the store
/// has created the record; only the name changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    id: PageId,
    file_id: FileId,
    name: PageName,
    page_number: PageNumber,
    created_at: DateTime<Utc>,
}

impl Page {
    /// Rebuild a page from a stored record
    pub fn new(
        id: PageId,
        file_id: FileId,
        name: PageName,
        page_number: PageNumber,
        created_at: DateTime<Utc>,
    ) -> Self {
        Page {
            id,
            file_id,
            name,
            page_number,
            created_at,
        }
    }

    /// Get the owning file
    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }

    /// Get the page name
    pub fn name(&self) -> &PageName {
        &self.name
    }

    /// Get the page number
    pub fn page_number(&self) -> PageNumber {
        self.page_number
    }

    /// Get the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Label shown on the thumbnail placeholder
    pub fn label(&self) -> String {
        format!("Page {}", self.page_number)
    }

    /// Replace the page name in place
    pub fn rename(&mut self, name: PageName) {
        self.name = name;
    }
}

impl Entity for Page {
    type Id = PageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
