/// Domain aggregates
use super::base::{AggregateRoot, DomainError, DomainResult, Entity};
use super::entities::Page;
use super::events::PageEvent;
use super::value_objects::{FileId, PageId, PageNumber};

/// The ordered pages of one file plus the active-page cursor.
///
/// Pages keep the order they were loaded in (page number ascending); later
/// additions are appended and deletions filter, nothing is re-sorted.
/// `current_index` always points inside `pages` when `pages` is non-empty.
/// An empty collection is a transient state that the controller resolves
/// before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCollection {
    file_id: FileId,
    pages: Vec<Page>,
    current_index: usize,
}

impl PageCollection {
    /// Create an empty collection for a file
    pub fn new(file_id: FileId) -> Self {
        PageCollection {
            file_id,
            pages: Vec::new(),
            current_index: 0,
        }
    }

    /// Adopt a freshly fetched page list; the cursor starts at the first page
    pub fn from_pages(file_id: FileId, pages: Vec<Page>) -> DomainResult<Self> {
        let mut collection = PageCollection::new(file_id);
        for page in pages {
            collection.push(page)?;
        }
        Ok(collection)
    }

    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Index of the active page. Meaningless while the collection is empty.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_index)
    }

    pub fn get(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub fn position(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    pub fn has_previous(&self) -> bool {
        !self.pages.is_empty() && self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        !self.pages.is_empty() && self.current_index + 1 < self.pages.len()
    }

    /// Number for the next page: one past the largest existing number, or 1
    pub fn next_page_number(&self) -> DomainResult<PageNumber> {
        match self.pages.iter().map(|p| p.page_number()).max() {
            Some(max) => max.next(),
            None => Ok(PageNumber::first()),
        }
    }

    /// Move the cursor. Out-of-range indices are ignored.
    ///
    /// Returns whether the cursor actually moved.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.pages.len() || index == self.current_index {
            return false;
        }
        self.current_index = index;
        true
    }

    fn push(&mut self, page: Page) -> DomainResult<()> {
        if page.file_id() != &self.file_id {
            return Err(DomainError::InvalidOperation(format!(
                "Page {} belongs to file {}, not {}",
                page.id(),
                page.file_id(),
                self.file_id
            )));
        }
        if self.get(page.id()).is_some() {
            return Err(DomainError::BusinessRuleViolation(format!(
                "Page {} is already part of file {}",
                page.id(),
                self.file_id
            )));
        }
        self.pages.push(page);
        Ok(())
    }

    fn remove(&mut self, id: &PageId) -> DomainResult<Page> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::NotFound(format!("Page {} not found", id)))?;
        let removed = self.pages.remove(index);

        if self.pages.is_empty() {
            self.current_index = 0;
        } else if self.current_index >= self.pages.len() {
            self.current_index = self.pages.len() - 1;
        }

        Ok(removed)
    }
}

impl AggregateRoot for PageCollection {
    type Event = PageEvent;

    fn apply_event(&mut self, event: &PageEvent) -> DomainResult<()> {
        match event {
            PageEvent::Created(created) => self.push(created.page.clone()),
            PageEvent::Renamed(renamed) => {
                let page = self
                    .pages
                    .iter_mut()
                    .find(|p| p.id() == &renamed.page_id)
                    .ok_or_else(|| {
                        DomainError::NotFound(format!("Page {} not found", renamed.page_id))
                    })?;
                page.rename(renamed.name.clone());
                Ok(())
            }
            PageEvent::Deleted(deleted) => self.remove(&deleted.page_id).map(|_| ()),
        }
    }
}
