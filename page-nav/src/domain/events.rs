/// Domain events
use super::base::DomainEvent;
use super::entities::Page;
use super::value_objects::{FileId, PageId, PageName};

/// Event emitted when the store has created a page
#[derive(Debug, Clone)]
pub struct PageCreated {
    pub page: Page,
}

impl DomainEvent for PageCreated {
    fn event_type(&self) -> &'static str {
        "PageCreated"
    }

    fn aggregate_id(&self) -> String {
        self.page.file_id().as_str().to_string()
    }
}

/// Event emitted when the store has renamed a page
#[derive(Debug, Clone)]
pub struct PageRenamed {
    pub file_id: FileId,
    pub page_id: PageId,
    pub name: PageName,
}

impl DomainEvent for PageRenamed {
    fn event_type(&self) -> &'static str {
        "PageRenamed"
    }

    fn aggregate_id(&self) -> String {
        self.file_id.as_str().to_string()
    }
}

/// Event emitted when the store has deleted a page
#[derive(Debug, Clone)]
pub struct PageDeleted {
    pub file_id: FileId,
    pub page_id: PageId,
}

impl DomainEvent for PageDeleted {
    fn event_type(&self) -> &'static str {
        "PageDeleted"
    }

    fn aggregate_id(&self) -> String {
        self.file_id.as_str().to_string()
    }
}

/// Acknowledged remote changes, applied to a `PageCollection` after the fact
#[derive(Debug, Clone)]
pub enum PageEvent {
    Created(PageCreated),
    Renamed(PageRenamed),
    Deleted(PageDeleted),
}

impl DomainEvent for PageEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PageEvent::Created(e) => e.event_type(),
            PageEvent::Renamed(e) => e.event_type(),
            PageEvent::Deleted(e) => e.event_type(),
        }
    }

    fn aggregate_id(&self) -> String {
        match self {
            PageEvent::Created(e) => e.aggregate_id(),
            PageEvent::Renamed(e) => e.aggregate_id(),
            PageEvent::Deleted(e) => e.aggregate_id(),
        }
    }
}

impl From<PageCreated> for PageEvent {
    fn from(event: PageCreated) -> Self {
        PageEvent::Created(event)
    }
}

impl From<PageRenamed> for PageEvent {
    fn from(event: PageRenamed) -> Self {
        PageEvent::Renamed(event)
    }
}

impl From<PageDeleted> for PageEvent {
    fn from(event: PageDeleted) -> Self {
        PageEvent::Deleted(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PageNumber;
    use chrono::Utc;

    #[test]
    fn test_page_created_event() {
        let page = Page::new(
            PageId::new("page-1").unwrap(),
            FileId::new("file-1").unwrap(),
            PageName::new("Page 1").unwrap(),
            PageNumber::first(),
            Utc::now(),
        );
        let event = PageEvent::from(PageCreated { page });

        assert_eq!(event.event_type(), "PageCreated");
        assert_eq!(event.aggregate_id(), "file-1");
    }

    #[test]
    fn test_page_renamed_event() {
        let event = PageEvent::from(PageRenamed {
            file_id: FileId::new("file-1").unwrap(),
            page_id: PageId::new("page-1").unwrap(),
            name: PageName::new("Renamed").unwrap(),
        });

        assert_eq!(event.event_type(), "PageRenamed");
        assert_eq!(event.aggregate_id(), "file-1");
    }

    #[test]
    fn test_page_deleted_event() {
        let event = PageEvent::from(PageDeleted {
            file_id: FileId::new("file-1").unwrap(),
            page_id: PageId::new("page-1").unwrap(),
        });

        assert_eq!(event.event_type(), "PageDeleted");
        assert_eq!(event.aggregate_id(), "file-1");
    }
}
