/// Controller owning one file's pages and the active-page cursor
use crate::application::repositories::{NewPage, PageStore};
use crate::domain::base::{AggregateRoot, DomainError, DomainResult, Entity};
use crate::domain::entities::Page;
use crate::domain::events::{PageCreated, PageDeleted, PageEvent, PageRenamed};
use crate::domain::value_objects::{FileId, PageId, PageName, PageNumber};
use crate::domain::PageCollection;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum PageNavError {
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Pages have not been loaded yet")]
    NotBootstrapped,

    #[error("Local state rejected a remote change: {0}")]
    Domain(#[from] DomainError),
}

pub type PageNavResult<T> = Result<T, PageNavError>;

/// What a rename request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// Blank or identical name; nothing was sent to the store
    Unchanged,
}

/// What a delete request ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The last page was deleted and a fresh "Page 1" took its place
    Recreated(Page),
}

/// Single source of truth for the pages of one file.
///
/// Local state only changes after the store has acknowledged a write, so it
/// always mirrors the last known remote state. Store calls run on the
/// blocking pool: dropping an operation's future does not cancel a write
/// that is already in flight, its result is simply never applied.
///
/// The controller does not queue or coalesce calls; taking `&mut self`
/// leaves at most one outstanding operation per controller.
pub struct PageCollectionController<S: PageStore> {
    store: Arc<Mutex<S>>,
    collection: Option<PageCollection>,
}

impl<S: PageStore + Send + 'static> PageCollectionController<S> {
    /// Create a controller that owns its store
    pub fn new(store: S) -> Self {
        Self::with_shared_store(Arc::new(Mutex::new(store)))
    }

    /// Create a controller over a store shared with other controllers.
    ///
    /// Controllers never see each other's changes until they bootstrap again.
    pub fn with_shared_store(store: Arc<Mutex<S>>) -> Self {
        PageCollectionController {
            store,
            collection: None,
        }
    }

    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.collection.is_some()
    }

    pub fn collection(&self) -> Option<&PageCollection> {
        self.collection.as_ref()
    }

    pub fn file_id(&self) -> Option<&FileId> {
        self.collection.as_ref().map(|c| c.file_id())
    }

    pub fn pages(&self) -> &[Page] {
        self.collection.as_ref().map(|c| c.pages()).unwrap_or(&[])
    }

    pub fn current_index(&self) -> usize {
        self.collection.as_ref().map(|c| c.current_index()).unwrap_or(0)
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.collection.as_ref().and_then(|c| c.current_page())
    }

    /// Drop all local state, e.g. when the owning view goes away
    pub fn reset(&mut self) {
        self.collection = None;
    }

    /// Load the pages of `file_id`, creating "Page 1" if the file has none.
    ///
    /// A failed fetch is reported as `RemoteUnavailable` and no page is
    /// created. Any previously loaded state is discarded first.
    pub async fn bootstrap(&mut self, file_id: FileId) -> PageNavResult<()> {
        self.collection = None;
        info!("Loading pages for file {}", file_id);

        let list_for = file_id.clone();
        let pages = self
            .call(move |store| store.list_pages(&list_for))
            .await
            .map_err(|e| PageNavError::RemoteUnavailable(e.to_string()))?;

        let mut collection = PageCollection::from_pages(file_id.clone(), pages)?;

        if collection.is_empty() {
            info!("File {} has no pages, creating the first one", file_id);
            let page = self.create(NewPage::numbered(file_id, PageNumber::first())).await?;
            collection.apply_event(&PageEvent::from(PageCreated { page }))?;
        }

        debug!(
            "Loaded {} page(s) for file {}",
            collection.len(),
            collection.file_id()
        );
        self.collection = Some(collection);
        Ok(())
    }

    /// Append a new page numbered one past the current maximum.
    ///
    /// The cursor does not move.
    pub async fn add_page(&mut self) -> PageNavResult<Page> {
        let collection = self.loaded()?;
        let number = collection
            .next_page_number()
            .map_err(|e| PageNavError::WriteFailed(e.to_string()))?;
        let request = NewPage::numbered(collection.file_id().clone(), number);

        let page = self.create(request).await?;
        info!(
            "Added page {} ({}) to file {}",
            page.id(),
            page.name(),
            page.file_id()
        );

        self.loaded_mut()?
            .apply_event(&PageEvent::from(PageCreated { page: page.clone() }))?;
        Ok(page)
    }

    /// Move the cursor. Out-of-range and unchanged indices are ignored.
    pub fn select_page(&mut self, index: usize) -> bool {
        let Some(collection) = self.collection.as_mut() else {
            return false;
        };

        let moved = collection.select(index);
        if moved {
            debug!("Current page is now index {}", index);
        }
        moved
    }

    /// Rename a page, skipping the store when the trimmed name is blank or
    /// equal to the current one.
    pub async fn rename_page(&mut self, id: &PageId, new_name: &str) -> PageNavResult<RenameOutcome> {
        let collection = self.loaded()?;
        let page = collection
            .get(id)
            .ok_or_else(|| PageNavError::PageNotFound(id.clone()))?;

        let name = match PageName::new(new_name) {
            Ok(name) if &name != page.name() => name,
            _ => {
                debug!("Ignoring rename of page {} to {:?}", id, new_name);
                return Ok(RenameOutcome::Unchanged);
            }
        };
        let file_id = collection.file_id().clone();

        let page_id = id.clone();
        let request_name = name.clone();
        self.call(move |store| store.rename_page(&page_id, &request_name))
            .await
            .map_err(|e| PageNavError::WriteFailed(e.to_string()))?;

        info!("Renamed page {} to {}", id, name);
        self.loaded_mut()?.apply_event(&PageEvent::from(PageRenamed {
            file_id,
            page_id: id.clone(),
            name,
        }))?;
        Ok(RenameOutcome::Renamed)
    }

    /// Delete a page. Deleting the last page of the file immediately
    /// creates a new "Page 1".
    pub async fn delete_page(&mut self, id: &PageId) -> PageNavResult<DeleteOutcome> {
        let collection = self.loaded()?;
        if collection.get(id).is_none() {
            return Err(PageNavError::PageNotFound(id.clone()));
        }
        let file_id = collection.file_id().clone();

        let page_id = id.clone();
        self.call(move |store| store.delete_page(&page_id))
            .await
            .map_err(|e| PageNavError::WriteFailed(e.to_string()))?;

        info!("Deleted page {} from file {}", id, file_id);
        let collection = self.loaded_mut()?;
        collection.apply_event(&PageEvent::from(PageDeleted {
            file_id: file_id.clone(),
            page_id: id.clone(),
        }))?;

        if !collection.is_empty() {
            return Ok(DeleteOutcome::Deleted);
        }

        info!("File {} has no pages left, creating a new first page", file_id);
        let page = self.create(NewPage::numbered(file_id, PageNumber::first())).await?;
        self.loaded_mut()?
            .apply_event(&PageEvent::from(PageCreated { page: page.clone() }))?;
        Ok(DeleteOutcome::Recreated(page))
    }

    async fn create(&self, request: NewPage) -> PageNavResult<Page> {
        self.call(move |store| store.create_page(request))
            .await
            .map_err(|e| PageNavError::WriteFailed(e.to_string()))
    }

    /// Run one store request on the blocking pool
    async fn call<T, F>(&self, op: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut S) -> DomainResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let mut guard = store.blocking_lock();
            op(&mut *guard)
        })
        .await
        .map_err(|e| DomainError::InvalidOperation(format!("Store task failed: {}", e)))?
    }

    fn loaded(&self) -> PageNavResult<&PageCollection> {
        self.collection.as_ref().ok_or(PageNavError::NotBootstrapped)
    }

    fn loaded_mut(&mut self) -> PageNavResult<&mut PageCollection> {
        self.collection.as_mut().ok_or(PageNavError::NotBootstrapped)
    }
}
