/// Page list: navigation over a controller plus the settings sub-view
use crate::application::dto::{NavControls, PageThumbnail, PageSummary, RenderedView};
use crate::application::repositories::PageStore;
use crate::application::services::{DeleteOutcome, PageCollectionController, RenameOutcome};
use crate::application::views::page_settings::{PageSettingsView, SettingsIntent};
use crate::domain::base::Entity;
use crate::domain::value_objects::{FileId, PageId};
use tracing::{debug, error, warn};

/// What the page list is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Loading,
    /// The initial fetch failed. Only `remount` leaves this state.
    LoadFailed(String),
    List,
    Settings(PageSettingsView),
}

/// Presentation state over a `PageCollectionController`.
///
/// Every controller failure is logged here and turned into "nothing
/// changed"; the action methods return whether state changed.
pub struct PageListView<S: PageStore> {
    controller: PageCollectionController<S>,
    file_id: Option<FileId>,
    mode: ViewMode,
}

impl<S: PageStore + Send + 'static> PageListView<S> {
    pub fn new(controller: PageCollectionController<S>) -> Self {
        PageListView {
            controller,
            file_id: None,
            mode: ViewMode::Loading,
        }
    }

    pub fn controller(&self) -> &PageCollectionController<S> {
        &self.controller
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn file_id(&self) -> Option<&FileId> {
        self.file_id.as_ref()
    }

    /// Why the last load failed, while the view is in `LoadFailed`
    pub fn load_error(&self) -> Option<&str> {
        match &self.mode {
            ViewMode::LoadFailed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Load the pages of `file_id`. Mounting the file that is already shown
    /// does nothing.
    pub async fn mount(&mut self, file_id: FileId) -> bool {
        if self.file_id.as_ref() == Some(&file_id) && self.controller.is_bootstrapped() {
            return false;
        }
        self.file_id = Some(file_id);
        self.remount().await
    }

    /// Discard local state and bootstrap the current file again
    pub async fn remount(&mut self) -> bool {
        let Some(file_id) = self.file_id.clone() else {
            warn!("Page list remounted without a file");
            return false;
        };

        self.mode = ViewMode::Loading;
        match self.controller.bootstrap(file_id.clone()).await {
            Ok(()) => {
                self.mode = ViewMode::List;
                true
            }
            Err(e) => {
                error!("Error fetching pages for file {}: {}", file_id, e);
                self.mode = ViewMode::LoadFailed(e.to_string());
                false
            }
        }
    }

    /// Release local state; writes still in flight are not applied
    pub fn unmount(&mut self) {
        self.controller.reset();
        self.file_id = None;
        self.mode = ViewMode::Loading;
    }

    pub fn controls(&self) -> NavControls {
        let collection = self.controller.collection();
        NavControls {
            previous_enabled: collection.map(|c| c.has_previous()).unwrap_or(false),
            next_enabled: collection.map(|c| c.has_next()).unwrap_or(false),
            add_enabled: collection.is_some(),
            settings_enabled: collection.map(|c| !c.is_empty()).unwrap_or(false),
        }
    }

    pub fn thumbnails(&self) -> Vec<PageThumbnail> {
        let current = self.controller.current_index();
        self.controller
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| PageThumbnail {
                index,
                label: page.label(),
                page: PageSummary::from(page),
                is_active: index == current,
            })
            .collect()
    }

    pub fn render(&self) -> RenderedView {
        match &self.mode {
            ViewMode::Loading => RenderedView::Loading,
            ViewMode::LoadFailed(reason) => RenderedView::LoadFailed {
                reason: reason.clone(),
            },
            ViewMode::List => RenderedView::List {
                current_index: self.controller.current_index(),
                thumbnails: self.thumbnails(),
                controls: self.controls(),
            },
            ViewMode::Settings(settings) => settings.render(),
        }
    }

    pub fn previous(&mut self) -> bool {
        if !self.controls().previous_enabled {
            return false;
        }
        let index = self.controller.current_index() - 1;
        self.select(index)
    }

    pub fn next(&mut self) -> bool {
        if !self.controls().next_enabled {
            return false;
        }
        let index = self.controller.current_index() + 1;
        self.select(index)
    }

    /// Thumbnail click
    pub fn select(&mut self, index: usize) -> bool {
        if self.mode != ViewMode::List {
            return false;
        }
        self.controller.select_page(index)
    }

    pub async fn add_page(&mut self) -> bool {
        if self.mode != ViewMode::List {
            return false;
        }
        match self.controller.add_page().await {
            Ok(_) => true,
            Err(e) => {
                error!("Error adding page: {}", e);
                false
            }
        }
    }

    /// Open settings for any page, whether or not it is the current one
    pub fn open_settings(&mut self, page_id: &PageId) -> bool {
        if self.mode != ViewMode::List {
            return false;
        }
        let Some(page) = self.controller.pages().iter().find(|p| p.id() == page_id) else {
            warn!("Cannot open settings for unknown page {}", page_id);
            return false;
        };
        self.mode = ViewMode::Settings(PageSettingsView::new(page));
        true
    }

    pub fn open_settings_for_current(&mut self) -> bool {
        let Some(page_id) = self.controller.current_page().map(|p| p.id().clone()) else {
            return false;
        };
        self.open_settings(&page_id)
    }

    pub fn settings(&self) -> Option<&PageSettingsView> {
        match &self.mode {
            ViewMode::Settings(settings) => Some(settings),
            _ => None,
        }
    }

    pub fn settings_mut(&mut self) -> Option<&mut PageSettingsView> {
        match &mut self.mode {
            ViewMode::Settings(settings) => Some(settings),
            _ => None,
        }
    }

    pub fn set_rename_input(&mut self, text: impl Into<String>) {
        if let Some(settings) = self.settings_mut() {
            settings.set_input(text);
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(settings) = self.settings_mut() {
            settings.request_delete();
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Some(settings) = self.settings_mut() {
            settings.cancel_delete();
        }
    }

    /// Leave settings without changing anything
    pub fn back(&mut self) {
        if let Some(SettingsIntent::Back) = self.settings().map(|s| s.back()) {
            self.mode = ViewMode::List;
        }
    }

    /// Submit the rename field. Returns to the list only after the store
    /// accepted the new name.
    pub async fn submit_rename(&mut self) -> bool {
        let Some(SettingsIntent::Rename { page_id, name }) =
            self.settings().and_then(|s| s.rename_intent())
        else {
            debug!("Rename suppressed: name is blank or unchanged");
            return false;
        };

        match self.controller.rename_page(&page_id, &name).await {
            Ok(RenameOutcome::Renamed) => {
                self.mode = ViewMode::List;
                true
            }
            Ok(RenameOutcome::Unchanged) => false,
            Err(e) => {
                error!("Error renaming page {}: {}", page_id, e);
                false
            }
        }
    }

    /// Carry out a confirmed delete
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(SettingsIntent::Delete(page_id)) =
            self.settings().and_then(|s| s.confirm_delete())
        else {
            return false;
        };

        match self.controller.delete_page(&page_id).await {
            Ok(outcome) => {
                if let DeleteOutcome::Recreated(page) = outcome {
                    debug!("Replaced the last page with {}", page.id());
                }
                self.mode = ViewMode::List;
                true
            }
            Err(e) => {
                error!("Error deleting page {}: {}", page_id, e);
                // The delete itself may have gone through with only the
                // replacement page failing.
                let deleted = self
                    .controller
                    .collection()
                    .map(|c| c.get(&page_id).is_none())
                    .unwrap_or(true);
                if deleted {
                    self.mode = ViewMode::List;
                }
                false
            }
        }
    }
}
