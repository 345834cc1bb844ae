/// Sidebar tab state and the pages tab it hosts
use crate::application::dto::{PagesTabView, REQUIRES_FILE_ID};
use crate::application::repositories::PageStore;
use crate::application::services::PageCollectionController;
use crate::application::views::page_list::PageListView;
use crate::domain::value_objects::{DocumentId, FileId};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarTab {
    #[default]
    Elements,
    Pages,
    Annotations,
}

/// Which sidebar tab is active for one editor session.
///
/// Switching to another document always brings the sidebar back to the
/// elements tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarState {
    document_id: Option<DocumentId>,
    active_tab: SidebarTab,
    view_only: bool,
}

impl SidebarState {
    pub fn new(view_only: bool) -> Self {
        SidebarState {
            document_id: None,
            active_tab: SidebarTab::default(),
            view_only,
        }
    }

    pub fn active_tab(&self) -> SidebarTab {
        self.active_tab
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn is_view_only(&self) -> bool {
        self.view_only
    }

    /// Annotations are hidden from view-only sessions
    pub fn available_tabs(&self) -> Vec<SidebarTab> {
        let mut tabs = vec![SidebarTab::Elements, SidebarTab::Pages];
        if !self.view_only {
            tabs.push(SidebarTab::Annotations);
        }
        tabs
    }

    /// Activate a tab; unavailable tabs are ignored
    pub fn select_tab(&mut self, tab: SidebarTab) -> bool {
        if !self.available_tabs().contains(&tab) || tab == self.active_tab {
            return false;
        }
        self.active_tab = tab;
        true
    }

    /// Record the current document; a different document resets the tab.
    ///
    /// Returns whether the document changed.
    pub fn set_document(&mut self, document_id: DocumentId) -> bool {
        if self.document_id.as_ref() == Some(&document_id) {
            return false;
        }
        debug!("Sidebar switched to document {}", document_id);
        self.document_id = Some(document_id);
        self.active_tab = SidebarTab::default();
        true
    }
}

/// Tabbed sidebar embedding the page list.
///
/// The page list only exists while the pages tab is active and a file is
/// known; leaving the tab or changing the file tears it down.
pub struct SidebarHost<S: PageStore> {
    state: SidebarState,
    store: Arc<Mutex<S>>,
    file_id: Option<FileId>,
    pages: Option<PageListView<S>>,
}

impl<S: PageStore + Send + 'static> SidebarHost<S> {
    pub fn new(store: Arc<Mutex<S>>, view_only: bool) -> Self {
        SidebarHost {
            state: SidebarState::new(view_only),
            store,
            file_id: None,
            pages: None,
        }
    }

    pub fn state(&self) -> &SidebarState {
        &self.state
    }

    pub fn file_id(&self) -> Option<&FileId> {
        self.file_id.as_ref()
    }

    pub fn pages(&self) -> Option<&PageListView<S>> {
        self.pages.as_ref()
    }

    pub fn pages_mut(&mut self) -> Option<&mut PageListView<S>> {
        self.pages.as_mut()
    }

    /// Take the identifiers of the document being edited. A blank file id
    /// means the file is not known yet.
    pub async fn set_identifiers(&mut self, document_id: DocumentId, file_id: &str) {
        if self.state.set_document(document_id) {
            self.unmount_pages();
        }

        let file_id = FileId::new(file_id).ok();
        if file_id != self.file_id {
            self.unmount_pages();
            self.file_id = file_id;
        }

        self.sync_pages().await;
    }

    pub async fn select_tab(&mut self, tab: SidebarTab) -> bool {
        if !self.state.select_tab(tab) {
            return false;
        }
        self.sync_pages().await;
        true
    }

    pub fn render_pages_tab(&self) -> PagesTabView {
        match &self.pages {
            Some(pages) => PagesTabView::Pages {
                view: pages.render(),
            },
            None => PagesTabView::RequiresFileId {
                message: REQUIRES_FILE_ID.to_string(),
            },
        }
    }

    async fn sync_pages(&mut self) {
        if self.state.active_tab() != SidebarTab::Pages {
            self.unmount_pages();
            return;
        }
        let Some(file_id) = self.file_id.clone() else {
            return;
        };
        if self.pages.is_some() {
            return;
        }

        info!("Mounting page list for file {}", file_id);
        let controller = PageCollectionController::with_shared_store(Arc::clone(&self.store));
        let mut pages = PageListView::new(controller);
        pages.mount(file_id).await;
        self.pages = Some(pages);
    }

    fn unmount_pages(&mut self) {
        if let Some(mut pages) = self.pages.take() {
            pages.unmount();
        }
    }
}
