use crate::domain::base::Entity;
use crate::domain::entities::Page;
use crate::domain::value_objects::PageId;
use serde::Serialize;

/// Warning shown before a page is deleted
pub const DELETE_WARNING: &str =
    "Deleting this page will remove all elements associated with it. This action cannot be undone.";

/// Placeholder shown by the pages tab while no file is selected
pub const REQUIRES_FILE_ID: &str = "Page navigation requires a file ID";

/// The parts of a page the UI displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub id: PageId,
    pub name: String,
    pub page_number: u32,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        PageSummary {
            id: page.id().clone(),
            name: page.name().as_str().to_string(),
            page_number: page.page_number().value(),
        }
    }
}

/// One entry of the page grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageThumbnail {
    pub index: usize,
    pub label: String,
    pub page: PageSummary,
    pub is_active: bool,
}

/// Enabled state of the list header buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavControls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub add_enabled: bool,
    pub settings_enabled: bool,
}

/// Snapshot of what the pages tab should display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderedView {
    Loading,
    LoadFailed {
        reason: String,
    },
    List {
        current_index: usize,
        thumbnails: Vec<PageThumbnail>,
        controls: NavControls,
    },
    Settings {
        page: PageSummary,
        input: String,
        confirming_delete: bool,
        delete_warning: String,
    },
}

/// Snapshot of the pages tab including the no-file placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PagesTabView {
    RequiresFileId { message: String },
    Pages { view: RenderedView },
}
