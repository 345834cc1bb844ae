pub mod config;
pub mod dto;
pub mod repositories;
pub mod services;
pub mod views;

// Re-export key types to avoid naming conflicts
pub use config::PageNavConfig;
pub use dto::{NavControls, PageSummary, PageThumbnail, PagesTabView, RenderedView};
pub use repositories::{NewPage, PageStore};
pub use services::{
    DeleteOutcome, PageCollectionController, PageNavError, PageNavResult, RenameOutcome,
};
pub use views::{
    PageListView, PageSettingsView, SettingsIntent, SettingsState, SidebarHost, SidebarState,
    SidebarTab, ViewMode,
};
