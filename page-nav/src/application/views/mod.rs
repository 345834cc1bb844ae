pub mod page_list;
pub mod page_settings;
pub mod sidebar;

pub use page_list::{PageListView, ViewMode};
pub use page_settings::{PageSettingsView, SettingsIntent, SettingsState};
pub use sidebar::{SidebarHost, SidebarState, SidebarTab};
