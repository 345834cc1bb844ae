pub mod render;

pub use render::{
    NavControls, PageSummary, PageThumbnail, PagesTabView, RenderedView, DELETE_WARNING,
    REQUIRES_FILE_ID,
};
