pub mod page_store;

pub use page_store::{NewPage, PageStore};
