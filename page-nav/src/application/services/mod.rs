pub mod page_collection;

pub use page_collection::{
    DeleteOutcome, PageCollectionController, PageNavError, PageNavResult, RenameOutcome,
};
