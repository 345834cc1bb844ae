pub mod persistence;

pub use persistence::SqlitePageStore;
