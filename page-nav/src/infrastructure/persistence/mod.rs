mod schema;
mod sqlite_page_store;

pub use schema::initialize_database;
pub use sqlite_page_store::SqlitePageStore;
