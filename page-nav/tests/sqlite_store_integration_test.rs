use page_nav::application::{PageCollectionController, PageStore};
use page_nav::domain::{base::Entity, FileId};
use page_nav::infrastructure::SqlitePageStore;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;

fn file() -> FileId {
    FileId::new("file-on-disk").unwrap()
}

#[tokio::test]
async fn test_pages_survive_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("pages.db");

    let first_id = {
        let store = SqlitePageStore::new_with_path(&db_path).unwrap();
        let mut controller = PageCollectionController::new(store);
        controller.bootstrap(file()).await.unwrap();
        controller.add_page().await.unwrap();
        let id = controller.pages()[0].id().clone();
        controller.rename_page(&id, "Feed section").await.unwrap();
        id
    };

    let store = SqlitePageStore::new_with_path(&db_path).unwrap();
    let mut controller = PageCollectionController::new(store);
    controller.bootstrap(file()).await.unwrap();

    let pages = controller.pages();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].id(), &first_id);
    assert_eq!(pages[0].name().as_str(), "Feed section");
    assert_eq!(pages[1].name().as_str(), "Page 2");
}

#[tokio::test]
async fn test_bootstrap_does_not_create_when_pages_exist() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("pages.db");

    for _ in 0..3 {
        let store = SqlitePageStore::new_with_path(&db_path).unwrap();
        let mut controller = PageCollectionController::new(store);
        controller.bootstrap(file()).await.unwrap();
        assert_eq!(controller.pages().len(), 1);
    }
}

#[tokio::test]
async fn test_stale_controller_add_gets_fresh_number_from_store() {
    let shared = Arc::new(Mutex::new(SqlitePageStore::new_in_memory().unwrap()));
    let mut first = PageCollectionController::with_shared_store(Arc::clone(&shared));
    let mut second = PageCollectionController::with_shared_store(Arc::clone(&shared));
    first.bootstrap(file()).await.unwrap();
    second.bootstrap(file()).await.unwrap();

    let a = first.add_page().await.unwrap();
    // `second` still believes the maximum is 1 and asks for 2 again
    let b = second.add_page().await.unwrap();

    assert_eq!(a.page_number().value(), 2);
    assert_eq!(b.page_number().value(), 3);
    assert_eq!(b.name().as_str(), "Page 3");
    assert_eq!(b.label(), "Page 3");

    let stored: Vec<(u32, String)> = shared
        .lock()
        .await
        .list_pages(&file())
        .unwrap()
        .iter()
        .map(|p| (p.page_number().value(), p.name().as_str().to_string()))
        .collect();
    assert_eq!(
        stored,
        vec![
            (1, "Page 1".to_string()),
            (2, "Page 2".to_string()),
            (3, "Page 3".to_string()),
        ]
    );

    // The stale controller's local copy carries the store's answer
    let last = second.pages().last().unwrap();
    assert_eq!(last.page_number().value(), 3);
    assert_eq!(last.name().as_str(), "Page 3");
}

#[tokio::test]
async fn test_deleting_page_removes_its_elements() {
    let shared = Arc::new(Mutex::new(SqlitePageStore::new_in_memory().unwrap()));
    let mut controller = PageCollectionController::with_shared_store(Arc::clone(&shared));
    controller.bootstrap(file()).await.unwrap();
    let page = controller.add_page().await.unwrap();

    shared
        .lock()
        .await
        .add_diagram_element(page.id(), "control valve")
        .unwrap();

    controller.delete_page(page.id()).await.unwrap();

    let remaining = shared.lock().await.count_diagram_elements(page.id()).unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(controller.pages().len(), 1);
}
