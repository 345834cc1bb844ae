use anyhow::{bail, Context, Result};
use page_nav::application::{PageCollectionController, PageListView, PageNavConfig};
use page_nav::domain::{FileId, PageId};
use page_nav::infrastructure::SqlitePageStore;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: page-nav <file-id> [list | add | rename <page-id> <name> | delete <page-id>]";

#[tokio::main]
async fn main() -> Result<()> {
    let config = PageNavConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(file_id) = args.first() else {
        bail!(USAGE);
    };
    let file_id = FileId::new(file_id.as_str()).context("Invalid file id")?;

    let store = match &config.database_path {
        Some(path) => SqlitePageStore::new_with_path(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?,
        None => SqlitePageStore::new_in_memory().context("Failed to open in-memory database")?,
    };

    let mut view = PageListView::new(PageCollectionController::new(store));
    view.mount(file_id).await;
    if let Some(reason) = view.load_error() {
        bail!("Failed to load pages: {}", reason);
    }

    let command: Vec<&str> = args[1..].iter().map(String::as_str).collect();
    let changed = match command.as_slice() {
        [] | ["list"] => false,
        ["add"] => view.add_page().await,
        ["rename", page_id, name @ ..] if !name.is_empty() => {
            let page_id = PageId::new(*page_id).context("Invalid page id")?;
            view.open_settings(&page_id) && {
                view.set_rename_input(name.join(" "));
                view.submit_rename().await
            }
        }
        ["delete", page_id] => {
            let page_id = PageId::new(*page_id).context("Invalid page id")?;
            view.open_settings(&page_id) && {
                view.request_delete();
                view.confirm_delete().await
            }
        }
        _ => bail!(USAGE),
    };
    tracing::debug!("Command changed state: {}", changed);

    // Show the list, not a settings session that is still open
    view.back();
    println!("{}", serde_json::to_string_pretty(&view.render())?);
    Ok(())
}
