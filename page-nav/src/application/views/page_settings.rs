/// Settings surface for a single page
use crate::application::dto::{PageSummary, RenderedView, DELETE_WARNING};
use crate::domain::entities::Page;
use crate::domain::value_objects::PageId;

/// Where a settings session is. Deletion needs an explicit confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsState {
    #[default]
    Editing,
    ConfirmingDelete,
}

/// A request the settings surface hands back to the page list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsIntent {
    Back,
    Rename { page_id: PageId, name: String },
    Delete(PageId),
}

/// Editing session for one page.
///
/// The view never touches the page collection itself; it only produces
/// `SettingsIntent`s for the owning list view to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettingsView {
    page: PageSummary,
    input: String,
    state: SettingsState,
}

impl PageSettingsView {
    /// Start a session with the name field pre-filled
    pub fn new(page: &Page) -> Self {
        let page = PageSummary::from(page);
        PageSettingsView {
            input: page.name.clone(),
            page,
            state: SettingsState::Editing,
        }
    }

    pub fn page_id(&self) -> &PageId {
        &self.page.id
    }

    pub fn page(&self) -> &PageSummary {
        &self.page
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> SettingsState {
        self.state
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// A rename request, or `None` when the trimmed input is blank or the
    /// same as the current name
    pub fn rename_intent(&self) -> Option<SettingsIntent> {
        let name = self.input.trim();
        if name.is_empty() || name == self.page.name {
            return None;
        }
        Some(SettingsIntent::Rename {
            page_id: self.page.id.clone(),
            name: name.to_string(),
        })
    }

    pub fn request_delete(&mut self) {
        self.state = SettingsState::ConfirmingDelete;
    }

    pub fn cancel_delete(&mut self) {
        self.state = SettingsState::Editing;
    }

    /// The delete request, only once deletion has been asked for
    pub fn confirm_delete(&self) -> Option<SettingsIntent> {
        match self.state {
            SettingsState::ConfirmingDelete => Some(SettingsIntent::Delete(self.page.id.clone())),
            SettingsState::Editing => None,
        }
    }

    pub fn back(&self) -> SettingsIntent {
        SettingsIntent::Back
    }

    pub fn render(&self) -> RenderedView {
        RenderedView::Settings {
            page: self.page.clone(),
            input: self.input.clone(),
            confirming_delete: self.state == SettingsState::ConfirmingDelete,
            delete_warning: DELETE_WARNING.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{FileId, PageName, PageNumber};
    use chrono::Utc;

    fn view() -> PageSettingsView {
        let page = Page::new(
            PageId::new("page-1").unwrap(),
            FileId::new("file-1").unwrap(),
            PageName::new("Page 1").unwrap(),
            PageNumber::first(),
            Utc::now(),
        );
        PageSettingsView::new(&page)
    }

    #[test]
    fn test_input_prefilled_with_name() {
        let view = view();
        assert_eq!(view.input(), "Page 1");
        assert_eq!(view.state(), SettingsState::Editing);
    }

    #[test]
    fn test_rename_intent_requires_a_change() {
        let mut view = view();
        assert_eq!(view.rename_intent(), None);

        view.set_input("   ");
        assert_eq!(view.rename_intent(), None);

        view.set_input(" Page 1 ");
        assert_eq!(view.rename_intent(), None);

        view.set_input(" Layout ");
        assert_eq!(
            view.rename_intent(),
            Some(SettingsIntent::Rename {
                page_id: PageId::new("page-1").unwrap(),
                name: "Layout".to_string(),
            })
        );
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut view = view();
        assert_eq!(view.confirm_delete(), None);

        view.request_delete();
        assert_eq!(view.state(), SettingsState::ConfirmingDelete);
        assert_eq!(
            view.confirm_delete(),
            Some(SettingsIntent::Delete(PageId::new("page-1").unwrap()))
        );

        view.cancel_delete();
        assert_eq!(view.state(), SettingsState::Editing);
        assert_eq!(view.confirm_delete(), None);
    }

    #[test]
    fn test_render_reflects_state() {
        let mut view = view();
        view.request_delete();

        match view.render() {
            RenderedView::Settings {
                page,
                confirming_delete,
                ..
            } => {
                assert_eq!(page.page_number, 1);
                assert!(confirming_delete);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }
}
