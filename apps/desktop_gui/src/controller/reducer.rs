//! Applies list intents collected while rendering a frame.

use list_controller::{ListController, ToggleOutcome};
use shared::domain::CountryCode;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    SearchTextChanged(String),
    PageChanged(usize),
    ToggleSelect(CountryCode),
    ViewDetail(CountryCode),
}

/// Screen change requested by an intent; the app owns the actual transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Detail(CountryCode),
}

pub fn reduce(list: &mut ListController, intent: ListIntent) -> Option<Navigation> {
    match intent {
        ListIntent::SearchTextChanged(text) => {
            if text != list.search_text() {
                list.set_search_text(text);
            }
            None
        }
        ListIntent::PageChanged(page) => {
            list.set_page(page);
            None
        }
        ListIntent::ToggleSelect(code) => {
            if list.toggle_select(&code) == ToggleOutcome::Refused {
                debug!(code = %code, "selection full, toggle ignored");
            }
            None
        }
        ListIntent::ViewDetail(code) => Some(Navigation::Detail(code)),
    }
}
