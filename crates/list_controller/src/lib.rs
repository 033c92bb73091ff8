//! Country list controller: search text, pagination and a two-slot comparison selection
//! layered over an immutable snapshot of countries. Performs no I/O.

use std::{num::NonZeroUsize, sync::Arc};

use shared::{
    domain::{Country, CountryCode},
    fetch::FetchState,
};
use tracing::debug;

mod derive;
mod selection;

pub use derive::{comparison_pair, filter_countries, page_slice, total_pages, ComparisonPair, Filtered};
pub use selection::{SelectionSet, ToggleOutcome, SELECTION_CAPACITY};

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => panic!("default page size must be non-zero"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    pub page_size: NonZeroUsize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListConfig {
    /// `None` for a page size of zero.
    pub fn with_page_size(page_size: usize) -> Option<Self> {
        NonZeroUsize::new(page_size).map(|page_size| Self { page_size })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    search_text: String,
    current_page: usize,
    selection: SelectionSet,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            current_page: 1,
            selection: SelectionSet::new(),
        }
    }
}

impl ListState {
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }
}

/// Everything the presentation layer renders for one frame.
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    pub search_text: &'a str,
    pub filtered: Vec<&'a Country>,
    pub page: Vec<&'a Country>,
    pub total_pages: usize,
    pub current_page: usize,
    pub selected: &'a [CountryCode],
    pub comparison: Option<ComparisonPair<'a>>,
}

impl ListView<'_> {
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone)]
pub struct ListController {
    config: ListConfig,
    state: ListState,
    source: FetchState<Arc<[Country]>>,
}

impl ListController {
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            state: ListState::default(),
            source: FetchState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn source(&self) -> &FetchState<Arc<[Country]>> {
        &self.source
    }

    /// Installs the adapter's latest state. Anything but `Ready` counts as no countries.
    pub fn set_source(&mut self, source: FetchState<Arc<[Country]>>) {
        self.source = source;
        let total = self.total_pages();
        if self.state.current_page > total {
            debug!(
                page = self.state.current_page,
                total, "source changed, clamping current page"
            );
            self.state.current_page = total;
        }
    }

    /// The ready snapshot, or an empty slice while loading or failed.
    pub fn countries(&self) -> &[Country] {
        self.source.ready().map(|countries| &countries[..]).unwrap_or(&[])
    }

    pub fn search_text(&self) -> &str {
        &self.state.search_text
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn selected_codes(&self) -> &[CountryCode] {
        self.state.selection.members()
    }

    pub fn is_selected(&self, code: &CountryCode) -> bool {
        self.state.selection.contains(code)
    }

    pub fn can_select(&self, code: &CountryCode) -> bool {
        self.state.selection.can_toggle(code)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.state.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        let clamped = page.clamp(1, self.total_pages());
        if clamped != page {
            debug!(requested = page, clamped, "page out of range");
        }
        self.state.current_page = clamped;
    }

    pub fn toggle_select(&mut self, code: &CountryCode) -> ToggleOutcome {
        let outcome = self.state.selection.toggle(code);
        debug!(code = %code, ?outcome, selected = self.state.selection.len(), "toggle selection");
        outcome
    }

    /// Filters an explicit country list with the current search text.
    pub fn filtered_list<'a>(&self, all: &'a [Country]) -> Filtered<'a> {
        filter_countries(all, &self.state.search_text)
    }

    pub fn filtered(&self) -> Filtered<'_> {
        self.filtered_list(self.countries())
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().count()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count(), self.config.page_size)
    }

    /// The current page of an already filtered sequence.
    pub fn page_slice<I: IntoIterator>(
        &self,
        filtered: I,
    ) -> std::iter::Take<std::iter::Skip<I::IntoIter>> {
        page_slice(filtered, self.state.current_page, self.config.page_size)
    }

    pub fn comparison_pair<'a>(&self, all: &'a [Country]) -> Option<ComparisonPair<'a>> {
        comparison_pair(all, &self.state.selection)
    }

    pub fn view(&self) -> ListView<'_> {
        let all = self.countries();
        let filtered: Vec<&Country> = self.filtered_list(all).collect();
        let page: Vec<&Country> = self.page_slice(filtered.iter().copied()).collect();
        ListView {
            search_text: &self.state.search_text,
            total_pages: total_pages(filtered.len(), self.config.page_size),
            current_page: self.state.current_page,
            selected: self.state.selection.members(),
            comparison: self.comparison_pair(all),
            filtered,
            page,
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
