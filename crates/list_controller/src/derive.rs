//! Pure derivations from a country snapshot plus list state.

use std::{iter::FusedIterator, num::NonZeroUsize, slice};

use shared::domain::Country;

use crate::selection::SelectionSet;

/// Lazy, restartable (`Clone`) view over the countries whose name contains the search text.
#[derive(Debug, Clone)]
pub struct Filtered<'a> {
    inner: slice::Iter<'a, Country>,
    needle: String,
}

impl<'a> Iterator for Filtered<'a> {
    type Item = &'a Country;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.inner
            .by_ref()
            .find(|country| matches_search(&country.name, needle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl FusedIterator for Filtered<'_> {}

/// `needle` must already be lowercased.
fn matches_search(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

pub fn filter_countries<'a>(all: &'a [Country], search_text: &str) -> Filtered<'a> {
    Filtered {
        inner: all.iter(),
        needle: search_text.to_lowercase(),
    }
}

/// Never less than 1, so an empty result still has a page to show.
pub fn total_pages(filtered_count: usize, page_size: NonZeroUsize) -> usize {
    filtered_count.div_ceil(page_size.get()).max(1)
}

/// Items on 1-based `page`; yields nothing past the end.
pub fn page_slice<I>(
    filtered: I,
    page: usize,
    page_size: NonZeroUsize,
) -> std::iter::Take<std::iter::Skip<I::IntoIter>>
where
    I: IntoIterator,
{
    let start = page.saturating_sub(1).saturating_mul(page_size.get());
    filtered.into_iter().skip(start).take(page_size.get())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonPair<'a> {
    pub first: &'a Country,
    pub second: &'a Country,
}

/// Resolves the selection against `all`, in selection order. `None` while incomplete.
pub fn comparison_pair<'a>(
    all: &'a [Country],
    selection: &SelectionSet,
) -> Option<ComparisonPair<'a>> {
    let [first_code, second_code] = selection.members() else {
        return None;
    };
    let first = all.iter().find(|country| &country.code == first_code)?;
    let second = all.iter().find(|country| &country.code == second_code)?;
    Some(ComparisonPair { first, second })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::CountryCode;

    fn country(code: &str, name: &str) -> Country {
        Country {
            code: CountryCode::from(code),
            name: name.to_string(),
            emoji: String::new(),
            capital: None,
            currency: None,
            languages: Vec::new(),
        }
    }

    fn page_size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    #[test]
    fn total_pages_rounds_up_and_never_hits_zero() {
        assert_eq!(total_pages(0, page_size(10)), 1);
        assert_eq!(total_pages(10, page_size(10)), 1);
        assert_eq!(total_pages(11, page_size(10)), 2);
        assert_eq!(total_pages(250, page_size(10)), 25);
    }

    #[test]
    fn filter_is_restartable() {
        let all = vec![country("PE", "Peru"), country("PT", "Portugal"), country("ES", "Spain")];
        let filtered = filter_countries(&all, "p");
        let first_pass: Vec<_> = filtered.clone().map(|c| c.code.as_str()).collect();
        let second_pass: Vec<_> = filtered.map(|c| c.code.as_str()).collect();
        assert_eq!(first_pass, vec!["PE", "PT", "ES"]);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn filter_handles_non_ascii_case() {
        let all = vec![country("AX", "Åland"), country("TR", "Türkiye")];
        let hits: Vec<_> = filter_countries(&all, "åL").map(|c| c.code.as_str()).collect();
        assert_eq!(hits, vec!["AX"]);
        let hits: Vec<_> = filter_countries(&all, "TÜRK").map(|c| c.code.as_str()).collect();
        assert_eq!(hits, vec!["TR"]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let all = vec![country("A1", "A"), country("B1", "B"), country("C1", "C")];
        assert_eq!(page_slice(&all, 2, page_size(2)).count(), 1);
        assert_eq!(page_slice(&all, 3, page_size(2)).count(), 0);
        assert_eq!(page_slice(&all, 0, page_size(2)).count(), 2);
    }

    #[test]
    fn comparison_needs_two_resolvable_codes() {
        let all = vec![country("US", "United States"), country("CA", "Canada")];
        let mut selection = SelectionSet::new();
        selection.add(CountryCode::from("CA"));
        assert!(comparison_pair(&all, &selection).is_none());

        selection.add(CountryCode::from("XX"));
        assert!(comparison_pair(&all, &selection).is_none());

        selection.remove(&CountryCode::from("XX"));
        selection.add(CountryCode::from("US"));
        let pair = comparison_pair(&all, &selection).expect("pair");
        assert_eq!(pair.first.name, "Canada");
        assert_eq!(pair.second.name, "United States");
    }
}
