//! # Pagination/search projection
//!
//! Derives the visible page of rows from a [`ListState`] without mutating
//! it. Search results are recomputed on every read — a fresh pass over the
//! items, no incremental index — which is fine at the collection sizes the
//! platform sees (tens to low hundreds of rows).

use super::collection::{Keyed, ListState};

/// Items a search box can match against.
pub trait Searchable {
    /// Case-insensitive match; `needle` arrives already lowercased.
    fn matches_query(&self, needle: &str) -> bool;
}

/// Default predicate: case-insensitive substring over display fields.
///
/// Item impls call this per field, e.g.
/// `contains(&self.name, needle) || contains(&self.email, needle)`.
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// The filtered rows, or `None` while no search is active.
pub fn search_results<'a, T>(state: &'a ListState<T>) -> Option<Vec<&'a T>>
where
    T: Keyed + Searchable,
{
    let needle = state.search_text()?.to_lowercase();
    Some(
        state
            .items()
            .iter()
            .filter(|item| item.matches_query(&needle))
            .collect(),
    )
}

/// The page of rows the UI should render right now.
///
/// Uses search results while a search is active, the full items otherwise,
/// sliced to the state's page geometry. If the stored page index points
/// past the end (the page size just grew, rows were removed, a filter
/// narrowed the set), the *effective* page clamps down to the last
/// non-empty page instead of rendering an empty page with a non-zero
/// index. Never returns more than `page_size` rows.
pub fn visible_rows<'a, T>(state: &'a ListState<T>) -> Vec<&'a T>
where
    T: Keyed + Searchable,
{
    match search_results(state) {
        Some(filtered) => slice_page(filtered, state.page(), state.page_size()),
        None => slice_page(
            state.items().iter().collect(),
            state.page(),
            state.page_size(),
        ),
    }
}

/// Number of pages the given row count occupies (at least 1).
pub fn page_count(rows: usize, page_size: usize) -> usize {
    if rows == 0 {
        1
    } else {
        rows.div_ceil(page_size)
    }
}

fn slice_page<T>(rows: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    let effective_page = page.min(page_count(rows.len(), page_size) - 1);
    rows.into_iter()
        .skip(effective_page * page_size)
        .take(page_size)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::collection::Delta;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: String,
        name: String,
    }

    impl Keyed for Person {
        fn key(&self) -> String {
            self.id.clone()
        }
    }

    impl Searchable for Person {
        fn matches_query(&self, needle: &str) -> bool {
            contains(&self.name, needle)
        }
    }

    fn person(id: &str, name: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn loaded(names: &[(&str, &str)]) -> ListState<Person> {
        let mut state = ListState::new();
        state.begin_load();
        state.complete_load(Ok(names.iter().map(|(id, n)| person(id, n)).collect()));
        state
    }

    #[test]
    fn test_pages_split_and_clamp() {
        let mut state = loaded(&[("1", "A"), ("2", "B"), ("3", "C")]);
        state.set_page_size(2);

        state.set_page(0);
        let rows: Vec<_> = visible_rows(&state).iter().map(|p| p.name.clone()).collect();
        assert_eq!(rows, ["A", "B"]);

        state.set_page(1);
        let rows: Vec<_> = visible_rows(&state).iter().map(|p| p.name.clone()).collect();
        assert_eq!(rows, ["C"]);

        // Page 2 is invalid; set_page clamps it back to 1.
        state.set_page(2);
        assert_eq!(state.page(), 1);
        let rows: Vec<_> = visible_rows(&state).iter().map(|p| p.name.clone()).collect();
        assert_eq!(rows, ["C"]);
    }

    #[test]
    fn test_never_more_than_page_size_rows() {
        let entries: Vec<(String, String)> = (0..60)
            .map(|i| (format!("id{i}"), format!("Person {i}")))
            .collect();
        let refs: Vec<(&str, &str)> = entries
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let mut state = loaded(&refs);
        for size in super::super::collection::PAGE_SIZE_OPTIONS {
            state.set_page_size(size);
            for page in 0..10 {
                state.set_page(page);
                assert!(visible_rows(&state).len() <= size);
            }
        }
    }

    #[test]
    fn test_empty_collection_has_one_empty_page() {
        let state = loaded(&[]);
        assert!(visible_rows(&state).is_empty());
        assert_eq!(page_count(0, 10), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut state = loaded(&[("1", "Bob"), ("2", "Alice")]);
        state.set_search_text("bob");

        let results = search_results(&state).expect("search active");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Bob");

        let rows = visible_rows(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Bob");

        state.clear_search();
        assert!(search_results(&state).is_none());
        assert_eq!(visible_rows(&state).len(), 2, "full rows once cleared");
    }

    #[test]
    fn test_delta_shows_up_without_refetch() {
        let mut state = loaded(&[("1", "A"), ("2", "B"), ("3", "C")]);
        state.apply_delta(Delta::inserted(person("4", "D")));
        let names: Vec<_> = visible_rows(&state).iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_effective_page_clamps_under_narrow_filter() {
        let mut state = loaded(&[
            ("1", "Ada"),
            ("2", "Alan"),
            ("3", "Grace"),
            ("4", "Ada Jr"),
        ]);
        state.set_page_size(2);
        state.set_page(1);
        // Narrow to one row; stored page stays 1, effective page clamps to 0.
        state.set_search_text("grace");
        // set_search_text resets the page, so force the stale index back to
        // exercise the read-side clamp.
        state.set_page(1);
        let rows = visible_rows(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Grace");
    }
}
