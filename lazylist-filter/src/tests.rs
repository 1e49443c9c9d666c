use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Person {
    name: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Stand-in for a repository: substring filtering plus call bookkeeping.
#[derive(Default)]
struct Service {
    all: Vec<String>,
    row_calls: Mutex<Vec<(usize, String)>>,
    count_calls: Mutex<Vec<String>>,
}

impl Service {
    fn new(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            all: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        })
    }

    fn numbered(count: usize) -> Arc<Self> {
        let names: Vec<String> = (0..count).map(|i| format!("person {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::new(&refs)
    }

    fn matching(&self, filter: &str) -> Vec<&String> {
        self.all
            .iter()
            .filter(|name| filter.is_empty() || name.to_lowercase().contains(filter))
            .collect()
    }

    fn find(&self, first_row: usize, filter: &str, max_results: usize) -> Vec<Person> {
        self.row_calls
            .lock()
            .unwrap()
            .push((first_row, filter.to_string()));
        self.matching(filter)
            .into_iter()
            .skip(first_row)
            .take(max_results)
            .map(|name| Person { name: name.clone() })
            .collect()
    }

    fn count(&self, filter: &str) -> usize {
        self.count_calls.lock().unwrap().push(filter.to_string());
        self.matching(filter).len()
    }

    fn row_calls(&self) -> Vec<(usize, String)> {
        self.row_calls.lock().unwrap().clone()
    }

    fn count_calls(&self) -> Vec<String> {
        self.count_calls.lock().unwrap().clone()
    }
}

fn view_over(service: &Arc<Service>, page_size: usize) -> FilterScopedListView<Person, String> {
    let rows = Arc::clone(service);
    let count = Arc::clone(service);
    FilterScopedListView::with_providers(
        PageCacheOptions::new(page_size),
        move |first_row, filter: &str| Ok(rows.find(first_row, filter, page_size)),
        move |filter: &str| Ok(count.count(filter)),
    )
}

fn name_at(view: &mut FilterScopedListView<Person, String>, index: usize) -> String {
    view.get(index).unwrap().name.clone()
}

fn row(first_row: usize, filter: &str) -> (usize, String) {
    (first_row, filter.to_string())
}

#[test]
fn five_letters_then_filter_refetches_under_new_filter() {
    let service = Service::new(&["A", "B", "C", "D", "E"]);
    let mut view = view_over(&service, 3);

    assert_eq!(name_at(&mut view, 0), "A");
    assert_eq!(service.row_calls(), [row(0, "")]);
    assert_eq!(name_at(&mut view, 4), "E");
    assert_eq!(service.row_calls(), [row(0, ""), row(3, "")]);
    assert_eq!(view.size().unwrap(), 5);
    assert_eq!(service.count_calls(), [""]);

    assert!(view.set_filter(Some("x")));
    assert_eq!(view.current_filter(), "x");
    assert_eq!(view.cache().cached_page_count(), 0);
    assert_eq!(view.cache().known_size(), None);

    // Nothing matches "x": the next read asks the backend under the new filter.
    assert!(view.get(0).unwrap_err().is_index_out_of_range());
    assert_eq!(service.count_calls(), ["", "x"]);
    assert_eq!(service.row_calls().len(), 2);
}

#[test]
fn filter_change_refetches_page_zero_with_the_new_filter() {
    let service = Service::numbered(50);
    let mut view = view_over(&service, 10);

    assert_eq!(name_at(&mut view, 0), "person 0");
    view.set_filter(Some("1"));
    assert_eq!(name_at(&mut view, 0), "person 1");
    assert_eq!(name_at(&mut view, 1), "person 10");
    assert_eq!(service.row_calls(), [row(0, ""), row(0, "1")]);
    // 1, 10..=19, 21, 31, 41
    assert_eq!(view.size().unwrap(), 14);
}

#[test]
fn same_filter_twice_does_not_invalidate() {
    let service = Service::numbered(50);
    let mut view = view_over(&service, 10);

    assert!(view.set_filter(Some("2")));
    view.get(0).unwrap();
    let rows_before = service.row_calls().len();
    let counts_before = service.count_calls().len();

    assert!(!view.set_filter(Some("2")));
    assert!(!view.set_filter(Some("2")));
    view.get(0).unwrap();
    view.size().unwrap();

    assert_eq!(service.row_calls().len(), rows_before);
    assert_eq!(service.count_calls().len(), counts_before);
    assert!(view.cache().is_page_cached(0));
}

#[test]
fn none_and_empty_filters_are_the_same() {
    let service = Service::numbered(5);
    let mut view = view_over(&service, 10);
    view.get(0).unwrap();

    assert!(!view.set_filter(None));
    assert!(!view.set_filter(Some("")));
    assert_eq!(view.filter_state(), FilterState::Unfiltered);
    assert_eq!(service.row_calls(), [row(0, "")]);

    assert!(view.set_filter(Some("3")));
    assert_eq!(view.filter_state(), FilterState::Filtered("3"));
    assert!(view.filter_state().is_filtered());
    assert!(view.set_filter(None));
    assert_eq!(view.filter_state(), FilterState::Unfiltered);
}

#[test]
fn selected_caption_is_not_used_as_a_filter() {
    let service = Service::new(&["Alice", "Bob", "Carol"]);
    let mut view = view_over(&service, 10);
    view.set_selected_caption(Some("Alice"));
    view.get(0).unwrap();

    assert!(!view.set_filter(Some("Alice")));
    assert_eq!(view.current_filter(), "");
    assert!(view.cache().is_page_cached(0));
    assert_eq!(view.size().unwrap(), 3);
    assert_eq!(service.row_calls(), [row(0, "")]);
}

#[test]
fn selected_caption_suppression_resets_an_active_filter() {
    let service = Service::new(&["Alice", "Bob", "Carol"]);
    let mut view = view_over(&service, 10);

    let alice = Person {
        name: "Alice".to_string(),
    };
    view.select_item(Some(&alice));
    assert_eq!(view.selected_caption(), Some("Alice"));

    assert!(view.set_filter(Some("o")));
    assert_eq!(view.size().unwrap(), 2);

    // Reopening the popup re-issues the caption: back to the full list.
    assert!(view.set_filter(Some("Alice")));
    assert_eq!(view.current_filter(), "");
    assert_eq!(view.size().unwrap(), 3);

    // Without a selection the same string is a real filter.
    view.select_item(None);
    assert!(view.set_filter(Some("Alice")));
    assert_eq!(view.current_filter(), "Alice");
}

#[test]
fn refresh_refetches_and_keeps_filter() {
    let service = Service::numbered(30);
    let mut view = view_over(&service, 10);
    view.set_filter(Some("2"));
    view.get(0).unwrap();

    view.refresh();
    assert_eq!(view.current_filter(), "2");
    assert_eq!(view.cache().cached_page_count(), 0);
    assert_eq!(view.cache().known_size(), None);

    view.get(0).unwrap();
    assert_eq!(service.row_calls(), [row(0, "2"), row(0, "2")]);
    assert_eq!(service.count_calls(), ["2", "2"]);
}

#[test]
fn new_view_is_empty_until_providers_are_loaded() {
    let mut view = FilterScopedListView::<Person, String>::default();
    assert!(!view.has_providers());
    assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(view.size().unwrap(), 0);
    assert!(view.get(0).unwrap_err().is_index_out_of_range());
    assert!(view.set_filter(Some("a")));

    let service = Service::new(&["Ann", "Bea"]);
    let rows = Arc::clone(&service);
    let count = Arc::clone(&service);
    view.load_from(
        move |first_row, filter: &str| Ok(rows.find(first_row, filter, DEFAULT_PAGE_SIZE)),
        move |filter: &str| Ok(count.count(filter)),
    );
    assert!(view.has_providers());
    // The filter set before loading is applied to the new backend.
    assert_eq!(view.size().unwrap(), 2);
    assert_eq!(service.count_calls(), ["a"]);
}

#[test]
fn swapping_providers_invalidates_and_can_change_page_size() {
    let first = Service::numbered(10);
    let mut view = view_over(&first, 5);
    view.get(7).unwrap();

    let second = Service::new(&["x0", "x1", "x2", "x3"]);
    let rows = Arc::clone(&second);
    let count = Arc::clone(&second);
    view.load_from_with_page_size(
        move |first_row, filter: &str| Ok(rows.find(first_row, filter, 2)),
        move |filter: &str| Ok(count.count(filter)),
        2,
    );

    assert_eq!(view.page_size(), 2);
    assert_eq!(view.cache().cached_page_count(), 0);
    assert_eq!(name_at(&mut view, 3), "x3");
    assert_eq!(second.row_calls(), [row(2, "")]);
    assert_eq!(first.row_calls(), [row(5, "")]);
}

#[test]
fn fetch_errors_pass_through_the_view() {
    let mut view = FilterScopedListView::<Person, String>::with_providers(
        PageCacheOptions::default(),
        |_, filter: &str| Err(format!("query failed for {filter:?}")),
        |_: &str| Ok(3),
    );
    view.set_filter(Some("q"));

    let err = view.get(1).unwrap_err();
    assert_eq!(err.fetch_error().map(String::as_str), Some("query failed for \"q\""));
    assert_eq!(view.cache().cached_page_count(), 0);
}

#[test]
fn widget_layer_only_needs_the_source_trait() {
    fn first_two<S: IndexedFilterableSource>(source: &mut S, filter: &str) -> usize {
        source.set_filter(Some(filter));
        let size = source.size().unwrap();
        let mut seen = 0;
        for i in 0..size.min(2) {
            source.get(i).unwrap();
            seen += 1;
        }
        source.refresh();
        seen
    }

    let service = Service::numbered(25);
    let mut view = view_over(&service, 10);
    assert_eq!(first_two(&mut view, "2"), 2);
    assert_eq!(view.current_filter(), "2");
    assert_eq!(view.cache().cached_page_count(), 0);
}

#[test]
fn state_snapshot_tracks_filter_and_cache() {
    let service = Service::numbered(40);
    let mut view = view_over(&service, 10);
    view.set_selected_caption(Some("person 3"));
    view.set_filter(Some("3"));
    view.get(0).unwrap();

    assert_eq!(
        view.state(),
        ViewState {
            filter: "3".to_string(),
            selected_caption: Some("person 3".to_string()),
            cache: PageCacheStats {
                page_size: 10,
                cached_pages: 1,
                known_size: Some(13),
            },
        }
    );
}
