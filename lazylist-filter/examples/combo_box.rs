// Example: a combo-box style widget driving a filter-scoped view.
use lazylist_filter::{FilterScopedListView, IndexedFilterableSource, PageCacheOptions};

const PAGE_SIZE: usize = 10;

fn customers() -> Vec<String> {
    (0..500).map(|i| format!("customer {i:03}")).collect()
}

fn matching<'a>(all: &'a [String], filter: &str) -> impl Iterator<Item = &'a String> {
    let filter = filter.to_lowercase();
    all.iter()
        .filter(move |name| name.to_lowercase().contains(&filter))
}

/// What a widget would do when its popup renders the first `rows` suggestions.
fn render<S: IndexedFilterableSource<Item = String>>(source: &mut S, rows: usize) {
    let size = match source.size() {
        Ok(size) => size,
        Err(err) => {
            println!("  error: {err}");
            return;
        }
    };
    println!("  {size} matches");
    for i in 0..size.min(rows) {
        if let Ok(item) = source.get(i) {
            println!("  {item}");
        }
    }
}

fn main() {
    let all = std::sync::Arc::new(customers());

    let mut view = FilterScopedListView::<String, String>::with_providers(
        PageCacheOptions::new(PAGE_SIZE),
        {
            let all = std::sync::Arc::clone(&all);
            move |first_row, filter: &str| {
                Ok(matching(&all, filter)
                    .skip(first_row)
                    .take(PAGE_SIZE)
                    .cloned()
                    .collect())
            }
        },
        move |filter: &str| Ok(matching(&all, filter).count()),
    );

    println!("unfiltered:");
    render(&mut view, 3);

    println!("typed \"42\":");
    view.set_filter(Some("42"));
    render(&mut view, 3);

    // The user picks an item, then reopens the popup: the widget sends the caption back.
    view.set_selected_caption(Some("customer 142"));
    view.set_filter(Some("customer 142"));
    println!("reopened with selection (filter={:?}):", view.current_filter());
    render(&mut view, 3);

    println!("state={:?}", view.state());
}
