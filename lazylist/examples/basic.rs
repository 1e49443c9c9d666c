// Example: a large remote collection read through a page cache.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lazylist::{PageCache, PageCacheOptions};

fn main() {
    let round_trips = Arc::new(AtomicUsize::new(0));

    let mut cache = PageCache::new(
        PageCacheOptions::default().with_page_size(50),
        {
            let round_trips = Arc::clone(&round_trips);
            move |first_row| {
                round_trips.fetch_add(1, Ordering::Relaxed);
                let end = (first_row + 50).min(1_000_000);
                Ok::<_, String>((first_row..end).map(|i| format!("row #{i}")).collect())
            }
        },
        || Ok(1_000_000),
    );

    // Simulate a UI showing rows 120..140, then jumping near the end.
    let mut visible = Vec::new();
    cache
        .for_each_in_range(120..140, |i, row| visible.push((i, row.clone())))
        .expect("fetch visible rows");
    println!("first_visible={:?}", visible.first());

    match cache.get(999_999) {
        Ok(row) => println!("last={row}"),
        Err(err) => println!("error: {err}"),
    }
    match cache.get(1_000_000) {
        Ok(row) => println!("unexpected={row}"),
        Err(err) => println!("past the end: {err}"),
    }

    println!(
        "round_trips={}, stats={:?}",
        round_trips.load(Ordering::Relaxed),
        cache.stats()
    );

    cache.invalidate();
    println!("after invalidate: stats={:?}", cache.stats());
}
