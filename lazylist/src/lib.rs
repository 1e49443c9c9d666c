//! A paged lazy collection cache.
//!
//! [`PageCache`] presents a large, possibly remote collection as a small indexable sequence. It
//! fetches whole pages on first access through a caller-supplied row fetcher, memoizes the total
//! size through a size fetcher, and keeps both until explicitly invalidated.
//!
//! It is UI-agnostic and filter-agnostic. For a filter-aware wrapper suited to select/combo-box
//! widgets, see the `lazylist-filter` crate.
//!
//! The caller is expected to provide:
//! - a row fetcher: `first_row -> rows` (at most one page)
//! - a size fetcher: `() -> total rows`
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod error;
mod options;
mod pages;
mod state;


pub use cache::PageCache;
pub use error::{Error, FetchError, Result};
pub use options::{DEFAULT_PAGE_SIZE, PageCacheOptions, RowFetcher, SizeFetcher};
pub use state::PageCacheStats;
