//! Filter-aware list views over the `lazylist` page cache.
//!
//! The `lazylist` crate caches pages of an abstract indexable collection. This crate adds the
//! piece a select/combo-box widget needs on top of it:
//!
//! - a "current filter" string passed explicitly to the backend providers
//! - cache invalidation whenever that filter changes (and only then)
//! - suppression of the filter a widget re-issues from its own selection caption
//!
//! It is intentionally framework-agnostic: widgets talk to it through
//! [`IndexedFilterableSource`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod source;
mod state;
mod view;

#[cfg(test)]
mod tests;

pub use source::IndexedFilterableSource;
pub use state::{FilterState, ViewState};
pub use view::{FilterScopedListView, FilterableCountProvider, FilterablePagingProvider};

pub use lazylist::{DEFAULT_PAGE_SIZE, Error, FetchError, PageCacheOptions, PageCacheStats};
