use alloc::string::String;

use lazylist::PageCacheStats;

/// Filtering state of a [`crate::FilterScopedListView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterState<'a> {
    Unfiltered,
    Filtered(&'a str),
}

impl FilterState<'_> {
    pub fn is_filtered(&self) -> bool {
        matches!(self, Self::Filtered(_))
    }
}

/// A snapshot of a view: active filter plus cache bookkeeping.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewState {
    pub filter: String,
    pub selected_caption: Option<String>,
    pub cache: PageCacheStats,
}
