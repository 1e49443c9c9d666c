use alloc::sync::Arc;
use alloc::vec::Vec;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Fetches one page of rows starting at absolute index `first_row`.
///
/// Must return at most `page_size` rows. A shorter page marks the end of the collection.
pub type RowFetcher<T, E> = Arc<dyn Fn(usize) -> Result<Vec<T>, E> + Send + Sync>;

/// Returns the total number of rows in the collection.
pub type SizeFetcher<E> = Arc<dyn Fn() -> Result<usize, E> + Send + Sync>;

/// Configuration for [`crate::PageCache`].
///
/// A `page_size` of `0` is treated as `1`.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageCacheOptions {
    /// Rows requested per fetch. Trades round-trips against over-fetching.
    pub page_size: usize,
}

impl PageCacheOptions {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub(crate) fn normalized(mut self) -> Self {
        if self.page_size == 0 {
            lwarn!("PageCacheOptions: page_size 0 clamped to 1");
            self.page_size = 1;
        }
        self
    }
}

impl Default for PageCacheOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
