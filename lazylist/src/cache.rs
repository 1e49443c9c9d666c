use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::error::{Error, FetchError, Result};
use crate::pages::{Entry, PageMap};
use crate::{PageCacheOptions, PageCacheStats, RowFetcher, SizeFetcher};

/// A lazily populated, page-granular view of a large indexable collection.
///
/// The cache does not hold any data on its own. It is driven by two callbacks:
/// - a row fetcher, called with the first row of a page the first time any index in that page is
///   read;
/// - a size fetcher, called the first time the size is needed.
///
/// Both results are kept until [`PageCache::invalidate`]. Memory stays bounded by the pages that
/// were actually visited.
///
/// Reads take `&mut self`: the cache is meant to be driven from a single UI context and performs
/// no internal locking. Wrap it in a mutex if several threads need it.
pub struct PageCache<T, E> {
    options: PageCacheOptions,
    row_fetcher: RowFetcher<T, E>,
    size_fetcher: SizeFetcher<E>,

    pages: PageMap<T>,
    known_size: Option<usize>,
}

impl<T, E: FetchError> PageCache<T, E> {
    pub fn new(
        options: PageCacheOptions,
        row_fetcher: impl Fn(usize) -> core::result::Result<Vec<T>, E> + Send + Sync + 'static,
        size_fetcher: impl Fn() -> core::result::Result<usize, E> + Send + Sync + 'static,
    ) -> Self {
        Self::from_fetchers(options, Arc::new(row_fetcher), Arc::new(size_fetcher))
    }

    /// Creates a cache from already shared fetchers.
    pub fn from_fetchers(
        options: PageCacheOptions,
        row_fetcher: RowFetcher<T, E>,
        size_fetcher: SizeFetcher<E>,
    ) -> Self {
        let options = options.normalized();
        ldebug!(page_size = options.page_size, "PageCache::new");
        Self {
            options,
            row_fetcher,
            size_fetcher,
            pages: PageMap::new(),
            known_size: None,
        }
    }

    /// A cache over an empty collection. Never calls anything.
    pub fn empty(options: PageCacheOptions) -> Self
    where
        T: 'static,
        E: 'static,
    {
        Self::new(options, |_| Ok(Vec::new()), || Ok(0))
    }

    pub fn options(&self) -> &PageCacheOptions {
        &self.options
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    /// Replaces the options. Changing the page size invalidates the cache.
    pub fn set_options(&mut self, options: PageCacheOptions) {
        let options = options.normalized();
        let page_size_changed = options.page_size != self.options.page_size;
        self.options = options;
        if page_size_changed {
            self.invalidate();
        }
    }

    /// Swaps both fetchers and invalidates.
    ///
    /// Use this when the backend behind the cache changes (another provider, another filter).
    pub fn set_fetchers(&mut self, row_fetcher: RowFetcher<T, E>, size_fetcher: SizeFetcher<E>) {
        ldebug!("PageCache::set_fetchers");
        self.row_fetcher = row_fetcher;
        self.size_fetcher = size_fetcher;
        self.invalidate();
    }

    /// Returns the element at `index`, fetching its page on first access.
    ///
    /// Fails with [`Error::IndexOutOfRange`] when `index >= size()`, and also when the fetched
    /// page turns out too short to contain `index`.
    pub fn get(&mut self, index: usize) -> Result<&T, E> {
        let size = self.size()?;
        if index >= size {
            return Err(Error::IndexOutOfRange { index, size });
        }

        let page_size = self.options.page_size;
        let page_index = index / page_size;
        let offset = index % page_size;

        let page = match self.pages.entry(page_index) {
            Entry::Occupied(e) => {
                ltrace!(index, page_index, "PageCache: hit");
                e.into_mut()
            }
            Entry::Vacant(e) => {
                let rows = fetch_page(&self.row_fetcher, page_index, page_size, size)?;
                e.insert(rows)
            }
        };

        match page.get(offset) {
            Some(item) => Ok(item),
            None => Err(Error::IndexOutOfRange { index, size }),
        }
    }

    /// Returns the total element count, calling the size fetcher at most once per invalidation.
    pub fn size(&mut self) -> Result<usize, E> {
        if let Some(size) = self.known_size {
            return Ok(size);
        }
        ltrace!("PageCache: fetching size");
        let size = (self.size_fetcher)().map_err(|error| Error::Fetch { error })?;
        self.known_size = Some(size);
        Ok(size)
    }

    /// Drops every cached page and the memoized size. Does not fetch anything.
    pub fn invalidate(&mut self) {
        ldebug!(
            cached_pages = self.pages.len(),
            known_size = ?self.known_size,
            "PageCache::invalidate"
        );
        self.pages.clear();
        self.known_size = None;
    }

    /// Visits `index, &item` for every index of `range` below `size()`.
    ///
    /// Pages are fetched as the walk reaches them. Stops at the first error.
    pub fn for_each_in_range(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(usize, &T),
    ) -> Result<(), E> {
        let end = range.end.min(self.size()?);
        for index in range.start..end {
            let item = self.get(index)?;
            f(index, item);
        }
        Ok(())
    }

    /// The memoized size, without fetching.
    pub fn known_size(&self) -> Option<usize> {
        self.known_size
    }

    pub fn cached_page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_page_cached(&self, page_index: usize) -> bool {
        self.pages.contains_key(&page_index)
    }

    /// The page that owns `index`.
    pub fn page_index_of(&self, index: usize) -> usize {
        index / self.options.page_size
    }

    pub fn stats(&self) -> PageCacheStats {
        PageCacheStats {
            page_size: self.options.page_size,
            cached_pages: self.pages.len(),
            known_size: self.known_size,
        }
    }
}

fn fetch_page<T, E: FetchError>(
    row_fetcher: &RowFetcher<T, E>,
    page_index: usize,
    page_size: usize,
    size: usize,
) -> Result<Vec<T>, E> {
    let first_row = page_index * page_size;
    ltrace!(page_index, first_row, "PageCache: fetching page");
    let rows = row_fetcher(first_row).map_err(|error| Error::Fetch { error })?;

    let returned = rows.len();
    if returned > page_size {
        lwarn!(
            first_row,
            page_size,
            returned,
            "PageCache: row fetcher returned an oversized page"
        );
        return Err(Error::ContractViolation {
            first_row,
            page_size,
            returned,
        });
    }

    if returned < page_size && first_row + returned < size {
        lwarn!(
            first_row,
            returned,
            size,
            "PageCache: short page before the end of the collection"
        );
    }

    Ok(rows)
}

impl<T, E> fmt::Debug for PageCache<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCache")
            .field("options", &self.options)
            .field("cached_pages", &self.pages.len())
            .field("known_size", &self.known_size)
            .finish_non_exhaustive()
    }
}
