use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use lazylist::{FetchError, PageCache, PageCacheOptions, RowFetcher, SizeFetcher};

use crate::{FilterState, IndexedFilterableSource, ViewState};

/// Fetches one page of rows matching `filter`, starting at `first_row`.
///
/// The page length should match the page size configured on the view.
pub type FilterablePagingProvider<T, E> =
    Arc<dyn Fn(usize, &str) -> Result<Vec<T>, E> + Send + Sync>;

/// Counts the rows matching `filter`.
pub type FilterableCountProvider<E> = Arc<dyn Fn(&str) -> Result<usize, E> + Send + Sync>;

/// A [`PageCache`] scoped to the filter currently typed into a select widget.
///
/// Pages fetched under one filter are reused for as long as that filter stays active. Any change
/// of filter drops them before the next read is served, so a read never observes rows from a
/// previous filter.
///
/// The filter reaches the backend as an explicit argument: on every change the view rebinds the
/// cache's fetchers to closures that own a copy of the new filter. The cache itself knows
/// nothing about filtering.
///
/// A fresh view is empty (size 0) until [`FilterScopedListView::load_from`] attaches providers.
pub struct FilterScopedListView<T, E> {
    cache: PageCache<T, E>,
    providers: Option<(FilterablePagingProvider<T, E>, FilterableCountProvider<E>)>,
    current_filter: String,
    selected_caption: Option<String>,
}

impl<T: 'static, E: FetchError + 'static> FilterScopedListView<T, E> {
    pub fn new(options: PageCacheOptions) -> Self {
        Self {
            cache: PageCache::empty(options),
            providers: None,
            current_filter: String::new(),
            selected_caption: None,
        }
    }

    /// Creates a view already wired to a backend.
    pub fn with_providers(
        options: PageCacheOptions,
        paging: impl Fn(usize, &str) -> Result<Vec<T>, E> + Send + Sync + 'static,
        count: impl Fn(&str) -> Result<usize, E> + Send + Sync + 'static,
    ) -> Self {
        let mut view = Self::new(options);
        view.load_from(paging, count);
        view
    }

    /// Attaches (or replaces) the backend providers, keeping the configured page size.
    ///
    /// Everything cached from the previous providers is dropped.
    pub fn load_from(
        &mut self,
        paging: impl Fn(usize, &str) -> Result<Vec<T>, E> + Send + Sync + 'static,
        count: impl Fn(&str) -> Result<usize, E> + Send + Sync + 'static,
    ) {
        self.set_providers(Arc::new(paging), Arc::new(count));
    }

    /// Like [`Self::load_from`], with an explicit page size.
    pub fn load_from_with_page_size(
        &mut self,
        paging: impl Fn(usize, &str) -> Result<Vec<T>, E> + Send + Sync + 'static,
        count: impl Fn(&str) -> Result<usize, E> + Send + Sync + 'static,
        page_size: usize,
    ) {
        let options = self.cache.options().with_page_size(page_size);
        self.cache.set_options(options);
        self.load_from(paging, count);
    }

    pub fn set_providers(
        &mut self,
        paging: FilterablePagingProvider<T, E>,
        count: FilterableCountProvider<E>,
    ) {
        fdebug!(filter = %self.current_filter, "FilterScopedListView::set_providers");
        self.providers = Some((paging, count));
        self.bind();
    }

    pub fn has_providers(&self) -> bool {
        self.providers.is_some()
    }

    /// Sets the filter typed by the user. `None` is the same as `""`.
    ///
    /// If the incoming string equals the caption of the current selection it is replaced by `""`
    /// first: select widgets re-issue the selected caption as a filter when their popup opens,
    /// and taking it literally would narrow the list to that single item.
    ///
    /// Returns `true` when the effective filter changed and the cache was invalidated.
    pub fn set_filter(&mut self, filter: Option<&str>) -> bool {
        let filter = self.effective_filter(filter.unwrap_or(""));
        if filter == self.current_filter {
            ftrace!(filter, "FilterScopedListView: filter unchanged");
            return false;
        }

        fdebug!(
            from = %self.current_filter,
            to = filter,
            "FilterScopedListView: filter changed"
        );
        self.current_filter = filter.to_owned();
        self.bind();
        true
    }

    /// Drops all cached rows and the cached size without touching the filter.
    ///
    /// Call this after the backing data changed out of band (e.g. after a write).
    pub fn refresh(&mut self) {
        fdebug!(filter = %self.current_filter, "FilterScopedListView::refresh");
        self.cache.invalidate();
    }

    pub fn get(&mut self, index: usize) -> lazylist::Result<&T, E> {
        self.cache.get(index)
    }

    pub fn size(&mut self) -> lazylist::Result<usize, E> {
        self.cache.size()
    }

    pub fn current_filter(&self) -> &str {
        &self.current_filter
    }

    pub fn filter_state(&self) -> FilterState<'_> {
        if self.current_filter.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::Filtered(&self.current_filter)
        }
    }

    /// Records the caption of the widget's current selection (or clears it).
    pub fn set_selected_caption(&mut self, caption: Option<&str>) {
        self.selected_caption = caption.map(ToOwned::to_owned);
    }

    pub fn selected_caption(&self) -> Option<&str> {
        self.selected_caption.as_deref()
    }

    pub fn page_size(&self) -> usize {
        self.cache.page_size()
    }

    /// Read-only access to the underlying cache, for diagnostics.
    pub fn cache(&self) -> &PageCache<T, E> {
        &self.cache
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            filter: self.current_filter.clone(),
            selected_caption: self.selected_caption.clone(),
            cache: self.cache.stats(),
        }
    }

    fn effective_filter<'a>(&self, filter: &'a str) -> &'a str {
        match &self.selected_caption {
            Some(caption) if caption == filter => "",
            _ => filter,
        }
    }

    // Rebinding replaces the fetchers, which also invalidates the cache.
    fn bind(&mut self) {
        let Some((paging, count)) = &self.providers else {
            self.cache.invalidate();
            return;
        };

        let filter: Arc<str> = Arc::from(self.current_filter.as_str());
        let row_fetcher: RowFetcher<T, E> = {
            let paging = Arc::clone(paging);
            let filter = Arc::clone(&filter);
            Arc::new(move |first_row: usize| paging(first_row, &*filter))
        };
        let size_fetcher: SizeFetcher<E> = {
            let count = Arc::clone(count);
            Arc::new(move || count(&*filter))
        };
        self.cache.set_fetchers(row_fetcher, size_fetcher);
    }
}

impl<T: fmt::Display + 'static, E: FetchError + 'static> FilterScopedListView<T, E> {
    /// Records `item` as the current selection, captioned by its `Display` output.
    pub fn select_item(&mut self, item: Option<&T>) {
        self.selected_caption = item.map(ToString::to_string);
    }
}

impl<T: 'static, E: FetchError + 'static> Default for FilterScopedListView<T, E> {
    fn default() -> Self {
        Self::new(PageCacheOptions::default())
    }
}

impl<T: 'static, E: FetchError + 'static> IndexedFilterableSource for FilterScopedListView<T, E> {
    type Item = T;
    type Error = E;

    fn get(&mut self, index: usize) -> lazylist::Result<&T, E> {
        FilterScopedListView::get(self, index)
    }

    fn size(&mut self) -> lazylist::Result<usize, E> {
        FilterScopedListView::size(self)
    }

    fn set_filter(&mut self, filter: Option<&str>) {
        FilterScopedListView::set_filter(self, filter);
    }

    fn refresh(&mut self) {
        FilterScopedListView::refresh(self);
    }
}

impl<T, E> fmt::Debug for FilterScopedListView<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterScopedListView")
            .field("current_filter", &self.current_filter)
            .field("selected_caption", &self.selected_caption)
            .field("has_providers", &self.providers.is_some())
            .field("cache", &self.cache)
            .finish()
    }
}
