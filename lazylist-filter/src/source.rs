use lazylist::FetchError;

/// The contract a select/combo-box widget needs from its data source.
///
/// The widget reads by index and drives filtering; it never sees pages, fetchers or cache state.
pub trait IndexedFilterableSource {
    type Item;
    type Error: FetchError;

    fn get(&mut self, index: usize) -> lazylist::Result<&Self::Item, Self::Error>;

    fn size(&mut self) -> lazylist::Result<usize, Self::Error>;

    /// `None` means "no filter", same as `Some("")`.
    fn set_filter(&mut self, filter: Option<&str>);

    /// Drops everything cached so the next read goes back to the backend.
    fn refresh(&mut self);
}
