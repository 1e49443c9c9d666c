/// A lightweight snapshot of a cache's bookkeeping, for diagnostics and UI debug overlays.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageCacheStats {
    pub page_size: usize,
    pub cached_pages: usize,
    /// `None` until the size has been fetched in the current epoch.
    pub known_size: Option<usize>,
}
