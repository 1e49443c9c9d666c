use core::fmt;

use snafu::Snafu;

/// Bound for errors produced by the fetch callbacks.
///
/// Anything printable qualifies: `&'static str`, `String`, `std::io::Error`, a backend's own
/// error enum, etc.
pub trait FetchError: fmt::Debug + fmt::Display {}
impl<T: fmt::Debug + fmt::Display> FetchError for T {}

/// Failures surfaced by [`crate::PageCache`].
///
/// None of these are retried or recovered from internally. On failure the cache is left exactly
/// as it was before the call: no partial page and no size is stored.
#[derive(Debug, Snafu)]
pub enum Error<E: FetchError> {
    /// The index is not below the current size, or the row fetcher returned a page too short to
    /// contain it.
    #[snafu(display("index {index} out of range for size {size}"))]
    IndexOutOfRange { index: usize, size: usize },

    /// The row or size fetcher failed. The callback's error is passed through unchanged.
    #[snafu(display("fetch failed: {error}"))]
    Fetch { error: E },

    /// The row fetcher returned more rows than the configured page size.
    #[snafu(display(
        "row fetcher returned {returned} rows starting at row {first_row}, page size is {page_size}"
    ))]
    ContractViolation {
        first_row: usize,
        page_size: usize,
        returned: usize,
    },
}

impl<E: FetchError> Error<E> {
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Returns the callback error for `Fetch`, `None` otherwise.
    pub fn fetch_error(&self) -> Option<&E> {
        match self {
            Self::Fetch { error } => Some(error),
            _ => None,
        }
    }
}

pub type Result<T, E> = core::result::Result<T, Error<E>>;
