#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(not(feature = "std"))]
pub(crate) use alloc::collections::btree_map::Entry;
#[cfg(feature = "std")]
pub(crate) use std::collections::hash_map::Entry;

#[cfg(feature = "std")]
pub(crate) type PageMap<T> = HashMap<usize, alloc::vec::Vec<T>>;
#[cfg(not(feature = "std"))]
pub(crate) type PageMap<T> = BTreeMap<usize, alloc::vec::Vec<T>>;
