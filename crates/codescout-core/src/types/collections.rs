//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeSet;

/// SmallVec optimized for import specifier lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
