use std::hash::BuildHasherDefault;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;


/// Use indexmap for insertion-ordered lookups and rustc_hash for fast hashing
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Insertion-ordered set, same hasher as `FxIndexMap`
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
