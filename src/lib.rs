//! A separate-chaining hash map with a configurable load-factor window.
//!
//! The crate is built in two layers:
//!
//! - [`HashTable`] is the storage engine: a power-of-two array of buckets,
//!   each an ordered chain of entries tagged with their full hash. It is
//!   keyless; callers supply a hash and an equality predicate, which lets
//!   the table rehash by stored hash alone.
//! - [`HashMap`] is the keyed API on top: `Hash + Eq` keys, borrowed-form
//!   lookups, an entry API, and iterators.
//!
//! Unlike most maps, capacity here moves in both directions. Each map
//! carries a `(lower, upper)` load-factor window (defaults `0.25` and
//! `0.75`); an insertion that pushes the load factor above the upper bound
//! doubles the bucket count, and a removal that drops it below the lower
//! bound halves it, down to a single bucket. Inserting an already-present
//! key never overwrites the stored value.
//!
//! The [`scan`] module puts the map to work: it scores text against a
//! phrase-to-weight table for the bundled `spam_detector` binary.
//!
//! # Examples
//!
//! ```rust
//! use chain_hash::HashMap;
//!
//! let mut map: HashMap<String, i64> = HashMap::new();
//! map.insert("free".to_string(), 5);
//! map.insert("winner".to_string(), 3);
//!
//! assert_eq!(map.get("free"), Some(&5));
//! assert_eq!(map.len(), 2);
//!
//! assert_eq!(map.remove("free"), Some(5));
//! assert!(!map.contains_key("free"));
//! ```

pub mod error;
pub mod hash_map;
pub mod hash_table;
pub mod scan;

pub use error::ConfigError;
pub use error::KeyNotFoundError;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_table::HashTable;

/// The default [`BuildHasher`](core::hash::BuildHasher) used by [`HashMap`].
pub type DefaultHashBuilder = foldhash::fast::RandomState;
