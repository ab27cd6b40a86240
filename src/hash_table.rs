use core::fmt::Debug;
use core::mem;

use crate::error::ConfigError;

/// Number of buckets a freshly constructed table starts with.
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor below which a removal halves the bucket array.
pub const DEFAULT_LOWER_LOAD_FACTOR: f64 = 0.25;

/// Load factor above which an insertion doubles the bucket array.
pub const DEFAULT_UPPER_LOAD_FACTOR: f64 = 0.75;

/// Shrinking stops here; a table always has at least one bucket.
const MIN_CAPACITY: usize = 1;

/// Capacity changes by exactly this factor, never by an arbitrary amount.
const RESIZE_FACTOR: usize = 2;

fn empty_buckets<V>(capacity: usize) -> Vec<Vec<(u64, V)>> {
    core::iter::repeat_with(Vec::new).take(capacity).collect()
}

/// A separate-chaining hash table with load-factor-driven resizing.
///
/// `HashTable<V>` stores values of type `V` in a power-of-two number of
/// buckets, each bucket an insertion-ordered vector of entries. The table
/// does not hash keys itself: every operation takes a precomputed `u64`
/// hash and an equality predicate, and each entry keeps its hash alongside
/// the value so that rehashing after a capacity change never re-invokes
/// user code.
///
/// The table maintains its load factor (`len / capacity`) inside a window
/// configured at construction: an insertion that pushes the load factor
/// above the upper bound doubles the capacity, and a removal that drops it
/// below the lower bound halves the capacity (never below one bucket).
/// Every resize redistributes all entries under the new bucket count.
///
/// ## Example
///
/// ```rust
/// use std::hash::BuildHasher;
///
/// use chain_hash::hash_table::HashTable;
///
/// let state = foldhash::fast::RandomState::default();
/// let mut table: HashTable<(String, i32)> = HashTable::new();
///
/// let hash = state.hash_one("free");
/// assert!(table.insert(hash, |(k, _)| k == "free", ("free".to_string(), 5)));
/// assert_eq!(
///     table.find(hash, |(k, _)| k == "free"),
///     Some(&("free".to_string(), 5))
/// );
/// ```
pub struct HashTable<V> {
    buckets: Vec<Vec<(u64, V)>>,
    len: usize,
    lower_load_factor: f64,
    upper_load_factor: f64,
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for HashTable<V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            lower_load_factor: self.lower_load_factor,
            upper_load_factor: self.upper_load_factor,
        }
    }
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor())
            .field(
                "bucket_lengths",
                &self.buckets.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with the default capacity (16 buckets) and the
    /// default load-factor window `(0.25, 0.75)`.
    pub fn new() -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            lower_load_factor: DEFAULT_LOWER_LOAD_FACTOR,
            upper_load_factor: DEFAULT_UPPER_LOAD_FACTOR,
        }
    }

    /// Creates an empty table with a custom load-factor window.
    ///
    /// Both bounds must lie strictly inside `(0, 1)` and the lower bound must
    /// be strictly less than the upper bound; anything else is rejected with
    /// [`ConfigError::InvalidLoadFactors`] and no table is constructed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let table: HashTable<u64> = HashTable::with_load_factors(0.1, 0.9).unwrap();
    /// assert_eq!(table.capacity(), 16);
    ///
    /// assert!(HashTable::<u64>::with_load_factors(0.9, 0.1).is_err());
    /// assert!(HashTable::<u64>::with_load_factors(0.0, 0.5).is_err());
    /// ```
    pub fn with_load_factors(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        if !(lower > 0.0 && upper < 1.0 && lower < upper) {
            return Err(ConfigError::InvalidLoadFactors { lower, upper });
        }
        Ok(Self {
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            lower_load_factor: lower,
            upper_load_factor: upper,
        })
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns the configured lower load-factor bound.
    pub fn lower_load_factor(&self) -> f64 {
        self.lower_load_factor
    }

    /// Returns the configured upper load-factor bound.
    pub fn upper_load_factor(&self) -> f64 {
        self.upper_load_factor
    }

    fn bucket_index(&self, hash: u64) -> usize {
        // Capacity is a power of two, so masking is equivalent to modulo.
        hash as usize & (self.capacity() - 1)
    }

    /// Inserts `value` under `hash` unless an entry matching `eq` is already
    /// present, in which case the table is left untouched and `false` is
    /// returned.
    ///
    /// The size is counted up before the growth check, so an insertion that
    /// lands exactly above the upper bound doubles the capacity first and
    /// the new entry is placed into its bucket under the new layout.
    pub fn insert(&mut self, hash: u64, eq: impl Fn(&V) -> bool, value: V) -> bool {
        if self.find(hash, &eq).is_some() {
            return false;
        }
        self.insert_unique(hash, value);
        true
    }

    /// Inserts `value` under `hash` without checking for a duplicate and
    /// returns a mutable reference to the stored entry.
    ///
    /// The caller must have established that no matching entry exists; this
    /// is the placement half of [`insert`](HashTable::insert), used by entry
    /// views that have already probed the table.
    pub fn insert_unique(&mut self, hash: u64, value: V) -> &mut V {
        self.len += 1;
        if self.load_factor() > self.upper_load_factor {
            self.resize(self.capacity() * RESIZE_FACTOR);
        }
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];
        bucket.push((hash, value));
        let slot = bucket.len() - 1;
        &mut bucket[slot].1
    }

    /// Returns a reference to the entry matching `hash` and `eq`, if any.
    ///
    /// Runs in time proportional to the length of the target bucket.
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|(h, v)| *h == hash && eq(v))
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the entry matching `hash` and `eq`.
    ///
    /// The reference is tied to the table's current storage; the borrow
    /// checker prevents holding it across any structural mutation.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.bucket_index(hash);
        self.buckets[index]
            .iter_mut()
            .find(|(h, v)| *h == hash && eq(v))
            .map(|(_, v)| v)
    }

    /// Removes and returns the entry matching `hash` and `eq`, or `None` if
    /// no such entry exists.
    ///
    /// The shrink decision uses the decremented size but happens before the
    /// physical removal: when a removal drops the load factor below the lower
    /// bound, the table rehashes into the halved capacity with the entry
    /// still present, then removes it from the bucket it occupies under the
    /// new layout. Remaining entries in that bucket keep their relative
    /// order.
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        if self.find(hash, &eq).is_none() {
            return None;
        }
        self.len -= 1;
        if self.load_factor() < self.lower_load_factor && self.capacity() > MIN_CAPACITY {
            self.resize(self.capacity() / RESIZE_FACTOR);
        }
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(h, v)| *h == hash && eq(v))?;
        Some(bucket.remove(position).1)
    }

    /// Returns the number of entries sharing the bucket that `hash` maps to.
    pub fn bucket_len(&self, hash: u64) -> usize {
        self.buckets[self.bucket_index(hash)].len()
    }

    /// Removes every entry. Capacity and the load-factor window are kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator over the entries in bucket-index order, then
    /// intra-bucket insertion order.
    ///
    /// A fresh iterator may be created at any time; the shared borrow keeps
    /// the table structurally stable for the iterator's whole lifetime.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            bucket: 0,
            slot: 0,
            remaining: self.len,
        }
    }

    /// Returns an iterator over mutable references to the entries, in the
    /// same order as [`iter`](HashTable::iter).
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            outer: self.buckets.iter_mut(),
            inner: Default::default(),
        }
    }

    /// Returns a draining iterator that yields every entry by value and
    /// leaves the table empty with its capacity preserved.
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            bucket: 0,
            current: Vec::new().into_iter(),
            table: self,
        }
    }

    /// Reallocates the bucket array at `new_capacity` and redistributes
    /// every entry by its stored hash. Relative order within a new bucket is
    /// old-iteration order.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity.is_power_of_two());
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let mask = new_capacity - 1;
        for bucket in old {
            for (hash, value) in bucket {
                self.buckets[hash as usize & mask].push((hash, value));
            }
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over references to the entries of a [`HashTable`].
///
/// Created by [`HashTable::iter`]. Yields entries in bucket-index order,
/// skipping empty buckets, then in insertion order within each bucket.
pub struct Iter<'a, V> {
    table: &'a HashTable<V>,
    bucket: usize,
    slot: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket < self.table.buckets.len() {
            let bucket = &self.table.buckets[self.bucket];
            if self.slot < bucket.len() {
                let (_, value) = &bucket[self.slot];
                self.slot += 1;
                self.remaining -= 1;
                return Some(value);
            }
            self.bucket += 1;
            self.slot = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// An iterator over mutable references to the entries of a [`HashTable`].
///
/// Created by [`HashTable::iter_mut`].
pub struct IterMut<'a, V> {
    outer: core::slice::IterMut<'a, Vec<(u64, V)>>,
    inner: core::slice::IterMut<'a, (u64, V)>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.inner.next() {
                return Some(value);
            }
            self.inner = self.outer.next()?.iter_mut();
        }
    }
}

/// A draining iterator over the values of a [`HashTable`].
///
/// Created by [`HashTable::drain`]. Yields owned values and empties the
/// table as it goes; dropping it mid-way removes the rest.
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    current: std::vec::IntoIter<(u64, V)>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.current.next() {
                self.table.len -= 1;
                return Some(value);
            }
            if self.bucket >= self.table.buckets.len() {
                return None;
            }
            self.current = mem::take(&mut self.table.buckets[self.bucket]).into_iter();
            self.bucket += 1;
        }
    }
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

/// An owning iterator over the values of a [`HashTable`].
///
/// Created by the `IntoIterator` impl for `HashTable<V>`.
pub struct IntoIter<V> {
    buckets: std::vec::IntoIter<Vec<(u64, V)>>,
    current: std::vec::IntoIter<(u64, V)>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.current.next() {
                return Some(value);
            }
            self.current = self.buckets.next()?.into_iter();
        }
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            current: Vec::new().into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn hash_key(&self, key: u64) -> u64 {
            let mut h = SipHasher::new_with_keys(self.k0, self.k1);
            h.write_u64(key);
            h.finish()
        }
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        key: u64,
        value: i32,
    }

    fn item(key: u64, value: i32) -> Item {
        Item { key, value }
    }

    // The upper bound holds after every insert; the lower bound only after
    // every remove (a young table may sit below it).
    fn check_upper<V>(table: &HashTable<V>) {
        assert!(
            table.load_factor() <= table.upper_load_factor(),
            "load factor above upper bound: {:#?}",
            table
        );
    }

    fn check_lower<V>(table: &HashTable<V>) {
        assert!(
            table.load_factor() >= table.lower_load_factor() || table.capacity() == 1,
            "load factor below lower bound off the floor: {:#?}",
            table
        );
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..32u64 {
            let hash = state.hash_key(k);
            assert!(table.insert(hash, |v| v.key == k, item(k, (k as i32) * 2)));
            assert_eq!(
                table.find(hash, |v| v.key == k),
                Some(&item(k, (k as i32) * 2)),
                "{:#?}",
                table
            );
        }
        assert_eq!(table.len(), 32);

        let miss_hash = state.hash_key(999);
        assert!(table.find(miss_hash, |v| v.key == 999).is_none());
    }

    #[test]
    fn duplicate_insert_is_rejected_unchanged() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let hash = state.hash_key(42);

        assert!(table.insert(hash, |v| v.key == 42, item(42, 7)));
        assert!(!table.insert(hash, |v| v.key == 42, item(42, 11)));
        assert_eq!(table.len(), 1);
        // The stored value is not overwritten by the rejected insert.
        assert_eq!(table.find(hash, |v| v.key == 42).unwrap().value, 7);
    }

    #[test]
    fn find_mut_updates_in_place() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..5u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, 1));
        }
        for k in 0..5u64 {
            let hash = state.hash_key(k);
            table.find_mut(hash, |v| v.key == k).unwrap().value += 9;
        }
        for k in 0..5u64 {
            let hash = state.hash_key(k);
            assert_eq!(table.find(hash, |v| v.key == k).unwrap().value, 10);
        }
    }

    #[test]
    fn iter_mut_visits_every_entry() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..12u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, 0));
        }
        for v in table.iter_mut() {
            v.value = v.key as i32 + 1;
        }
        for k in 0..12u64 {
            let hash = state.hash_key(k);
            assert_eq!(table.find(hash, |v| v.key == k).unwrap().value, k as i32 + 1);
        }
    }

    #[test]
    fn remove_present_and_absent() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..8u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
        }
        for k in [0u64, 3, 7] {
            let hash = state.hash_key(k);
            let removed = table.remove(hash, |v| v.key == k).expect("should remove");
            assert_eq!(removed.key, k);
        }
        assert_eq!(table.len(), 5);

        let hash = state.hash_key(1000);
        assert!(table.remove(hash, |v| v.key == 1000).is_none());
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn growth_keeps_load_factor_within_bounds() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        assert_eq!(table.capacity(), 16);

        for k in 0..20u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
            check_upper(&table);
        }

        // 13/16 exceeds 0.75, so at least one doubling must have happened.
        assert_eq!(table.len(), 20);
        assert!(table.capacity() >= 32, "{:#?}", table);

        for k in 0..20u64 {
            let hash = state.hash_key(k);
            assert_eq!(
                table.find(hash, |v| v.key == k).map(|v| v.value),
                Some(k as i32)
            );
        }
    }

    #[test]
    fn shrink_happens_before_physical_removal() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        // Fill past one doubling, then remove until the table shrinks back.
        for k in 0..20u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
        }
        let grown = table.capacity();
        assert!(grown >= 32);

        for k in (0..20u64).rev() {
            let hash = state.hash_key(k);
            let removed = table.remove(hash, |v| v.key == k);
            assert_eq!(removed.map(|v| v.key), Some(k));
            check_upper(&table);
            // A remove halves at most once, so an emptied table may sit
            // below the lower bound with more than one bucket left.
            if !table.is_empty() {
                check_lower(&table);
            }
            // Everything still present must remain findable after any
            // shrink-triggered rehash.
            for live in 0..k {
                let live_hash = state.hash_key(live);
                assert!(
                    table.find(live_hash, |v| v.key == live).is_some(),
                    "{:#?}",
                    table
                );
            }
        }
        assert!(table.is_empty());
        assert!(table.capacity() < grown);
    }

    #[test]
    fn single_remove_shrinks_once_not_to_the_floor() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let hash = state.hash_key(1);
        table.insert(hash, |v| v.key == 1, item(1, 1));

        // 0/16 is below the lower bound, but a remove halves exactly once.
        table.remove(hash, |v| v.key == 1).unwrap();
        assert_eq!(table.capacity(), 8);
    }

    #[test]
    fn shrink_clamps_at_one_bucket() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for round in 0..16u64 {
            let hash = state.hash_key(round);
            table.insert(hash, |v| v.key == round, item(round, 0));
            table.remove(hash, |v| v.key == round).unwrap();
        }
        assert_eq!(table.capacity(), 1);

        // Still usable at the floor.
        let hash = state.hash_key(99);
        assert!(table.insert(hash, |v| v.key == 99, item(99, 9)));
        assert!(table.find(hash, |v| v.key == 99).is_some());
    }

    #[test]
    fn clear_preserves_capacity_and_bounds() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_load_factors(0.3, 0.8).unwrap();
        for k in 0..20u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
        }
        let capacity = table.capacity();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.lower_load_factor(), 0.3);
        assert_eq!(table.upper_load_factor(), 0.8);
    }

    #[test]
    fn invalid_load_factors_rejected() {
        for (lower, upper) in [
            (0.0, 0.75),
            (0.25, 1.0),
            (-0.1, 0.5),
            (0.5, 0.5),
            (0.75, 0.25),
            (0.5, 1.5),
        ] {
            match HashTable::<Item>::with_load_factors(lower, upper) {
                Err(ConfigError::InvalidLoadFactors { .. }) => {}
                other => panic!("expected invalid factors for ({lower}, {upper}): {other:?}"),
            }
        }
    }

    #[test]
    fn iter_yields_every_entry_once() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 10..30u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
        }

        assert_eq!(table.iter().len(), 20);
        let mut collected: Vec<u64> = table.iter().map(|v| v.key).collect();
        collected.sort_unstable();
        assert_eq!(collected, (10..30u64).collect::<Vec<_>>());
    }

    #[test]
    fn collisions_chain_in_insertion_order() {
        // A constant hash forces every entry into one bucket; the chain must
        // keep insertion order and still resolve by the predicate.
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..5u64 {
            assert!(table.insert(7, |v| v.key == k, item(k, k as i32)));
        }
        assert_eq!(table.bucket_len(7), 5);
        let chained: Vec<u64> = table.iter().map(|v| v.key).collect();
        assert_eq!(chained, vec![0, 1, 2, 3, 4]);

        // Removing from the middle preserves the order of the rest.
        table.remove(7, |v| v.key == 2).unwrap();
        let chained: Vec<u64> = table.iter().map(|v| v.key).collect();
        assert_eq!(chained, vec![0, 1, 3, 4]);
    }

    #[test]
    fn resize_preserves_content() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let mut expected: Vec<(u64, i32)> = Vec::new();
        for k in 0..100u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, (k as i32) * 3));
            expected.push((k, (k as i32) * 3));
        }
        let mut seen: Vec<(u64, i32)> = table.iter().map(|v| (v.key, v.value)).collect();
        seen.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn drain_empties_but_keeps_capacity() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..20u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
        }
        let capacity = table.capacity();
        let drained: Vec<Item> = table.drain().collect();
        assert_eq!(drained.len(), 20);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
    }

    #[test]
    fn partial_drain_drop_still_empties() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..10u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
        }
        {
            let mut drain = table.drain();
            let _ = drain.next();
            let _ = drain.next();
        }
        assert!(table.is_empty());
    }

    #[test]
    fn clone_is_deep() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let hash = state.hash_key(1);
        table.insert(hash, |v| v.key == 1, item(1, 1));

        let mut copy = table.clone();
        copy.find_mut(hash, |v| v.key == 1).unwrap().value = 99;
        assert_eq!(table.find(hash, |v| v.key == 1).unwrap().value, 1);
        assert_eq!(copy.find(hash, |v| v.key == 1).unwrap().value, 99);
    }

    #[test]
    fn into_iter_yields_owned_values() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..6u64 {
            let hash = state.hash_key(k);
            table.insert(hash, |v| v.key == k, item(k, k as i32));
        }
        let mut keys: Vec<u64> = table.into_iter().map(|v| v.key).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![0, 1, 2, 3, 4, 5]);
    }
}
