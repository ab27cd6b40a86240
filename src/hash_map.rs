use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use crate::DefaultHashBuilder;
use crate::error::ConfigError;
use crate::error::KeyNotFoundError;
use crate::hash_table::HashTable;

/// A hash map implemented over the separate-chaining [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq`, hashing them through a configurable [`BuildHasher`] `S`
/// (by default [`DefaultHashBuilder`]). Keys are immutable once stored;
/// values may be mutated in place.
///
/// Two behaviors distinguish it from the standard library map:
///
/// - [`insert`](HashMap::insert) never overwrites: inserting a key that is
///   already present is a no-op that returns `false`, so the first value
///   for a key wins.
/// - The load factor is kept inside a configurable window: the table grows
///   when an insertion pushes `len / capacity` above the upper bound and
///   shrinks when a removal drops it below the lower bound, down to a
///   one-bucket floor.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut map: HashMap<String, i32> = HashMap::new();
/// assert!(map.insert("free".to_string(), 5));
/// assert!(!map.insert("free".to_string(), 9));
/// assert_eq!(map.get("free"), Some(&5));
/// ```
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> Clone for HashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with the default capacity, load-factor window,
    /// and hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map with a custom load-factor window.
    ///
    /// Fails with [`ConfigError::InvalidLoadFactors`] unless
    /// `0 < lower < upper < 1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<String, i32> = HashMap::with_load_factors(0.1, 0.9).unwrap();
    /// assert_eq!(map.lower_load_factor(), 0.1);
    ///
    /// assert!(HashMap::<String, i32>::with_load_factors(0.9, 0.1).is_err());
    /// ```
    pub fn with_load_factors(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        Self::with_load_factors_and_hasher(lower, upper, S::default())
    }

    /// Builds a map from parallel key and value sequences.
    ///
    /// Fails with [`ConfigError::LengthMismatch`] when the sequences differ
    /// in length. Each pair goes through [`insert`](HashMap::insert), so when
    /// a key occurs more than once the *first* occurrence's value is kept and
    /// the later pairs are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map = HashMap::<String, i32>::from_pairs(
    ///     vec!["a".to_string(), "a".to_string()],
    ///     vec![1, 2],
    /// )
    /// .unwrap();
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// ```
    pub fn from_pairs(keys: Vec<K>, values: Vec<V>) -> Result<Self, ConfigError> {
        if keys.len() != values.len() {
            return Err(ConfigError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut map = Self::new();
        for (key, value) in keys.into_iter().zip(values) {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates an empty map with a custom load-factor window and hasher
    /// builder.
    pub fn with_load_factors_and_hasher(
        lower: f64,
        upper: f64,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            table: HashTable::with_load_factors(lower, upper)?,
            hash_builder,
        })
    }

    fn make_hash<Q>(&self, key: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hash_builder.hash_one(key)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the current load factor, `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns the configured lower load-factor bound.
    pub fn lower_load_factor(&self) -> f64 {
        self.table.lower_load_factor()
    }

    /// Returns the configured upper load-factor bound.
    pub fn upper_load_factor(&self) -> f64 {
        self.table.upper_load_factor()
    }

    /// Inserts a key-value pair, returning `true` on success.
    ///
    /// If the key is already present the map is left completely unchanged
    /// and `false` is returned; the stored value is *not* overwritten.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// assert!(map.insert(37, "a"));
    /// assert!(!map.insert(37, "b"));
    /// assert_eq!(map.get(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let hash = self.make_hash(&key);
        if self.table.find(hash, |(k, _)| *k == key).is_some() {
            return false;
        }
        self.table.insert_unique(hash, (key, value));
        true
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<String, i32> = HashMap::new();
    /// map.insert("one".to_string(), 1);
    /// assert_eq!(map.get("one"), Some(&1));
    /// assert_eq!(map.get("two"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        self.table
            .find(hash, |(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        self.table
            .find_mut(hash, |(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Returns a reference to the value for `key`, or
    /// [`KeyNotFoundError`] if the key is absent.
    ///
    /// This is the checked counterpart of indexing; the returned reference
    /// is tied to the map's current storage and cannot be held across a
    /// structural mutation.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyNotFoundError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).ok_or(KeyNotFoundError)
    }

    /// Returns a mutable reference to the value for `key`, or
    /// [`KeyNotFoundError`] if the key is absent.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFoundError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(key).ok_or(KeyNotFoundError)
    }

    /// Returns `true` if the map contains the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// Removing an absent key returns `None` and changes nothing. A removal
    /// that drops the load factor below the lower bound halves the capacity
    /// (see [`HashTable::remove`] for the exact ordering).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        self.table
            .remove(hash, |(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if
    /// the key was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        self.table.remove(hash, |(k, _)| k.borrow() == key)
    }

    /// Returns the number of entries sharing the given key's bucket, a
    /// collision-depth diagnostic.
    ///
    /// Fails with [`KeyNotFoundError`] if the key is not in the map.
    pub fn bucket_size<Q>(&self, key: &Q) -> Result<usize, KeyNotFoundError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        if self.table.find(hash, |(k, _)| k.borrow() == key).is_none() {
            return Err(KeyNotFoundError);
        }
        Ok(self.table.bucket_len(hash))
    }

    /// Removes all entries. Capacity and the load-factor window are kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Gets the given key's entry in the map for in-place manipulation.
    ///
    /// `entry(key).or_default()` reproduces the classic "indexing creates a
    /// default-valued slot" behavior: an absent key is materialized with
    /// `V::default()` and a mutable reference to it is returned. Insertion
    /// through a vacant entry follows the same growth policy as
    /// [`insert`](HashMap::insert).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<String, i32> = HashMap::new();
    /// *map.entry("hits".to_string()).or_default() += 1;
    /// *map.entry("hits".to_string()).or_default() += 1;
    /// assert_eq!(map.get("hits"), Some(&2));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        let hash = self.make_hash(&key);
        if self.table.find(hash, |(k, _)| *k == key).is_some() {
            Entry::Occupied(OccupiedEntry {
                map: self,
                hash,
                key,
            })
        } else {
            Entry::Vacant(VacantEntry {
                map: self,
                hash,
                key,
            })
        }
    }

    /// Returns an iterator over the key-value pairs in bucket-index order,
    /// then intra-bucket insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the pairs with mutable references to the
    /// values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator that removes and yields all key-value pairs,
    /// leaving the map empty with its capacity preserved.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Two maps are equal when they hold the same entries *and* are configured
/// identically: same size, same capacity, same load-factor bounds, and every
/// entry of one present with an equal value in the other.
///
/// Two maps with identical contents but different configured bounds (or a
/// different capacity history) compare unequal.
impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len()
            || self.capacity() != other.capacity()
            || self.lower_load_factor() != other.lower_load_factor()
            || self.upper_load_factor() != other.upper_load_factor()
        {
            return false;
        }
        // Sizes match, so one-way containment is enough.
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|other_v| other_v == v))
    }
}

/// Read-only indexed access.
///
/// # Panics
///
/// Panics if the key is not present in the map. Use [`HashMap::at`] or
/// [`HashMap::get`] for a non-panicking lookup.
impl<K, V, S, Q> Index<&Q> for HashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found in map")
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Collects pairs with [`insert`](HashMap::insert) semantics: the first
    /// value seen for a key wins.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V, S = DefaultHashBuilder> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, S>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S>),
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    V: Default,
    S: BuildHasher,
{
    /// Inserts the default value if the entry is vacant and returns a
    /// mutable reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V, S = DefaultHashBuilder> {
    map: &'a mut HashMap<K, V, S>,
    hash: u64,
    key: K,
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Gets a reference to the key that would be used when inserting.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        // Absence was established when the entry was created; the exclusive
        // borrow has kept the map unchanged since.
        &mut self.map.table.insert_unique(self.hash, (self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
///
/// Accessors re-locate the entry by its stored hash and key, so the view
/// stays valid across the lifetime of the borrow without holding a raw
/// pointer into the bucket storage.
pub struct OccupiedEntry<'a, K, V, S = DefaultHashBuilder> {
    map: &'a mut HashMap<K, V, S>,
    hash: u64,
    key: K,
}

impl<'a, K, V, S> OccupiedEntry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        match self.map.table.find(self.hash, |(k, _)| *k == self.key) {
            Some((_, v)) => v,
            None => unreachable!("occupied entry lost its key"),
        }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        match self.map.table.find_mut(self.hash, |(k, _)| *k == self.key) {
            Some((_, v)) => v,
            None => unreachable!("occupied entry lost its key"),
        }
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        match self.map.table.find_mut(self.hash, |(k, _)| *k == self.key) {
            Some((_, v)) => v,
            None => unreachable!("occupied entry lost its key"),
        }
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        match self.map.table.remove(self.hash, |(k, _)| *k == self.key) {
            Some(pair) => pair,
            None => unreachable!("occupied entry lost its key"),
        }
    }
}

/// An iterator over the key-value pairs of a [`HashMap`].
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An iterator over the pairs of a [`HashMap`] with mutable value access.
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }
}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the key-value pairs of a [`HashMap`].
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An owning iterator over the key-value pairs of a [`HashMap`].
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
