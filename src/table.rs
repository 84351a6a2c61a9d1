use crate::error::{Error, Result};
use crate::raw::{self, ProbeMode, RawTable};

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::ops::Index;

// The capacity used by `ProbingTable::default` and the builder.
const DEFAULT_CAPACITY: usize = 8;

// The load factor threshold used by `ProbingTable::default` and the builder.
const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.75;

/// An open-addressing hash table.
///
/// Entries live directly in a fixed-size array of slots. Each key is placed by walking
/// a deterministic probe sequence starting at `hash % capacity`, see [`ProbeMode`] for
/// how the walk advances. Inserting a new key doubles the capacity first if the insert
/// would take the [load factor](ProbingTable::load_factor) to or above the configured
/// threshold.
///
/// Deleted entries leave a tombstone behind, so keys further along the same probe
/// sequence remain reachable. Tombstones are cleared whenever the table is rebuilt.
///
/// See the [crate-level documentation](crate) for details.
pub struct ProbingTable<K, V, S = RandomState> {
    raw: RawTable<K, V, S>,
}

/// A builder for a [`ProbingTable`].
///
/// # Examples
///
/// ```rust
/// use probing_table::{ProbeMode, ProbingTable};
/// use std::collections::hash_map::RandomState;
///
/// let table: ProbingTable<&str, i32> = ProbingTable::builder()
///     // Set the initial number of slots.
///     .capacity(64)
///     // Grow once half of the slots are occupied.
///     .load_factor_threshold(0.5)
///     // Step through collisions with the secondary hash.
///     .probe_mode(ProbeMode::DoubleHash)
///     // Set the hasher.
///     .hasher(RandomState::new())
///     // Construct the table.
///     .build()?;
///
/// assert_eq!(table.capacity(), 64);
/// # Ok::<(), probing_table::Error>(())
/// ```
pub struct ProbingTableBuilder<K, V, S = RandomState> {
    capacity: usize,
    load_factor_threshold: f64,
    probe_mode: ProbeMode,
    hasher: S,
    _kv: PhantomData<(K, V)>,
}

impl<K, V> ProbingTableBuilder<K, V> {
    /// Set the hash builder used to hash keys.
    ///
    /// Warning: `hash_builder` is normally randomly generated, and is designed
    /// to allow tables to be resistant to attacks that cause many collisions
    /// and very poor performance. Setting it manually using this function can
    /// expose a DoS attack vector.
    pub fn hasher<S>(self, hasher: S) -> ProbingTableBuilder<K, V, S> {
        ProbingTableBuilder {
            hasher,
            capacity: self.capacity,
            load_factor_threshold: self.load_factor_threshold,
            probe_mode: self.probe_mode,
            _kv: PhantomData,
        }
    }
}

impl<K, V, S> ProbingTableBuilder<K, V, S> {
    /// Set the initial number of slots in the table.
    ///
    /// The capacity must be at least 1.
    pub fn capacity(self, capacity: usize) -> Self {
        ProbingTableBuilder { capacity, ..self }
    }

    /// Set the load factor at which the table grows.
    ///
    /// The threshold must be strictly between 0 and 1.
    pub fn load_factor_threshold(self, load_factor_threshold: f64) -> Self {
        ProbingTableBuilder {
            load_factor_threshold,
            ..self
        }
    }

    /// Set the probing strategy of the table. See [`ProbeMode`] for details.
    pub fn probe_mode(self, probe_mode: ProbeMode) -> Self {
        ProbingTableBuilder { probe_mode, ..self }
    }

    /// Construct a [`ProbingTable`] from the builder, using the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the capacity is 0 or the load factor
    /// threshold is not strictly between 0 and 1.
    pub fn build(self) -> Result<ProbingTable<K, V, S>> {
        if self.capacity < 1 {
            return Err(Error::InvalidArgument(format!(
                "capacity must be at least 1, got {}",
                self.capacity
            )));
        }

        if !(self.load_factor_threshold > 0.0 && self.load_factor_threshold < 1.0) {
            return Err(Error::InvalidArgument(format!(
                "load factor threshold must be between 0 and 1 exclusive, got {}",
                self.load_factor_threshold
            )));
        }

        Ok(ProbingTable {
            raw: RawTable::new(
                self.capacity,
                self.load_factor_threshold,
                self.probe_mode,
                self.hasher,
            ),
        })
    }
}

impl<K, V, S> fmt::Debug for ProbingTableBuilder<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbingTableBuilder")
            .field("capacity", &self.capacity)
            .field("load_factor_threshold", &self.load_factor_threshold)
            .field("probe_mode", &self.probe_mode)
            .finish()
    }
}

impl<K, V> ProbingTable<K, V> {
    /// Creates an empty `ProbingTable` with `capacity` slots that grows once the
    /// load factor reaches `load_factor_threshold`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is 0 or `load_factor_threshold`
    /// is not strictly between 0 and 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::{Error, ProbingTable};
    ///
    /// let table: ProbingTable<&str, i32> = ProbingTable::new(8, 0.75)?;
    /// assert_eq!(table.capacity(), 8);
    ///
    /// assert!(matches!(ProbingTable::<&str, i32>::new(0, 0.5), Err(Error::InvalidArgument(_))));
    /// assert!(matches!(ProbingTable::<&str, i32>::new(8, 1.0), Err(Error::InvalidArgument(_))));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn new(capacity: usize, load_factor_threshold: f64) -> Result<ProbingTable<K, V>> {
        ProbingTable::with_hasher(capacity, load_factor_threshold, RandomState::new())
    }

    /// Returns a builder for a `ProbingTable`.
    ///
    /// The builder can be used for more complex configuration, such as using
    /// a custom hasher or [`ProbeMode`].
    pub fn builder() -> ProbingTableBuilder<K, V> {
        ProbingTableBuilder {
            capacity: DEFAULT_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            probe_mode: ProbeMode::default(),
            hasher: RandomState::new(),
            _kv: PhantomData,
        }
    }
}

impl<K, V, S> Default for ProbingTable<K, V, S>
where
    S: Default,
{
    /// Creates an empty table with 8 slots and a load factor threshold of 0.75.
    fn default() -> Self {
        ProbingTable {
            raw: RawTable::new(
                DEFAULT_CAPACITY,
                DEFAULT_LOAD_FACTOR_THRESHOLD,
                ProbeMode::default(),
                S::default(),
            ),
        }
    }
}

impl<K, V, S> ProbingTable<K, V, S> {
    /// Creates an empty `ProbingTable` which will use the given hash builder to hash
    /// keys.
    ///
    /// Warning: `hash_builder` is normally randomly generated, and is designed
    /// to allow tables to be resistant to attacks that cause many collisions
    /// and very poor performance. Setting it manually using this function can
    /// expose a DoS attack vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let mut table = ProbingTable::with_hasher(8, 0.75, RandomState::new())?;
    /// table.set(1, "a")?;
    /// # Ok::<(), probing_table::Error>(())
    /// ```
    pub fn with_hasher(
        capacity: usize,
        load_factor_threshold: f64,
        hash_builder: S,
    ) -> Result<ProbingTable<K, V, S>> {
        ProbingTableBuilder {
            capacity,
            load_factor_threshold,
            probe_mode: ProbeMode::default(),
            hasher: hash_builder,
            _kv: PhantomData,
        }
        .build()
    }

    /// Returns the number of slots in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new(2, 0.75)?;
    /// assert_eq!(table.capacity(), 2);
    ///
    /// table.set("a", 1)?;
    /// table.set("b", 2)?;
    /// assert_eq!(table.capacity(), 4);
    /// # Ok::<(), probing_table::Error>(())
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ratio of occupied slots to capacity.
    ///
    /// The value is computed on every call. Tombstones left by deleted entries
    /// are not counted.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new(8, 0.75)?;
    /// table.set("a", 1)?;
    /// table.set("b", 2)?;
    /// assert_eq!(table.load_factor(), 0.25);
    /// # Ok::<(), probing_table::Error>(())
    /// ```
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    /// Returns the load factor at which the table grows.
    #[inline]
    pub fn load_factor_threshold(&self) -> f64 {
        self.raw.threshold()
    }

    /// Returns the probing strategy of the table.
    #[inline]
    pub fn probe_mode(&self) -> ProbeMode {
        self.raw.mode()
    }

    /// Returns a reference to the table's [`BuildHasher`].
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.raw.hasher
    }

    /// Removes every entry from the table, keeping its capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear()
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    ///
    /// Every entry is yielded exactly once, so equal values stored under different
    /// keys appear separately.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let table = ProbingTable::from([("a", 1), ("b", 1)]);
    ///
    /// let mut pairs: Vec<_> = table.pairs().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&"a", &1), (&"b", &1)]);
    /// ```
    #[inline]
    pub fn pairs(&self) -> Iter<'_, K, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    ///
    /// This is the same as [`ProbingTable::pairs`].
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.pairs()
    }

    /// An iterator visiting all keys in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let table = ProbingTable::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// for key in table.keys() {
    ///     println!("{key}");
    /// }
    /// ```
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.pairs() }
    }

    /// An iterator visiting all values in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let table = ProbingTable::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// let total: i32 = table.values().sum();
    /// assert_eq!(total, 6);
    /// ```
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.pairs() }
    }
}

impl<K, V, S> ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the table's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::{Error, ProbingTable};
    ///
    /// let mut table = ProbingTable::new(8, 0.75)?;
    /// table.set(1, "a")?;
    /// assert_eq!(table.get(&1), Ok(&"a"));
    /// assert_eq!(table.get(&2), Err(Error::KeyNotFound));
    /// # Ok::<(), Error>(())
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the table.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new(8, 0.75)?;
    /// table.set(1, 10)?;
    /// *table.get_mut(&1)? += 5;
    /// assert_eq!(table[&1], 15);
    /// # Ok::<(), probing_table::Error>(())
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the table contains a value for the specified key.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key).is_some()
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the key was already present its value is replaced in place and the old
    /// value is returned; the key itself is not updated. Otherwise `None` is
    /// returned. If inserting a new key would take the load factor to or above the
    /// threshold, the table is first rebuilt with twice the capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableFull`] if no free slot is found in the probe sequence.
    /// Growth keeps free slots available, so this indicates a bug in the table
    /// rather than a condition callers are expected to handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new(8, 0.75)?;
    /// assert_eq!(table.set(37, "a")?, None);
    /// assert_eq!(table.is_empty(), false);
    ///
    /// table.set(37, "b")?;
    /// assert_eq!(table.set(37, "c")?, Some("b"));
    /// assert_eq!(table[&37], "c");
    /// # Ok::<(), probing_table::Error>(())
    /// ```
    #[inline]
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the table, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::{Error, ProbingTable};
    ///
    /// let mut table = ProbingTable::new(8, 0.75)?;
    /// table.set(1, "a")?;
    /// assert_eq!(table.delete(&1), Ok("a"));
    /// assert_eq!(table.delete(&1), Err(Error::KeyNotFound));
    /// # Ok::<(), Error>(())
    /// ```
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.raw.remove(key) {
            Some((_, value)) => Ok(value),
            None => Err(Error::KeyNotFound),
        }
    }
}

impl<K, V, S> PartialEq for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> fmt::Debug for ProbingTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Renders `{key: value, key: value}` using the `Debug` form of each key and value.
impl<K, V, S> fmt::Display for ProbingTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{key:?}: {value:?}")?;
        }

        f.write_str("}")
    }
}

impl<K, V, S> Clone for ProbingTable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> ProbingTable<K, V, S> {
        ProbingTable {
            raw: self.raw.clone(),
        }
    }
}

impl<K, Q, V, S> Index<&Q> for ProbingTable<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the table.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts every pair from the iterator.
    ///
    /// # Panics
    ///
    /// Panics if an insert fails with [`Error::TableFull`].
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if let Err(err) = self.set(key, value) {
                panic!("{err}");
            }
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for ProbingTable<K, V, S>
where
    K: Copy + Hash + Eq + 'a,
    V: Copy + 'a,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ProbingTable<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn from(arr: [(K, V); N]) -> Self {
        ProbingTable::from_iter(arr)
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();

        // size the table so the lower bound of entries fits below the default threshold
        let (lower, _) = iter.size_hint();
        let capacity = (lower.saturating_mul(4) / 3)
            .saturating_add(1)
            .max(DEFAULT_CAPACITY);

        let mut table = ProbingTable {
            raw: RawTable::new(
                capacity,
                DEFAULT_LOAD_FACTOR_THRESHOLD,
                ProbeMode::default(),
                S::default(),
            ),
        };

        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingTable<K, V, S> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    /// Iterating over a table yields its keys.
    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

/// An iterator over a table's entries.
///
/// This struct is created by the [`pairs`](ProbingTable::pairs) method on [`ProbingTable`].
/// See its documentation for details.
pub struct Iter<'t, K, V> {
    raw: raw::Iter<'t, K, V>,
}

impl<'t, K: 't, V: 't> Iterator for Iter<'t, K, V> {
    type Item = (&'t K, &'t V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a table's keys.
///
/// This struct is created by the [`keys`](ProbingTable::keys) method on [`ProbingTable`].
/// See its documentation for details.
pub struct Keys<'t, K, V> {
    iter: Iter<'t, K, V>,
}

impl<'t, K: 't, V: 't> Iterator for Keys<'t, K, V> {
    type Item = &'t K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.iter.next()?;
        Some(key)
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            iter: self.iter.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Keys<'_, K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a table's values.
///
/// This struct is created by the [`values`](ProbingTable::values) method on [`ProbingTable`].
/// See its documentation for details.
pub struct Values<'t, K, V> {
    iter: Iter<'t, K, V>,
}

impl<'t, K: 't, V: 't> Iterator for Values<'t, K, V> {
    type Item = &'t V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.iter.next()?;
        Some(value)
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            iter: self.iter.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Values<'_, K, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let mut table = ProbingTable::new(8, 0.75).unwrap();
        assert_eq!(table.to_string(), "{}");

        table.set("a", 1).unwrap();
        assert_eq!(table.to_string(), r#"{"a": 1}"#);

        table.set("b", 2).unwrap();
        let formatted = table.to_string();
        assert!(formatted == r#"{"a": 1, "b": 2}"# || formatted == r#"{"b": 2, "a": 1}"#);
    }

    #[test]
    fn builder_validation() {
        let err = ProbingTable::<u8, u8>::builder().capacity(0).build();
        assert!(matches!(err, Err(Error::InvalidArgument(_))));

        for threshold in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = ProbingTable::<u8, u8>::builder()
                .load_factor_threshold(threshold)
                .build();
            assert!(matches!(err, Err(Error::InvalidArgument(_))));
        }

        let table = ProbingTable::<u8, u8>::builder()
            .capacity(1)
            .load_factor_threshold(0.01)
            .probe_mode(ProbeMode::DoubleHash)
            .build()
            .unwrap();
        assert_eq!(table.capacity(), 1);
        assert_eq!(table.load_factor_threshold(), 0.01);
        assert_eq!(table.probe_mode(), ProbeMode::DoubleHash);
    }

    #[test]
    fn default() {
        let table: ProbingTable<u8, u8> = ProbingTable::default();
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.load_factor_threshold(), 0.75);
        assert_eq!(table.probe_mode(), ProbeMode::Linear);
    }

    #[test]
    fn from_iter_sizes_for_hint() {
        let table: ProbingTable<usize, usize> = (0..300).map(|i| (i, i)).collect();
        assert_eq!(table.len(), 300);
        assert_eq!(table.capacity(), 401);
        assert!(table.load_factor() < 0.75);
    }

    #[test]
    #[should_panic(expected = "key not found")]
    fn index_missing() {
        let table: ProbingTable<u8, u8> = ProbingTable::default();
        let _ = table[&1];
    }
}
