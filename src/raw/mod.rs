mod probe;

pub use probe::ProbeMode;

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::{iter, mem, slice};

use log::{debug, error, trace};

use self::probe::{largest_prime, Probe};
use crate::error::{Error, Result};

// A slot in the table.
#[derive(Clone, Debug)]
pub enum Slot<K, V> {
    // the slot has never held an entry since the last rebuild, a probe
    // that reaches it can stop
    Empty,
    // the slot held an entry that was deleted. probes continue past it and
    // inserts may reuse it
    Tombstone,
    Occupied(K, V),
}

// The result of walking the probe sequence for a key.
enum Search {
    // The key lives in the slot at this index.
    Found(usize),
    // The key is not in the table. Holds the first reusable slot seen on the
    // walk, if there was one.
    Vacant(Option<usize>),
}

// An open-addressing hash table.
pub struct RawTable<K, V, S> {
    slots: Box<[Slot<K, V>]>,
    // `largest_prime(slots.len())`, recomputed on every rebuild
    prime: Option<usize>,
    // the number of occupied slots
    len: usize,
    // the number of tombstones since the last rebuild
    tombstones: usize,
    threshold: f64,
    mode: ProbeMode,
    pub hasher: S,
}

// Allocate `capacity` empty slots.
fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

impl<K, V, S> RawTable<K, V, S> {
    // Creates a table with `capacity` empty slots.
    //
    // The caller is responsible for validating `capacity >= 1` and
    // `0 < threshold < 1`.
    pub fn new(
        capacity: usize,
        threshold: f64,
        mode: ProbeMode,
        hasher: S,
    ) -> RawTable<K, V, S> {
        RawTable {
            slots: empty_slots(capacity),
            prime: largest_prime(capacity),
            len: 0,
            tombstones: 0,
            threshold,
            mode,
            hasher,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn mode(&self) -> ProbeMode {
        self.mode
    }

    // The ratio of occupied slots to capacity.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    // Returns `true` if holding `entries` slots would reach the load factor threshold.
    #[inline]
    fn reaches_threshold(&self, entries: usize) -> bool {
        entries as f64 / self.capacity() as f64 >= self.threshold
    }

    // Reset every slot to empty, keeping the current capacity.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }

        self.len = 0;
        self.tombstones = 0;
    }

    // Returns an iterator over the occupied slots, in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    #[inline]
    fn probe(&self, hash: u64) -> Probe {
        Probe::start(hash, self.capacity(), self.prime, self.mode)
    }
}

impl<K, V, S> RawTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    // Walk the probe sequence for `key`.
    //
    // The walk stops at the matching slot or the first empty slot. Tombstones
    // never stop a walk, as the key may have been pushed past the slot before
    // it was deleted.
    fn search<Q>(&self, hash: u64, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut probe = self.probe(hash);
        let mut reusable = None;

        while !probe.exhausted() {
            match &self.slots[probe.i] {
                Slot::Empty => {
                    trace!(
                        "probe ended at empty slot {} after {} collisions",
                        probe.i,
                        probe.collisions
                    );

                    return Search::Vacant(reusable.or(Some(probe.i)));
                }
                Slot::Tombstone => {
                    if reusable.is_none() {
                        reusable = Some(probe.i);
                    }
                }
                Slot::Occupied(k, _) if k.borrow() == key => {
                    trace!(
                        "found key at slot {} after {} collisions",
                        probe.i,
                        probe.collisions
                    );

                    return Search::Found(probe.i);
                }
                Slot::Occupied(..) => probe.collisions += 1,
            }

            probe.next();
        }

        trace!(
            "probe visited all {} slots after {} collisions",
            probe.len,
            probe.collisions
        );

        Search::Vacant(reusable)
    }

    // Returns the key-value pair corresponding to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);

        match self.search(hash, key) {
            Search::Found(i) => match &self.slots[i] {
                Slot::Occupied(k, v) => Some((k, v)),
                _ => None,
            },
            Search::Vacant(_) => None,
        }
    }

    // Returns a mutable reference to the value corresponding to `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);

        match self.search(hash, key) {
            Search::Found(i) => match &mut self.slots[i] {
                Slot::Occupied(_, v) => Some(v),
                _ => None,
            },
            Search::Vacant(_) => None,
        }
    }

    // Inserts a key-value pair, returning the previous value if the key was
    // already present.
    //
    // Inserting a new key rebuilds the table first if the insert would reach the
    // load factor threshold: at twice the capacity if live entries alone reach it,
    // or at the same capacity if tombstones push it over.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = self.hasher.hash_one(&key);

        let reusable = match self.search(hash, &key) {
            Search::Found(i) => {
                if let Slot::Occupied(_, current) = &mut self.slots[i] {
                    return Ok(Some(mem::replace(current, value)));
                }

                unreachable!("search returned an unoccupied slot")
            }
            Search::Vacant(reusable) => reusable,
        };

        let index = if self.reaches_threshold(self.len + 1) {
            let capacity = self
                .capacity()
                .checked_mul(2)
                .expect("capacity overflow");

            debug!(
                "load factor {}/{} reached threshold {}, growing to {} slots",
                self.len + 1,
                self.capacity(),
                self.threshold,
                capacity
            );

            self.rebuild(capacity);
            self.find_free(hash)?
        } else if self.reaches_threshold(self.len + self.tombstones + 1) {
            debug!(
                "purging {} tombstones from {} slots",
                self.tombstones,
                self.capacity()
            );

            self.rebuild(self.capacity());
            self.find_free(hash)?
        } else {
            match reusable {
                Some(i) => i,
                None => return Err(self.table_full()),
            }
        };

        if let Slot::Tombstone = self.slots[index] {
            self.tombstones -= 1;
        }

        self.slots[index] = Slot::Occupied(key, value);
        self.len += 1;

        Ok(None)
    }

    // Removes a key from the table, leaving a tombstone in its slot.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);

        let Search::Found(i) = self.search(hash, key) else {
            return None;
        };

        match mem::replace(&mut self.slots[i], Slot::Tombstone) {
            Slot::Occupied(k, v) => {
                self.len -= 1;
                self.tombstones += 1;
                Some((k, v))
            }
            slot => {
                self.slots[i] = slot;
                None
            }
        }
    }

    // Find the first empty or tombstone slot in the probe sequence for `hash`.
    fn find_free(&self, hash: u64) -> Result<usize> {
        let mut probe = self.probe(hash);

        while !probe.exhausted() {
            match self.slots[probe.i] {
                Slot::Empty | Slot::Tombstone => return Ok(probe.i),
                Slot::Occupied(..) => probe.collisions += 1,
            }

            probe.next();
        }

        Err(self.table_full())
    }

    fn table_full(&self) -> Error {
        error!(
            "no free slot in a table of {} slots holding {} entries and {} tombstones",
            self.capacity(),
            self.len,
            self.tombstones
        );

        Error::TableFull {
            capacity: self.capacity(),
        }
    }

    // Rebuild the table with `capacity` slots.
    //
    // Every live entry is re-inserted into a freshly allocated slice, which then
    // replaces the old one. Tombstones are dropped.
    fn rebuild(&mut self, capacity: usize) {
        assert!(
            capacity > self.len,
            "cannot rebuild {} entries into {} slots",
            self.len,
            capacity
        );

        let prime = largest_prime(capacity);
        let mut slots = empty_slots(capacity);

        for slot in mem::take(&mut self.slots).into_vec() {
            let Slot::Occupied(key, value) = slot else {
                continue;
            };

            // keys are unique, so the entry goes in the first empty slot. the new
            // table has more slots than entries and every probe sequence visits
            // each slot, so one is always found
            let hash = self.hasher.hash_one(&key);
            let mut probe = Probe::start(hash, capacity, prime, self.mode);
            while !matches!(slots[probe.i], Slot::Empty) {
                probe.next();
                assert!(!probe.exhausted(), "rebuilt table has no free slot");
            }

            slots[probe.i] = Slot::Occupied(key, value);
        }

        self.slots = slots;
        self.prime = prime;
        self.tombstones = 0;
    }
}

impl<K, V, S> Clone for RawTable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        RawTable {
            slots: self.slots.clone(),
            prime: self.prime,
            len: self.len,
            tombstones: self.tombstones,
            threshold: self.threshold,
            mode: self.mode,
            hasher: self.hasher.clone(),
        }
    }
}

// An iterator over the occupied slots of a table.
pub struct Iter<'t, K, V> {
    slots: slice::Iter<'t, Slot<K, V>>,
}

impl<'t, K, V> Iterator for Iter<'t, K, V> {
    type Item = (&'t K, &'t V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::hash::{BuildHasherDefault, Hasher};

    // Hashes every `u64` key to itself, so slot positions are predictable.
    #[derive(Default)]
    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = (self.0 << 8) | b as u64;
            }
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    type Identity = BuildHasherDefault<IdentityHasher>;

    fn table(capacity: usize, mode: ProbeMode) -> RawTable<u64, u64, Identity> {
        RawTable::new(capacity, 0.75, mode, Identity::default())
    }

    fn occupied(table: &RawTable<u64, u64, Identity>) -> Vec<Option<u64>> {
        table
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Occupied(k, _) => Some(*k),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn linear_collisions_fill_following_slots() {
        let mut table = table(8, ProbeMode::Linear);
        table.insert(3, 0).unwrap();
        table.insert(11, 0).unwrap();
        table.insert(19, 0).unwrap();

        assert_eq!(
            occupied(&table),
            [None, None, None, Some(3), Some(11), Some(19), None, None]
        );
    }

    #[test]
    fn double_hash_collisions_stride_by_step() {
        let mut table = table(8, ProbeMode::DoubleHash);
        table.insert(3, 0).unwrap();
        // h1 = 3, h2 = 7 - 3 % 7 = 4, which shares a factor with 8, so the stride is 5
        table.insert(11, 0).unwrap();

        assert_eq!(
            occupied(&table),
            [Some(11), None, None, Some(3), None, None, None, None]
        );
    }

    #[test]
    fn tombstone_keeps_cluster_reachable() {
        for mode in [ProbeMode::Linear, ProbeMode::DoubleHash] {
            let mut table = table(16, mode);
            for key in [1, 17, 33, 49] {
                table.insert(key, key).unwrap();
            }

            assert_eq!(table.remove(&17), Some((17, 17)));
            assert_eq!(table.tombstones, 1);

            for key in [1, 33, 49] {
                assert_eq!(table.get(&key), Some((&key, &key)));
            }
            assert_eq!(table.get(&17), None);

            // the tombstone is reused without duplicating an existing key
            table.insert(49, 0).unwrap();
            table.insert(65, 65).unwrap();
            assert_eq!(table.tombstones, 0);
            assert_eq!(table.len(), 4);
            assert_eq!(table.get(&49), Some((&49, &0)));
        }
    }

    #[test]
    fn rebuild_discards_tombstones() {
        let mut table = table(8, ProbeMode::Linear);
        for key in 0..4 {
            table.insert(key, key).unwrap();
        }
        table.remove(&0);
        table.remove(&1);
        assert_eq!(table.tombstones, 2);

        // 2 live + 2 tombstones + 1 reaches 5/8, below 0.75
        table.insert(10, 10).unwrap();
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.tombstones, 2);

        // 3 live + 2 tombstones + 1 reaches 6/8, so tombstones are purged
        table.insert(11, 11).unwrap();
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.tombstones, 0);
        assert_eq!(table.len(), 4);

        table.insert(12, 12).unwrap();
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.len(), 5);

        // 6/8 live reaches the threshold
        table.insert(13, 13).unwrap();
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 6);

        for key in [2, 3, 10, 11, 12, 13] {
            assert_eq!(table.get(&key), Some((&key, &key)));
        }
    }

    #[test]
    fn single_slot_table() {
        for mode in [ProbeMode::Linear, ProbeMode::DoubleHash] {
            let mut table = table(1, mode);
            assert_eq!(table.get(&7), None);

            // 1/1 reaches any threshold, so the first insert grows the table
            table.insert(7, 1).unwrap();
            assert_eq!(table.capacity(), 2);
            assert_eq!(table.get(&7), Some((&7, &1)));
        }
    }

    #[test]
    fn clear() {
        let mut table = table(8, ProbeMode::Linear);
        table.insert(1, 1).unwrap();
        table.insert(2, 2).unwrap();
        table.remove(&1);

        table.clear();
        assert_eq!(table.len(), 0);
        assert_eq!(table.tombstones, 0);
        assert_eq!(table.capacity(), 8);
        assert!(table.iter().next().is_none());
    }
}
