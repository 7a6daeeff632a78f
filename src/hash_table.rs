//! A fixed-size dictionary with a selectable collision strategy.
//!
//! [`HashTable`] stores unique keys in a table whose size is chosen at
//! construction and never changes. Collisions are resolved by the
//! [`StrategyKind`] picked at the same time: separate chaining, or one of
//! the three open-addressing probe functions.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;

use crate::chaining;
use crate::chaining::ChainStore;
use crate::error::TableError;
use crate::key_hasher::KeyHasher;
use crate::open_addressing;
use crate::open_addressing::Slot;
use crate::open_addressing::SlotStore;
use crate::stats::TableStats;
use crate::strategy::StrategyKind;

#[derive(Clone)]
enum Store<K, V> {
    Chained(ChainStore<K, V>),
    Open(SlotStore<K, V>),
}

/// Result of [`HashTable::search`]: the value, if found, and how many
/// comparisons the search made.
///
/// For chaining, `comparisons` is the number of chain nodes whose key was
/// tested. For open addressing it is the number of non-empty slots inspected;
/// tombstones count because the search has to step over them.
#[derive(Debug, PartialEq, Eq)]
pub struct Lookup<'a, V> {
    /// The stored value, or `None` if the key is absent.
    pub value: Option<&'a V>,
    /// Comparisons performed before the search ended.
    pub comparisons: u64,
}

impl<V> Clone for Lookup<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Lookup<'_, V> {}

impl<'a, V> Lookup<'a, V> {
    /// Returns `true` if the key was found.
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }

    /// Converts a miss into [`TableError::NotFound`].
    pub fn into_result(self) -> Result<&'a V, TableError> {
        self.value.ok_or(TableError::NotFound)
    }
}

/// Read-only view of one slot, as returned by [`HashTable::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotView<'a, K, V> {
    /// An open-addressing slot that has never held an entry since the last
    /// clear.
    Empty,
    /// An open-addressing slot holding an entry.
    Occupied {
        /// Stored key.
        key: &'a K,
        /// Stored value.
        value: &'a V,
    },
    /// An open-addressing slot whose entry was deleted.
    Tombstone,
    /// A chaining bucket, head to tail. Empty buckets have an empty chain.
    Chain(Vec<(&'a K, &'a V)>),
}

/// A fixed-size hash table resolving collisions with one [`StrategyKind`].
///
/// `H` is the [`KeyHasher`] turning keys into bucket indices. Keys are unique:
/// inserting a key that is already present replaces its value.
///
/// ## Example
///
/// ```rust
/// use probe_hash::HashTable;
/// use probe_hash::StrategyKind;
/// use probe_hash::key_hasher::Modulo;
///
/// let mut table = HashTable::new(10, StrategyKind::LinearProbing, Modulo)?;
/// table.insert(1234567890u64, "Alice")?;
/// table.insert(9876543210u64, "Bob")?; // also hashes to 0, lands in 1
///
/// let hit = table.search(&9876543210);
/// assert_eq!(hit.value, Some(&"Bob"));
/// assert_eq!(hit.comparisons, 2);
///
/// table.delete(&1234567890)?;
/// assert_eq!(table.search(&9876543210).comparisons, 2);
/// # Ok::<(), probe_hash::TableError>(())
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, H> {
    strategy: StrategyKind,
    hasher: H,
    store: Store<K, V>,
}

impl<K, V, H> Debug for HashTable<K, V, H>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("strategy", &self.strategy)
            .field("size", &self.size())
            .field("populated", &self.len())
            .field("slots", &self.snapshot())
            .finish()
    }
}

impl<K, V, H> HashTable<K, V, H> {
    /// Creates a table of `size` slots (buckets, for chaining) using
    /// `strategy` and `hasher`.
    ///
    /// # Errors
    ///
    /// [`TableError::ZeroCapacity`] if `size` is zero.
    pub fn new(size: usize, strategy: StrategyKind, hasher: H) -> Result<Self, TableError> {
        if size == 0 {
            return Err(TableError::ZeroCapacity);
        }

        #[cfg(feature = "logging")]
        log::trace!("creating {strategy} table with {size} slots");

        let store = match strategy.probing() {
            None => Store::Chained(ChainStore::new(size)),
            Some(probing) => Store::Open(SlotStore::new(size, probing)),
        };
        Ok(Self {
            strategy,
            hasher,
            store,
        })
    }

    /// Creates a table from a strategy tag such as `"quadratic_probing"`.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidStrategy`] if `tag` names no strategy, and
    /// [`TableError::ZeroCapacity`] if `size` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    /// use probe_hash::TableError;
    /// use probe_hash::key_hasher::CharSum;
    ///
    /// let table = HashTable::<String, u64, _>::with_tag(16, "separate_chaining", CharSum);
    /// assert!(table.is_ok());
    ///
    /// let bad = HashTable::<String, u64, _>::with_tag(16, "cuckoo", CharSum);
    /// assert_eq!(bad.unwrap_err(), TableError::InvalidStrategy("cuckoo".into()));
    /// ```
    pub fn with_tag(size: usize, tag: &str, hasher: H) -> Result<Self, TableError> {
        Self::new(size, tag.parse()?, hasher)
    }

    /// Returns the collision strategy.
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Returns the key hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the number of slots, or buckets for chaining.
    pub fn size(&self) -> usize {
        match &self.store {
            Store::Chained(chains) => chains.buckets(),
            Store::Open(slots) => slots.slots().len(),
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Chained(chains) => chains.len(),
            Store::Open(slots) => slots.len(),
        }
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry. Open-addressing slots, tombstones included, go
    /// back to empty.
    pub fn clear(&mut self) {
        match &mut self.store {
            Store::Chained(chains) => chains.clear(),
            Store::Open(slots) => slots.clear(),
        }
    }

    /// Iterates over the entries in slot order; chains are walked head to
    /// tail.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let inner = match &self.store {
            Store::Chained(chains) => IterInner::Chained(chains.iter()),
            Store::Open(slots) => IterInner::Open(slots.iter()),
        };
        Iter { inner }
    }

    /// Returns every slot with its index, in index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    /// use probe_hash::SlotView;
    /// use probe_hash::StrategyKind;
    /// use probe_hash::key_hasher::Modulo;
    ///
    /// let mut table = HashTable::new(3, StrategyKind::SeparateChaining, Modulo)?;
    /// table.insert(1u32, 'a')?;
    /// table.insert(4u32, 'b')?;
    ///
    /// let snapshot = table.snapshot();
    /// assert_eq!(snapshot[0], (0, SlotView::Chain(vec![])));
    /// assert_eq!(snapshot[1], (1, SlotView::Chain(vec![(&1, &'a'), (&4, &'b')])));
    /// # Ok::<(), probe_hash::TableError>(())
    /// ```
    pub fn snapshot(&self) -> Vec<(usize, SlotView<'_, K, V>)> {
        match &self.store {
            Store::Chained(chains) => (0..chains.buckets())
                .map(|bucket| (bucket, SlotView::Chain(chains.chain(bucket).collect())))
                .collect(),
            Store::Open(slots) => slots
                .slots()
                .iter()
                .enumerate()
                .map(|(index, slot)| {
                    let view = match slot {
                        Slot::Empty => SlotView::Empty,
                        Slot::Occupied(key, value) => SlotView::Occupied { key, value },
                        Slot::Tombstone => SlotView::Tombstone,
                    };
                    (index, view)
                })
                .collect(),
        }
    }

    /// Returns occupancy statistics.
    pub fn stats(&self) -> TableStats {
        let size = self.size();
        let occupied_count = self.len();
        let load_factor = occupied_count as f64 / size as f64;

        match &self.store {
            Store::Chained(chains) => {
                let mut empty_count = 0;
                let mut max_chain_length = 0;
                for bucket in 0..size {
                    let length = chains.chain_len(bucket);
                    if length == 0 {
                        empty_count += 1;
                    }
                    max_chain_length = max_chain_length.max(length);
                }
                TableStats {
                    strategy: self.strategy,
                    size,
                    occupied_count,
                    empty_count,
                    tombstones: 0,
                    load_factor,
                    max_chain_length: Some(max_chain_length),
                    average_chain_length: Some(load_factor),
                }
            }
            Store::Open(slots) => TableStats {
                strategy: self.strategy,
                size,
                occupied_count,
                empty_count: size - occupied_count - slots.tombstones(),
                tombstones: slots.tombstones(),
                load_factor,
                max_chain_length: None,
                average_chain_length: None,
            },
        }
    }

    /// Bucket index and double-hashing step for `key`.
    #[inline]
    fn home<Q>(&self, key: &Q) -> (usize, usize)
    where
        Q: ?Sized,
        H: KeyHasher<Q>,
    {
        let size = self.size();
        let origin = self.hasher.primary(key, size);
        debug_assert!(origin < size);
        let step = match self.strategy {
            StrategyKind::DoubleHashing => self.hasher.secondary(key),
            _ => 1,
        };
        (origin, step)
    }

    /// Inserts `key` with `value`, returning the value it replaced, if any.
    ///
    /// # Errors
    ///
    /// [`TableError::TableFull`] if an open-addressing probe sequence finds
    /// neither an empty slot nor a tombstone. The table is left unchanged.
    /// Chaining never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    /// use probe_hash::StrategyKind;
    /// use probe_hash::TableError;
    /// use probe_hash::key_hasher::Modulo;
    ///
    /// let mut table = HashTable::new(2, StrategyKind::LinearProbing, Modulo)?;
    /// assert_eq!(table.insert(1u8, "one")?, None);
    /// assert_eq!(table.insert(1u8, "uno")?, Some("one"));
    /// table.insert(2u8, "two")?;
    /// assert!(matches!(table.insert(3u8, "three"), Err(TableError::TableFull { .. })));
    /// # Ok::<(), TableError>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TableError>
    where
        K: Eq,
        H: KeyHasher<K>,
    {
        let (origin, step) = self.home(&key);
        let result = match &mut self.store {
            Store::Chained(chains) => Ok(chains.insert(origin, key, value)),
            Store::Open(slots) => slots.insert(origin, step, key, value),
        };

        #[cfg(feature = "logging")]
        if let Err(TableError::TableFull { capacity, probes }) = &result {
            log::warn!(
                "{} insert rejected: {probes} probes from slot {origin} found no free slot in {capacity}",
                self.strategy
            );
        }

        result
    }

    /// Searches for `key`, reporting the comparisons made.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    /// use probe_hash::StrategyKind;
    /// use probe_hash::key_hasher::Modulo;
    ///
    /// let mut table = HashTable::new(10, StrategyKind::SeparateChaining, Modulo)?;
    /// for key in [3u32, 13, 23] {
    ///     table.insert(key, ())?;
    /// }
    /// assert_eq!(table.search(&23).comparisons, 3);
    ///
    /// table.delete(&13)?;
    /// assert_eq!(table.search(&23).comparisons, 2);
    /// assert!(!table.search(&13).is_found());
    /// # Ok::<(), probe_hash::TableError>(())
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Lookup<'_, V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        let (origin, step) = self.home(key);
        match &self.store {
            Store::Chained(chains) => {
                let (found, comparisons) = chains.find(origin, key);
                Lookup {
                    value: found.map(|index| chains.get(index).1),
                    comparisons,
                }
            }
            Store::Open(slots) => {
                let (found, comparisons) = slots.find(origin, step, key);
                Lookup {
                    value: found.and_then(|index| slots.get(index)).map(|(_, v)| v),
                    comparisons,
                }
            }
        }
    }

    /// Returns the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        self.search(key).value
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        let (origin, step) = self.home(key);
        match &mut self.store {
            Store::Chained(chains) => {
                let index = chains.find(origin, key).0?;
                Some(chains.get_mut(index))
            }
            Store::Open(slots) => {
                let index = slots.find(origin, step, key).0?;
                slots.get_mut(index)
            }
        }
    }

    /// Returns `true` if `key` is stored.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        self.search(key).is_found()
    }

    /// Deletes `key`, returning its value.
    ///
    /// Chaining unlinks the node; open addressing leaves a tombstone so keys
    /// probed past this slot stay reachable.
    ///
    /// # Errors
    ///
    /// [`TableError::NotFound`] if `key` is absent. Nothing changes.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        let (origin, step) = self.home(key);
        let removed = match &mut self.store {
            Store::Chained(chains) => chains.delete(origin, key),
            Store::Open(slots) => slots.delete(origin, step, key),
        };
        removed.ok_or(TableError::NotFound)
    }

    /// Counts live entries by the number of comparisons a search for them
    /// makes. Index `n` of the result holds the entries found after `n`
    /// comparisons; index 0 is always zero.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize>
    where
        K: Eq,
        H: KeyHasher<K>,
    {
        let mut hist = alloc::vec![0usize; 2];
        for (key, _) in self.iter() {
            let comparisons = self.search(key).comparisons as usize;
            if comparisons >= hist.len() {
                hist.resize(comparisons + 1, 0);
            }
            hist[comparisons] += 1;
        }
        hist
    }
}

/// Iterator over the entries of a [`HashTable`].
///
/// Created by [`HashTable::iter`].
pub struct Iter<'a, K, V> {
    inner: IterInner<'a, K, V>,
}

enum IterInner<'a, K, V> {
    Chained(chaining::Iter<'a, K, V>),
    Open(open_addressing::Iter<'a, K, V>),
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Chained(iter) => iter.next(),
            IterInner::Open(iter) => iter.next(),
        }
    }
}

impl<'a, K, V, H> IntoIterator for &'a HashTable<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use siphasher::sip::SipHasher;

    use super::*;
    use crate::key_hasher::CharSum;
    use crate::key_hasher::Hashed;
    use crate::key_hasher::Modulo;

    #[derive(Clone, Default)]
    struct SipBuilder;

    impl BuildHasher for SipBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(0x5eed, 0xfeed)
        }
    }

    fn table(size: usize, strategy: StrategyKind) -> HashTable<u64, u64, Modulo> {
        HashTable::new(size, strategy, Modulo).unwrap()
    }

    #[test]
    fn zero_size_is_rejected() {
        for kind in StrategyKind::ALL {
            assert_eq!(
                HashTable::<u64, u64, _>::new(0, kind, Modulo).unwrap_err(),
                TableError::ZeroCapacity
            );
        }
    }

    #[test]
    fn invalid_tag_is_rejected() {
        let err = HashTable::<u64, u64, _>::with_tag(10, "linear_hashing", Modulo).unwrap_err();
        assert_eq!(err, TableError::InvalidStrategy("linear_hashing".to_string()));
        let ok = HashTable::<u64, u64, _>::with_tag(10, "double_hashing", Modulo).unwrap();
        assert_eq!(ok.strategy(), StrategyKind::DoubleHashing);
    }

    #[test]
    fn linear_probing_phone_numbers() {
        let mut t = HashTable::new(10, StrategyKind::LinearProbing, Modulo).unwrap();
        t.insert(1234567890u64, "Alice").unwrap();
        t.insert(9876543210u64, "Bob").unwrap();

        assert_eq!(t.snapshot()[1], (1, SlotView::Occupied { key: &9876543210, value: &"Bob" }));
        assert_eq!(
            t.search(&1234567890),
            Lookup {
                value: Some(&"Alice"),
                comparisons: 1
            }
        );
        assert_eq!(
            t.search(&9876543210),
            Lookup {
                value: Some(&"Bob"),
                comparisons: 2
            }
        );

        assert_eq!(t.delete(&1234567890), Ok("Alice"));
        assert_eq!(t.snapshot()[0], (0, SlotView::Tombstone));
        assert_eq!(
            t.search(&9876543210),
            Lookup {
                value: Some(&"Bob"),
                comparisons: 2
            }
        );
        assert!(!t.search(&1234567890).is_found());
        assert_eq!(t.search(&1234567890).into_result(), Err(TableError::NotFound));
    }

    #[test]
    fn chaining_relinks_after_middle_delete() {
        let mut t = table(10, StrategyKind::SeparateChaining);
        for k in [3, 13, 23] {
            t.insert(k, k).unwrap();
        }
        assert_eq!(t.search(&23).comparisons, 3);
        assert_eq!(t.delete(&13), Ok(13));
        assert_eq!(t.search(&23), Lookup { value: Some(&23), comparisons: 2 });
        assert_eq!(t.snapshot()[3], (3, SlotView::Chain(vec![(&3, &3), (&23, &23)])));
    }

    #[test]
    fn delete_missing_key_is_not_found() {
        for kind in StrategyKind::ALL {
            let mut t = table(8, kind);
            t.insert(1, 1).unwrap();
            assert_eq!(t.delete(&9), Err(TableError::NotFound), "{kind}");
            assert_eq!(t.len(), 1);
        }
    }

    #[test]
    fn insert_existing_key_overwrites() {
        for kind in StrategyKind::ALL {
            let mut t = table(11, kind);
            assert_eq!(t.insert(5, 1), Ok(None));
            assert_eq!(t.insert(16, 2), Ok(None));
            assert_eq!(t.insert(5, 3), Ok(Some(1)), "{kind}");
            assert_eq!(t.len(), 2);
            assert_eq!(t.get(&5), Some(&3));
            assert_eq!(t.iter().filter(|(k, _)| **k == 5).count(), 1);
        }
    }

    #[test]
    fn overflowing_open_table_reports_table_full() {
        for kind in [
            StrategyKind::LinearProbing,
            StrategyKind::QuadraticProbing,
            StrategyKind::DoubleHashing,
        ] {
            let size = 11;
            let mut t = table(size, kind);
            let mut stored = 0;
            for k in 0..size as u64 {
                if t.insert(k * 3, k).is_ok() {
                    stored += 1;
                }
            }
            let overflow = t.insert(1000, 0);
            assert!(matches!(overflow, Err(TableError::TableFull { capacity: 11, .. })), "{kind}");
            assert_eq!(t.len(), stored);
        }
    }

    #[test]
    fn linear_and_double_fill_every_slot() {
        for kind in [StrategyKind::LinearProbing, StrategyKind::DoubleHashing] {
            let mut t = table(13, kind);
            for k in 0..13 {
                assert_eq!(t.insert(k * 13, k), Ok(None), "{kind} key {}", k * 13);
            }
            assert_eq!(t.stats().empty_count, 0);
            assert!(t.insert(169 * 2, 0).is_err());
            for k in 0..13 {
                assert_eq!(t.get(&(k * 13)), Some(&k));
            }
        }
    }

    #[test]
    fn quadratic_tombstone_keeps_later_keys_reachable() {
        let mut t = table(10, StrategyKind::QuadraticProbing);
        // All hash to 0: placed at 0, 1, 4, 9.
        for k in [0, 10, 20, 30] {
            t.insert(k, k).unwrap();
        }
        t.delete(&10).unwrap();
        t.delete(&20).unwrap();
        assert_eq!(t.search(&30), Lookup { value: Some(&30), comparisons: 4 });
        // The freed slot at 1 is reused, and 30 is not duplicated.
        t.insert(40, 40).unwrap();
        t.insert(30, 31).unwrap();
        assert_eq!(t.snapshot()[1], (1, SlotView::Occupied { key: &40, value: &40 }));
        assert_eq!(t.len(), 3);
        assert_eq!(t.get(&30), Some(&31));
    }

    #[test]
    fn double_hashing_steps_by_secondary_hash() {
        let mut t = table(11, StrategyKind::DoubleHashing);
        // 0 and 11 share slot 0; 11's step is 7 - 11 % 7 = 3.
        t.insert(0, 0).unwrap();
        t.insert(11, 11).unwrap();
        assert_eq!(t.snapshot()[3], (3, SlotView::Occupied { key: &11, value: &11 }));
        assert_eq!(t.search(&11).comparisons, 2);
    }

    #[test]
    fn double_hashing_tombstone_keeps_later_keys_reachable() {
        let mut t = table(11, StrategyKind::DoubleHashing);
        // 0 sits at its home slot, 11 one step of 3 further.
        t.insert(0, 0).unwrap();
        t.insert(11, 11).unwrap();
        assert_eq!(t.search(&11), Lookup { value: Some(&11), comparisons: 2 });

        t.delete(&0).unwrap();
        assert_eq!(t.snapshot()[0], (0, SlotView::Tombstone));
        assert_eq!(t.search(&11), Lookup { value: Some(&11), comparisons: 2 });
        assert_eq!(t.search(&0), Lookup { value: None, comparisons: 1 });

        // 22 also starts at 0 (step 6) and takes the tombstone.
        t.insert(22, 22).unwrap();
        assert_eq!(t.snapshot()[0], (0, SlotView::Occupied { key: &22, value: &22 }));
        assert_eq!(t.stats().tombstones, 0);
        assert_eq!(t.search(&11).comparisons, 2);
    }

    #[test]
    fn string_keys_search_by_str() {
        let mut t: HashTable<String, u64, CharSum> =
            HashTable::new(10, StrategyKind::LinearProbing, CharSum).unwrap();
        t.insert("Alice".to_string(), 1234567890).unwrap();
        t.insert("Bob".to_string(), 9876543210).unwrap();
        assert_eq!(t.get("Alice"), Some(&1234567890));
        assert!(t.contains_key("Bob"));
        assert!(!t.contains_key("Zoe"));
        *t.get_mut("Bob").unwrap() += 1;
        assert_eq!(t.delete("Bob"), Ok(9876543211));
    }

    #[test]
    fn stats_for_chaining_and_open_addressing() {
        let mut chained = table(10, StrategyKind::SeparateChaining);
        for k in [3, 13, 23, 4] {
            chained.insert(k, k).unwrap();
        }
        let stats = chained.stats();
        assert_eq!(stats.occupied_count, 4);
        assert_eq!(stats.empty_count, 8);
        assert_eq!(stats.max_chain_length, Some(3));
        assert!((stats.load_factor - 0.4).abs() < 1e-9);

        let mut open = table(10, StrategyKind::LinearProbing);
        for k in [3, 13, 23, 4] {
            open.insert(k, k).unwrap();
        }
        open.delete(&13).unwrap();
        let stats = open.stats();
        assert_eq!(stats.occupied_count, 3);
        assert_eq!(stats.tombstones, 1);
        assert_eq!(stats.empty_count, 6);
        assert_eq!(stats.max_chain_length, None);
        assert!(stats.to_string().contains("Load factor: 0.30"));
    }

    #[test]
    fn clear_resets_every_strategy() {
        for kind in StrategyKind::ALL {
            let mut t = table(7, kind);
            for k in 0..5 {
                t.insert(k, k).unwrap();
            }
            t.delete(&2).unwrap();
            t.clear();
            assert!(t.is_empty());
            assert_eq!(t.stats().empty_count, 7, "{kind}");
            assert_eq!(t.search(&3), Lookup { value: None, comparisons: 0 });
        }
    }

    #[test]
    fn comparisons_grow_with_chain_position() {
        for kind in StrategyKind::ALL {
            let mut t = table(17, kind);
            let keys: Vec<u64> = (0..6).map(|i| i * 17).collect();
            for &k in &keys {
                t.insert(k, k).unwrap();
            }
            let counts: Vec<u64> = keys.iter().map(|k| t.search(k).comparisons).collect();
            let miss = t.search(&(6 * 17));
            assert!(miss.value.is_none());

            if kind == StrategyKind::DoubleHashing {
                // Each key steps by its own secondary hash, so positions vary.
                assert_eq!(counts[0], 1);
                assert!(counts.iter().enumerate().all(|(i, &c)| c >= 1 && c <= i as u64 + 1));
            } else {
                assert_eq!(counts, [1, 2, 3, 4, 5, 6], "{kind}");
                assert_eq!(miss.comparisons, 6, "{kind}");
            }
        }
    }

    #[test]
    fn probe_histogram_counts_every_entry() {
        let mut t = table(10, StrategyKind::LinearProbing);
        for k in [0, 10, 20, 5] {
            t.insert(k, k).unwrap();
        }
        assert_eq!(t.probe_histogram(), [0, 2, 1, 1]);
    }

    #[test]
    fn hashed_keys_match_model() {
        for kind in StrategyKind::ALL {
            let mut t = HashTable::new(257, kind, Hashed::new(SipBuilder)).unwrap();
            for k in 0..128u64 {
                t.insert(k.to_string(), k).unwrap();
            }
            for k in 0..128u64 {
                assert_eq!(t.get(k.to_string().as_str()), Some(&k), "{kind}");
            }
            assert_eq!(t.len(), 128);
        }
    }

    #[test]
    fn random_operations_match_model() {
        let mut rng = SmallRng::seed_from_u64(0x1234_5678);
        for kind in StrategyKind::ALL {
            for size in [1usize, 7, 10, 31, 64] {
                let mut t = table(size, kind);
                let mut model = BTreeMap::new();

                for _ in 0..2000 {
                    let key = rng.random_range(0..(size as u64 * 3));
                    if rng.random_bool(0.6) {
                        let value = rng.random::<u64>();
                        match t.insert(key, value) {
                            Ok(previous) => {
                                assert_eq!(previous, model.insert(key, value), "{kind}/{size}")
                            }
                            Err(TableError::TableFull { .. }) => {
                                assert!(kind.is_open_addressing());
                                assert!(!model.contains_key(&key), "{kind}/{size}: {t:?}");
                            }
                            Err(e) => panic!("unexpected error {e}"),
                        }
                    } else {
                        match model.remove(&key) {
                            Some(value) => assert_eq!(t.delete(&key), Ok(value), "{kind}/{size}"),
                            None => assert_eq!(t.delete(&key), Err(TableError::NotFound)),
                        }
                    }

                    assert_eq!(t.len(), model.len());
                    assert!(t.len() <= size || !kind.is_open_addressing());
                }

                for (key, value) in &model {
                    let hit = t.search(key);
                    assert_eq!(hit.value, Some(value), "{kind}/{size}: {t:?}");
                    assert!(hit.comparisons >= 1);
                }
                let mut live: Vec<(u64, u64)> = t.iter().map(|(k, v)| (*k, *v)).collect();
                live.sort_unstable();
                assert_eq!(live, model.into_iter().collect::<Vec<_>>());
            }
        }
    }
}
