use alloc::vec::Vec;
use core::borrow::Borrow;

use crate::error::TableError;
use crate::hash_table::HashTable;
use crate::hash_table::Lookup;
use crate::key_hasher::KeyHasher;
use crate::stats::TableStats;
use crate::strategy::StrategyKind;

/// Outcome of one strategy's search in [`Directory::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// Strategy that ran the search.
    pub strategy: StrategyKind,
    /// Whether the key was found.
    pub found: bool,
    /// Comparisons the search made.
    pub comparisons: u64,
}

/// Per-strategy results of an operation applied to every table.
pub type Outcomes<T> = Vec<(StrategyKind, Result<T, TableError>)>;

/// One [`HashTable`] per strategy over the same keys, for side-by-side
/// comparison of collision behavior.
///
/// Every table has the same size and a clone of the same hasher. Mutations
/// are applied to all of them; a failure in one strategy is reported without
/// blocking the others.
///
/// # Examples
///
/// ```rust
/// use probe_hash::Directory;
/// use probe_hash::StrategyKind;
/// use probe_hash::key_hasher::CharSum;
///
/// let mut directory = Directory::new(10, CharSum)?;
/// directory.insert("Alice".to_string(), 1234567890u64);
/// directory.insert("Bob".to_string(), 9876543210u64);
///
/// for row in directory.compare("Alice") {
///     assert!(row.found, "{}", row.strategy);
/// }
/// assert_eq!(directory.search("Bob").value, Some(&9876543210));
/// # Ok::<(), probe_hash::TableError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Directory<K, V, H> {
    tables: Vec<HashTable<K, V, H>>,
    current: StrategyKind,
}

impl<K, V, H> Directory<K, V, H> {
    /// Creates one table of `size` slots for each [`StrategyKind`]. The
    /// current strategy starts as separate chaining.
    ///
    /// # Errors
    ///
    /// [`TableError::ZeroCapacity`] if `size` is zero.
    pub fn new(size: usize, hasher: H) -> Result<Self, TableError>
    where
        H: Clone,
    {
        let tables = StrategyKind::ALL
            .into_iter()
            .map(|kind| HashTable::new(size, kind, hasher.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            tables,
            current: StrategyKind::SeparateChaining,
        })
    }

    /// Returns the strategy used by [`search`](Directory::search).
    pub fn current(&self) -> StrategyKind {
        self.current
    }

    /// Selects the strategy used by [`search`](Directory::search).
    pub fn set_method(&mut self, strategy: StrategyKind) {
        self.current = strategy;
    }

    /// Selects the current strategy by tag.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidStrategy`] if `tag` names no strategy; the
    /// current strategy is kept.
    pub fn set_method_tag(&mut self, tag: &str) -> Result<(), TableError> {
        self.current = tag.parse()?;
        Ok(())
    }

    /// Returns the table for `strategy`.
    pub fn table(&self, strategy: StrategyKind) -> &HashTable<K, V, H> {
        &self.tables[Self::slot(strategy)]
    }

    /// Iterates over the tables in [`StrategyKind::ALL`] order.
    pub fn tables(&self) -> impl Iterator<Item = &HashTable<K, V, H>> {
        self.tables.iter()
    }

    /// Statistics for every strategy.
    pub fn stats_all(&self) -> Vec<TableStats> {
        self.tables.iter().map(HashTable::stats).collect()
    }

    fn slot(strategy: StrategyKind) -> usize {
        match strategy {
            StrategyKind::SeparateChaining => 0,
            StrategyKind::LinearProbing => 1,
            StrategyKind::QuadraticProbing => 2,
            StrategyKind::DoubleHashing => 3,
        }
    }

    /// Inserts `key` with `value` into every table.
    pub fn insert(&mut self, key: K, value: V) -> Outcomes<Option<V>>
    where
        K: Eq + Clone,
        V: Clone,
        H: KeyHasher<K>,
    {
        self.tables
            .iter_mut()
            .map(|table| {
                let result = table.insert(key.clone(), value.clone());

                #[cfg(feature = "logging")]
                if let Err(e) = &result {
                    log::debug!("directory insert failed using {}: {e}", table.strategy());
                }

                (table.strategy(), result)
            })
            .collect()
    }

    /// Deletes `key` from every table.
    pub fn delete<Q>(&mut self, key: &Q) -> Outcomes<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        self.tables
            .iter_mut()
            .map(|table| {
                let result = table.delete(key);

                #[cfg(feature = "logging")]
                if let Err(e) = &result {
                    log::debug!("directory delete failed using {}: {e}", table.strategy());
                }

                (table.strategy(), result)
            })
            .collect()
    }

    /// Searches the current strategy's table.
    pub fn search<Q>(&self, key: &Q) -> Lookup<'_, V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        self.table(self.current).search(key)
    }

    /// Searches every table, in [`StrategyKind::ALL`] order.
    pub fn compare<Q>(&self, key: &Q) -> Vec<Comparison>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: KeyHasher<Q>,
    {
        self.tables
            .iter()
            .map(|table| {
                let lookup = table.search(key);
                Comparison {
                    strategy: table.strategy(),
                    found: lookup.is_found(),
                    comparisons: lookup.comparisons,
                }
            })
            .collect()
    }
}
