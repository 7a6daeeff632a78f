use alloc::string::String;

/// Errors reported by [`HashTable`](crate::HashTable) and
/// [`Directory`](crate::Directory) operations.
///
/// None of these are fatal to the process. A failed insert leaves the table in
/// the state it had before the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An open-addressing insert walked its whole probe sequence without
    /// reaching an empty slot or a tombstone.
    #[error("table is full: no free slot reachable in {probes} probes of a {capacity}-slot table")]
    TableFull {
        /// Number of slots in the table.
        capacity: usize,
        /// Number of distinct slots the probe sequence visited.
        probes: usize,
    },

    /// The key is not stored in the table.
    #[error("key not found")]
    NotFound,

    /// Construction was requested with a strategy tag that names none of the
    /// supported collision strategies.
    #[error(
        "unrecognized collision strategy `{0}`; expected one of separate_chaining, \
    linear_probing, quadratic_probing or double_hashing"
    )]
    InvalidStrategy(String),

    /// Construction was requested with a table size of zero.
    #[error("table size must be at least one slot")]
    ZeroCapacity,
}
