use core::fmt;

use crate::strategy::StrategyKind;

/// Occupancy statistics of a [`HashTable`](crate::HashTable).
///
/// For chaining, `occupied_count` is the number of stored entries and
/// `empty_count` the number of buckets with an empty chain. For open
/// addressing both count slots, and tombstones are in neither.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Strategy of the table.
    pub strategy: StrategyKind,
    /// Number of slots or buckets.
    pub size: usize,
    /// Entries stored.
    pub occupied_count: usize,
    /// Empty slots, or buckets with no chain.
    pub empty_count: usize,
    /// Deleted slots awaiting reuse. Always zero for chaining.
    pub tombstones: usize,
    /// `occupied_count / size`.
    pub load_factor: f64,
    /// Longest chain, chaining only.
    pub max_chain_length: Option<usize>,
    /// Mean chain length over all buckets, chaining only.
    pub average_chain_length: Option<f64>,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        let empty_pct = if self.size == 0 {
            0.0
        } else {
            self.empty_count as f64 / self.size as f64 * 100.0
        };

        writeln!(f, "{rule}")?;
        writeln!(f, "HASH TABLE STATISTICS ({})", self.strategy)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total entries: {}", self.occupied_count)?;
        match (self.max_chain_length, self.average_chain_length) {
            (Some(max), Some(avg)) => {
                writeln!(f, "Empty buckets: {} ({empty_pct:.1}%)", self.empty_count)?;
                writeln!(f, "Average chain length: {avg:.2}")?;
                writeln!(f, "Max chain length: {max}")?;
            }
            _ => {
                writeln!(f, "Empty slots: {} ({empty_pct:.1}%)", self.empty_count)?;
                writeln!(f, "Tombstones: {}", self.tombstones)?;
                writeln!(f, "Load factor: {:.2}", self.load_factor)?;
            }
        }
        write!(f, "{rule}")
    }
}
