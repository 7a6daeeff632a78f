use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::TableError;
use crate::probe::Probing;

/// Collision-handling strategy of a [`HashTable`](crate::HashTable), fixed at
/// construction.
///
/// # Examples
///
/// ```rust
/// use probe_hash::StrategyKind;
///
/// let kind: StrategyKind = "double_hashing".parse().unwrap();
/// assert_eq!(kind, StrategyKind::DoubleHashing);
/// assert!("cuckoo".parse::<StrategyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    /// One linked chain of entries per bucket.
    SeparateChaining,
    /// Open addressing, stepping one slot at a time.
    LinearProbing,
    /// Open addressing, stepping by squares.
    QuadraticProbing,
    /// Open addressing, stepping by a per-key secondary hash.
    DoubleHashing,
}

impl StrategyKind {
    /// Every strategy, in the order a [`Directory`](crate::Directory) reports
    /// them.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::SeparateChaining,
        StrategyKind::LinearProbing,
        StrategyKind::QuadraticProbing,
        StrategyKind::DoubleHashing,
    ];

    /// Canonical tag of the strategy.
    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::SeparateChaining => "separate_chaining",
            StrategyKind::LinearProbing => "linear_probing",
            StrategyKind::QuadraticProbing => "quadratic_probing",
            StrategyKind::DoubleHashing => "double_hashing",
        }
    }

    /// Probe function for open-addressing strategies, `None` for chaining.
    pub const fn probing(self) -> Option<Probing> {
        match self {
            StrategyKind::SeparateChaining => None,
            StrategyKind::LinearProbing => Some(Probing::Linear),
            StrategyKind::QuadraticProbing => Some(Probing::Quadratic),
            StrategyKind::DoubleHashing => Some(Probing::Double),
        }
    }

    /// Whether entries live directly in the slot array.
    pub const fn is_open_addressing(self) -> bool {
        self.probing().is_some()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = TableError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let kind = match tag.trim() {
            "separate_chaining" | "chaining" => StrategyKind::SeparateChaining,
            "linear_probing" | "linear" => StrategyKind::LinearProbing,
            "quadratic_probing" | "quadratic" => StrategyKind::QuadraticProbing,
            "double_hashing" | "double" => StrategyKind::DoubleHashing,
            other => return Err(TableError::InvalidStrategy(other.to_string())),
        };
        Ok(kind)
    }
}
