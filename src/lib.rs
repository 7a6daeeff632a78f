#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod chaining;
mod open_addressing;

/// Side-by-side comparison of every collision strategy over the same keys.
pub mod directory;
mod error;
pub mod hash_table;
pub mod key_hasher;
pub mod probe;
mod stats;
mod strategy;

pub use directory::Comparison;
pub use directory::Directory;
pub use error::TableError;
pub use hash_table::HashTable;
pub use hash_table::Lookup;
pub use hash_table::SlotView;
pub use stats::TableStats;
pub use strategy::StrategyKind;
