//! Pluggable key hashing.
//!
//! A [`KeyHasher`] maps a key to a bucket index for the primary hash and to a
//! probe step for double hashing. Hashers are chosen when a table is built;
//! nothing is inferred from the key's runtime type.

use core::hash::BuildHasher;
use core::hash::Hash;

/// Modulus of the secondary hash. Steps always land in
/// `1..=SECONDARY_MODULUS`.
pub const SECONDARY_MODULUS: usize = 7;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hash builder backing [`DefaultKeyHasher`].
        pub type DefaultHashBuilder = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        /// Hash builder backing [`DefaultKeyHasher`].
        pub type DefaultHashBuilder =
            core::hash::BuildHasherDefault<std::collections::hash_map::DefaultHasher>;
    }
}

/// A [`Hashed`] key hasher over the crate's default hash builder.
#[cfg(any(feature = "foldhash", feature = "std"))]
pub type DefaultKeyHasher = Hashed<DefaultHashBuilder>;

/// Computes table indices from keys.
///
/// Implementors only provide [`reduce`](KeyHasher::reduce); the primary and
/// secondary hashes are both derived from it.
///
/// # Examples
///
/// ```rust
/// use probe_hash::key_hasher::CharSum;
/// use probe_hash::key_hasher::KeyHasher;
///
/// // 'A' + 'l' + 'i' + 'c' + 'e' == 478
/// assert_eq!(CharSum.primary("Alice", 10), 8);
/// assert_eq!(CharSum.secondary("Alice"), 7 - 478 % 7);
/// ```
pub trait KeyHasher<K: ?Sized> {
    /// Reduces `key` to a value in `0..modulus`. `modulus` is never zero.
    fn reduce(&self, key: &K, modulus: usize) -> usize;

    /// Primary hash: the bucket index of `key` in a table of `size` slots.
    #[inline]
    fn primary(&self, key: &K, size: usize) -> usize {
        self.reduce(key, size) % size
    }

    /// Secondary hash used as the double-hashing step. Never zero.
    #[inline]
    fn secondary(&self, key: &K) -> usize {
        SECONDARY_MODULUS
            .saturating_sub(self.reduce(key, SECONDARY_MODULUS))
            .max(1)
    }
}

impl<K: ?Sized, H: KeyHasher<K> + ?Sized> KeyHasher<K> for &H {
    #[inline]
    fn reduce(&self, key: &K, modulus: usize) -> usize {
        (**self).reduce(key, modulus)
    }
}

/// Hashes string-like keys by summing their character codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharSum;

impl<K: AsRef<str> + ?Sized> KeyHasher<K> for CharSum {
    fn reduce(&self, key: &K, modulus: usize) -> usize {
        let modulus = modulus as u64;
        key.as_ref()
            .chars()
            .fold(0u64, |acc, c| (acc + c as u64) % modulus) as usize
    }
}

/// Integer keys usable with [`Modulo`].
pub trait IntegerKey {
    /// Euclidean remainder of the key by `modulus`.
    fn residue(&self, modulus: u64) -> u64;
}

macro_rules! impl_integer_key {
    (unsigned: $($u:ty),*; signed: $($s:ty),*) => {
        $(
            impl IntegerKey for $u {
                #[inline]
                fn residue(&self, modulus: u64) -> u64 {
                    (*self as u128 % modulus as u128) as u64
                }
            }
        )*
        $(
            impl IntegerKey for $s {
                #[inline]
                fn residue(&self, modulus: u64) -> u64 {
                    (*self as i128).rem_euclid(modulus as i128) as u64
                }
            }
        )*
    };
}

impl_integer_key!(
    unsigned: u8, u16, u32, u64, u128, usize;
    signed: i8, i16, i32, i64, i128, isize
);

/// Hashes integer keys by their value modulo the table size.
///
/// Negative keys wrap into range, so `-1` lands in the last slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modulo;

impl<K: IntegerKey + ?Sized> KeyHasher<K> for Modulo {
    #[inline]
    fn reduce(&self, key: &K, modulus: usize) -> usize {
        key.residue(modulus as u64) as usize
    }
}

/// Hashes composite keys by a designated numeric field.
///
/// # Examples
///
/// ```rust
/// use probe_hash::key_hasher::ByField;
/// use probe_hash::key_hasher::KeyHasher;
///
/// #[derive(PartialEq, Eq)]
/// struct Subscriber {
///     name: String,
///     number: u64,
/// }
///
/// let hasher = ByField::new(|s: &Subscriber| s.number);
/// let bob = Subscriber {
///     name: "Bob".to_string(),
///     number: 9876543210,
/// };
/// assert_eq!(hasher.primary(&bob, 10), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByField<F> {
    field: F,
}

impl<F> ByField<F> {
    /// Creates a hasher that reads the numeric field with `field`.
    pub fn new(field: F) -> Self {
        Self { field }
    }
}

impl<K, F> KeyHasher<K> for ByField<F>
where
    F: Fn(&K) -> u64,
{
    #[inline]
    fn reduce(&self, key: &K, modulus: usize) -> usize {
        ((self.field)(key) % modulus as u64) as usize
    }
}

/// Hashes any `Hash` key with a [`BuildHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Hashed<S> {
    hash_builder: S,
}

impl<S> Hashed<S> {
    /// Wraps `hash_builder`.
    pub fn new(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the wrapped hash builder.
    pub fn hash_builder(&self) -> &S {
        &self.hash_builder
    }
}

impl<K, S> KeyHasher<K> for Hashed<S>
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn reduce(&self, key: &K, modulus: usize) -> usize {
        (self.hash_builder.hash_one(key) % modulus as u64) as usize
    }
}
