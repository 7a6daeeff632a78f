//! Probe sequences for the open-addressing strategies.
//!
//! A [`ProbeSequence`] yields the candidate slots for one key, in order, and
//! never yields the same slot twice. It ends once every slot has been visited
//! or after `size` steps, whichever comes first. Because every probe function
//! here is periodic in `size`, the sequence covers every slot the function can
//! reach, and a table that has no free slot on that path is reported as full
//! instead of being probed forever.
//!
//! Only quadratic probing can repeat a slot before its cycle closes, so it is
//! the only function that tracks visited slots, and only from its second
//! step on. Linear steps are distinct below `size`, and a double-hashing
//! sequence first repeats when it returns to its origin.

use alloc::vec;
use alloc::vec::Vec;
use core::iter::FusedIterator;

/// Open-addressing probe function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probing {
    /// `(origin + j) mod size`
    Linear,
    /// `(origin + j²) mod size`
    Quadratic,
    /// `(origin + j·step) mod size`, where `step` is the secondary hash.
    Double,
}

impl Probing {
    /// Index probed at step `j`.
    #[inline(always)]
    pub fn index(self, origin: usize, j: usize, step: usize, size: usize) -> usize {
        let j = j as u128;
        let offset = match self {
            Probing::Linear => j,
            Probing::Quadratic => j * j,
            Probing::Double => j * step as u128,
        };
        ((origin as u128 + offset) % size as u128) as usize
    }
}

/// Fixed-size bitmap of visited slot indices.
#[derive(Debug, Clone)]
struct Visited {
    words: Vec<u64>,
}

impl Visited {
    /// A bitmap for `size` slots with `origin` already marked.
    fn starting_at(size: usize, origin: usize) -> Self {
        let mut visited = Self {
            words: vec![0; size.div_ceil(64)],
        };
        visited.insert(origin);
        visited
    }

    /// Marks `index`, returning `false` if it was already marked.
    #[inline(always)]
    fn insert(&mut self, index: usize) -> bool {
        let mask = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        true
    }
}

/// Iterator over the distinct slot indices probed for one key.
///
/// # Examples
///
/// ```rust
/// use probe_hash::probe::ProbeSequence;
/// use probe_hash::probe::Probing;
///
/// let linear: Vec<usize> = ProbeSequence::new(Probing::Linear, 8, 1, 10).collect();
/// assert_eq!(linear, [8, 9, 0, 1, 2, 3, 4, 5, 6, 7]);
///
/// // Squares mod 10 only reach six residues.
/// let quadratic: Vec<usize> = ProbeSequence::new(Probing::Quadratic, 0, 1, 10).collect();
/// assert_eq!(quadratic, [0, 1, 4, 9, 6, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    probing: Probing,
    origin: usize,
    step: usize,
    size: usize,
    j: usize,
    yielded: usize,
    visited: Option<Visited>,
}

impl ProbeSequence {
    /// Starts a sequence at `origin` in a table of `size` slots.
    ///
    /// `step` is only read by [`Probing::Double`]. A step that is a multiple
    /// of `size` never leaves `origin`, so that sequence yields `origin` alone.
    pub fn new(probing: Probing, origin: usize, step: usize, size: usize) -> Self {
        debug_assert!(origin < size, "origin {origin} outside a {size}-slot table");
        Self {
            probing,
            origin,
            step,
            size,
            j: 0,
            yielded: 0,
            visited: None,
        }
    }

    /// The slot the sequence started from.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Number of distinct slots yielded so far.
    pub fn visited(&self) -> usize {
        self.yielded
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.j < self.size && self.yielded < self.size {
            let j = self.j;
            let index = self.probing.index(self.origin, j, self.step, self.size);
            self.j += 1;

            let fresh = match self.probing {
                _ if j == 0 => true,
                Probing::Linear => true,
                Probing::Double if index == self.origin => {
                    // The cycle has closed; every later index is a repeat.
                    self.j = self.size;
                    return None;
                }
                Probing::Double => true,
                Probing::Quadratic => {
                    let (size, origin) = (self.size, self.origin);
                    self.visited
                        .get_or_insert_with(|| Visited::starting_at(size, origin))
                        .insert(index)
                }
            };
            if fresh {
                self.yielded += 1;
                return Some(index);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.size - self.j))
    }
}

impl FusedIterator for ProbeSequence {}
