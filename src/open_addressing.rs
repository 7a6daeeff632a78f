use alloc::vec::Vec;
use core::borrow::Borrow;
use core::mem;

use crate::error::TableError;
use crate::probe::ProbeSequence;
use crate::probe::Probing;

/// State of one open-addressing slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot<K, V> {
    Empty,
    Occupied(K, V),
    /// A deleted entry. Searches probe through it, inserts may reuse it.
    Tombstone,
}

/// Fixed array of slots resolved by linear, quadratic or double-hash probing.
///
/// Every operation takes the key's `origin` (primary hash) and `step`
/// (secondary hash, read only by [`Probing::Double`]) from the owning table.
#[derive(Debug, Clone)]
pub(crate) struct SlotStore<K, V> {
    slots: Vec<Slot<K, V>>,
    probing: Probing,
    populated: usize,
    tombstones: usize,
}

impl<K, V> SlotStore<K, V> {
    pub(crate) fn new(size: usize, probing: Probing) -> Self {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || Slot::Empty);
        Self {
            slots,
            probing,
            populated: 0,
            tombstones: 0,
        }
    }

    #[inline]
    fn probe(&self, origin: usize, step: usize) -> ProbeSequence {
        ProbeSequence::new(self.probing, origin, step, self.slots.len())
    }

    pub(crate) fn len(&self) -> usize {
        self.populated
    }

    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.populated = 0;
        self.tombstones = 0;
    }

    /// Inserts or updates `key`.
    ///
    /// The probe continues past tombstones until an empty slot so that a key
    /// stored beyond a deleted entry is updated in place. A new key goes into
    /// the first tombstone or empty slot seen.
    pub(crate) fn insert(
        &mut self,
        origin: usize,
        step: usize,
        key: K,
        value: V,
    ) -> Result<Option<V>, TableError>
    where
        K: Eq,
    {
        let mut vacancy = None;
        let mut probe = self.probe(origin, step);

        for index in probe.by_ref() {
            match &mut self.slots[index] {
                Slot::Occupied(k, v) if *k == key => {
                    return Ok(Some(mem::replace(v, value)));
                }
                Slot::Occupied(..) => {}
                Slot::Tombstone => {
                    vacancy.get_or_insert(index);
                }
                Slot::Empty => {
                    vacancy.get_or_insert(index);
                    break;
                }
            }
        }

        let Some(index) = vacancy else {
            return Err(TableError::TableFull {
                capacity: self.slots.len(),
                probes: probe.visited(),
            });
        };

        if let Slot::Tombstone = self.slots[index] {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(key, value);
        self.populated += 1;

        #[cfg(debug_assertions)]
        self.assert_unique(origin, step, index);

        Ok(None)
    }

    /// Locates `key`, returning its slot and the number of non-empty slots
    /// inspected. An empty slot ends the search; tombstones do not.
    pub(crate) fn find<Q>(&self, origin: usize, step: usize, key: &Q) -> (Option<usize>, u64)
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut comparisons = 0;
        for index in self.probe(origin, step) {
            match &self.slots[index] {
                Slot::Empty => break,
                Slot::Tombstone => comparisons += 1,
                Slot::Occupied(k, _) => {
                    comparisons += 1;
                    if key.eq(k.borrow()) {
                        return (Some(index), comparisons);
                    }
                }
            }
        }
        (None, comparisons)
    }

    pub(crate) fn get(&self, index: usize) -> Option<(&K, &V)> {
        match &self.slots[index] {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        match &mut self.slots[index] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Replaces the slot holding `key` with a tombstone.
    pub(crate) fn delete<Q>(&mut self, origin: usize, step: usize, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.find(origin, step, key).0?;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.populated -= 1;
                self.tombstones += 1;
                Some(value)
            }
            _ => unreachable!("find returned slot {index} which is not occupied"),
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Panics if the key stored at `placed` appears in another occupied slot
    /// of its own probe sequence.
    #[cfg(debug_assertions)]
    fn assert_unique(&self, origin: usize, step: usize, placed: usize)
    where
        K: Eq,
    {
        let Slot::Occupied(key, _) = &self.slots[placed] else {
            return;
        };
        for index in self.probe(origin, step) {
            match &self.slots[index] {
                Slot::Empty => break,
                Slot::Occupied(k, _) if index != placed && k == key => {
                    panic!("duplicate key invariant violated: slots {placed} and {index} hold equal keys");
                }
                _ => {}
            }
        }
    }
}

/// Iterator over the live entries of a [`SlotStore`], in slot order.
pub(crate) struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }
}
