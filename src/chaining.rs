use alloc::vec::Vec;
use core::borrow::Borrow;
use core::mem;

/// Index of a node in the arena.
type Link = Option<usize>;

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    next: Link,
}

/// Separate chaining over a node arena.
///
/// Each bucket holds the head link of a singly linked chain. Nodes live in
/// `nodes` and are linked by index; freed nodes are recycled through `free`.
/// Entries are appended at the tail, so a chain lists its keys in insertion
/// order.
#[derive(Debug, Clone)]
pub(crate) struct ChainStore<K, V> {
    heads: Vec<Link>,
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    populated: usize,
}

impl<K, V> ChainStore<K, V> {
    pub(crate) fn new(buckets: usize) -> Self {
        Self {
            heads: alloc::vec![None; buckets],
            nodes: Vec::new(),
            free: Vec::new(),
            populated: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.populated
    }

    pub(crate) fn buckets(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn clear(&mut self) {
        self.heads.fill(None);
        self.nodes.clear();
        self.free.clear();
        self.populated = 0;
    }

    #[inline]
    fn node(&self, index: usize) -> &Node<K, V> {
        match &self.nodes[index] {
            Some(node) => node,
            None => unreachable!("chain link {index} points at a freed node"),
        }
    }

    #[inline]
    fn node_mut(&mut self, index: usize) -> &mut Node<K, V> {
        match &mut self.nodes[index] {
            Some(node) => node,
            None => unreachable!("chain link {index} points at a freed node"),
        }
    }

    fn alloc(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) -> Node<K, V> {
        match self.nodes[index].take() {
            Some(node) => {
                self.free.push(index);
                node
            }
            None => unreachable!("chain node {index} released twice"),
        }
    }

    /// Inserts `key` at the tail of `bucket`'s chain, or replaces its value if
    /// the chain already holds it.
    pub(crate) fn insert(&mut self, bucket: usize, key: K, value: V) -> Option<V>
    where
        K: Eq,
    {
        let mut tail = None;
        let mut cursor = self.heads[bucket];
        while let Some(index) = cursor {
            let next = self.node(index).next;
            if self.node(index).key == key {
                debug_assert!(
                    !self.chain_contains(next, &key),
                    "duplicate key invariant violated in bucket {bucket}"
                );
                return Some(mem::replace(&mut self.node_mut(index).value, value));
            }
            tail = Some(index);
            cursor = next;
        }

        let index = self.alloc(Node {
            key,
            value,
            next: None,
        });
        match tail {
            None => self.heads[bucket] = Some(index),
            Some(tail) => self.node_mut(tail).next = Some(index),
        }
        self.populated += 1;
        None
    }

    fn chain_contains(&self, mut cursor: Link, key: &K) -> bool
    where
        K: Eq,
    {
        while let Some(index) = cursor {
            let node = self.node(index);
            if node.key == *key {
                return true;
            }
            cursor = node.next;
        }
        false
    }

    /// Walks `bucket`'s chain for `key`, returning its node and the number of
    /// key comparisons made.
    pub(crate) fn find<Q>(&self, bucket: usize, key: &Q) -> (Option<usize>, u64)
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut comparisons = 0;
        let mut cursor = self.heads[bucket];
        while let Some(index) = cursor {
            let node = self.node(index);
            comparisons += 1;
            if key.eq(node.key.borrow()) {
                return (Some(index), comparisons);
            }
            cursor = node.next;
        }
        (None, comparisons)
    }

    pub(crate) fn get(&self, index: usize) -> (&K, &V) {
        let node = self.node(index);
        (&node.key, &node.value)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut V {
        &mut self.node_mut(index).value
    }

    /// Unlinks `key` from `bucket`'s chain, joining its predecessor (or the
    /// bucket head) to its successor.
    pub(crate) fn delete<Q>(&mut self, bucket: usize, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut prev = None;
        let mut cursor = self.heads[bucket];
        while let Some(index) = cursor {
            let node = self.node(index);
            let next = node.next;
            if key.eq(node.key.borrow()) {
                match prev {
                    None => self.heads[bucket] = next,
                    Some(prev) => self.node_mut(prev).next = next,
                }
                self.populated -= 1;
                return Some(self.release(index).value);
            }
            prev = Some(index);
            cursor = next;
        }
        None
    }

    pub(crate) fn chain(&self, bucket: usize) -> ChainIter<'_, K, V> {
        ChainIter {
            store: self,
            cursor: self.heads[bucket],
        }
    }

    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        self.chain(bucket).count()
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            store: self,
            bucket: 0,
            chain: None,
        }
    }
}

/// Iterator over one bucket's chain, head to tail.
pub(crate) struct ChainIter<'a, K, V> {
    store: &'a ChainStore<K, V>,
    cursor: Link,
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.store.node(self.cursor?);
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}

/// Iterator over every entry, bucket by bucket.
pub(crate) struct Iter<'a, K, V> {
    store: &'a ChainStore<K, V>,
    bucket: usize,
    chain: Option<ChainIter<'a, K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            if self.bucket >= self.store.buckets() {
                return None;
            }
            self.chain = Some(self.store.chain(self.bucket));
            self.bucket += 1;
        }
    }
}
