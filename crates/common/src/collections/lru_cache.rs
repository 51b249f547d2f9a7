#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! An arena-backed Least Recently Used (LRU) list with `O(1)` promote and
//! evict.
//!
//! # Complexity
//! - `new`, `cap`, `len`, `is_empty`: `O(1)`.
//! - `insert`, `get`, `peek`, `contains`: `O(1)` amortized.
//! - `iter`: `O(len)` to exhaust.
//!
//! # Layout
//! Entries live in a `Vec` of slots addressed by stable indices. Each slot
//! carries the indices of its neighbours, so "move to front" and "evict from
//! back" rewire indices instead of pointers. A `HashMap` from key to slot
//! index gives constant-time lookup. Vacated slots go to a free list and are
//! reused by later inserts.
//!
//! # Thread Safety
//! - `LruCache` holds no locks; wrap it in a synchronization primitive to share
//!   across threads (the runtime tier's `RecencyCache` does).
//!
//! # Eviction Policy
//! - A successful `insert` or `get` promotes the entry to the most recently
//!   used (MRU) position; `peek` and `contains` never reorder.
//! - Inserting a new key into a full list evicts the least recently used (LRU)
//!   entry before the new entry is attached, so `len <= cap` always holds.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::num::NonZeroUsize;
use std::sync::Arc;

type NodeSlot<K, V> = Option<Node<K, V>>;

/// LRU list backed by an indexable doubly linked list stored in a `Vec`.
///
/// Keys are held behind `Arc` so the slot and the index share one allocation
/// and the list stays `Send + Sync` whenever `K` and `V` are.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use std::sync::Arc;
///
/// use patterncache_common::collections::LruCache;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
/// cache.insert(Arc::new("k1"), "v1");
/// cache.insert(Arc::new("k2"), "v2");
/// assert_eq!(cache.get(&"k1"), Some(&"v1"));
/// let evicted = cache.insert(Arc::new("k3"), "v3");
/// assert_eq!(evicted.map(|(key, _)| *key), Some("k2"));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash,
{
    capacity: NonZeroUsize,
    map: HashMap<Arc<K>, usize>,
    nodes: Vec<NodeSlot<K, V>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates a list with the provided non-zero capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.get()),
            nodes: Vec::with_capacity(capacity.get()),
            free_list: Vec::new(),
            capacity,
            head: None,
            tail: None,
        }
    }

    /// Returns the maximum number of elements stored without evicting.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the number of elements currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` when the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Inserts a new entry at the MRU position.
    ///
    /// When the list is full, the LRU entry is detached first and returned.
    /// If `key` is already present its value is replaced and the entry is
    /// promoted; nothing is evicted in that case.
    pub fn insert(&mut self, key: Arc<K>, value: V) -> Option<(Arc<K>, V)> {
        if let Some(&index) = self.map.get(&key) {
            if let Some(node) = self.nodes[index].as_mut() {
                node.value = value;
            }
            self.promote(index);
            return None;
        }

        let evicted = if self.len() == self.capacity.get() { self.evict_lru() } else { None };

        let index = self.allocate_slot(Arc::clone(&key), value);
        self.attach_front(index);
        self.map.insert(key, index);
        evicted
    }

    /// Retrieves a value by key, promoting the entry to MRU when found.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let &index = self.map.get(key)?;
        self.promote(index);
        self.nodes[index].as_ref().map(|node| &node.value)
    }

    /// Reads a value by key without altering the recency order.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).and_then(|&index| self.nodes[index].as_ref().map(|node| &node.value))
    }

    /// Returns `true` when a value associated with `key` exists.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns an iterator that yields entries from MRU to LRU.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { cache: self, current: self.head, remaining: self.len() }
    }

    fn allocate_slot(&mut self, key: Arc<K>, value: V) -> usize {
        if let Some(index) = self.free_list.pop() {
            self.nodes[index] = Some(Node::new(key, value));
            index
        } else {
            self.nodes.push(Some(Node::new(key, value)));
            self.nodes.len() - 1
        }
    }

    fn promote(&mut self, index: usize) {
        if self.head == Some(index) {
            return;
        }
        self.detach(index);
        self.attach_front(index);
    }

    fn evict_lru(&mut self) -> Option<(Arc<K>, V)> {
        let index = self.tail?;
        self.detach(index);
        let node = self.nodes[index].take()?;
        self.map.remove(&node.key);
        self.free_list.push(index);
        Some((node.key, node.value))
    }

    fn detach(&mut self, index: usize) {
        let (prev, next) = match self.nodes.get(index).and_then(Option::as_ref) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_index) => {
                if let Some(prev_node) = self.nodes.get_mut(prev_index).and_then(Option::as_mut) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_index) => {
                if let Some(next_node) = self.nodes.get_mut(next_index).and_then(Option::as_mut) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_index) = self.head {
            if let Some(head_node) = self.nodes.get_mut(head_index).and_then(Option::as_mut) {
                head_node.prev = Some(index);
            }
        } else {
            self.tail = Some(index);
        }

        self.head = Some(index);
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("free_slots", &self.free_list.len())
            .finish()
    }
}

#[derive(Debug)]
struct Node<K, V> {
    key: Arc<K>,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<K, V> Node<K, V> {
    fn new(key: Arc<K>, value: V) -> Self {
        Self { key, value, prev: None, next: None }
    }
}

/// Iterator over entries from MRU to LRU.
pub struct Iter<'a, K, V>
where
    K: Eq + Hash,
{
    cache: &'a LruCache<K, V>,
    current: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Eq + Hash,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        let node = self.cache.nodes.get(index).and_then(Option::as_ref)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key.as_ref(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> where K: Eq + Hash {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> where K: Eq + Hash {}
