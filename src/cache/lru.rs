//! Recency Index Module
//!
//! Implements Least Recently Used ordering for cache eviction as an
//! arena-backed doubly linked list. Nodes are addressed by integer slot
//! handles that the store keeps in each entry, so every operation is O(1).

use std::mem;

/// Handle of a node in the recency arena.
pub type Slot = usize;

/// Sentinel on the most-recently-used side.
const HEAD: Slot = 0;
/// Sentinel on the least-recently-used side.
const TAIL: Slot = 1;
/// Link value of a node sitting on the free list.
const DETACHED: Slot = usize::MAX;

#[derive(Debug)]
struct Node {
    key: String,
    prev: Slot,
    next: Slot,
}

// == Recency Index ==
/// Tracks access order for LRU eviction strategy.
///
/// Layout:
/// - `HEAD.next` = most recently used
/// - `TAIL.prev` = least recently used
///
/// Freed slots are recycled through a free list, so the arena never grows
/// past the peak number of live keys plus the two sentinels.
#[derive(Debug)]
pub struct RecencyIndex {
    nodes: Vec<Node>,
    free: Vec<Slot>,
    len: usize,
}

impl Default for RecencyIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node {
            key: String::new(),
            prev: DETACHED,
            next: TAIL,
        });
        nodes.push(Node {
            key: String::new(),
            prev: HEAD,
            next: DETACHED,
        });

        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Insert At Front ==
    /// Adds a key as the most recently used node and returns its slot.
    ///
    /// The caller guarantees the key is not already tracked.
    pub fn insert_at_front(&mut self, key: String) -> Slot {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot].key = key;
                slot
            }
            None => {
                self.nodes.push(Node {
                    key,
                    prev: DETACHED,
                    next: DETACHED,
                });
                self.nodes.len() - 1
            }
        };

        self.link_front(slot);
        self.len += 1;
        slot
    }

    // == Move To Front ==
    /// Marks a tracked node as most recently used.
    pub fn move_to_front(&mut self, slot: Slot) {
        debug_assert!(self.is_live(slot), "move_to_front on dead slot {slot}");
        if self.nodes[HEAD].next == slot {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    // == Remove ==
    /// Detaches a tracked node and returns its key.
    pub fn remove(&mut self, slot: Slot) -> String {
        debug_assert!(self.is_live(slot), "remove on dead slot {slot}");
        self.unlink(slot);
        self.len -= 1;
        self.free.push(slot);
        mem::take(&mut self.nodes[slot].key)
    }

    // == Remove Oldest ==
    /// Detaches the least recently used node and returns its key.
    ///
    /// Returns None if the index is empty.
    pub fn remove_oldest(&mut self) -> Option<String> {
        let oldest = self.nodes[TAIL].prev;
        if oldest == HEAD {
            None
        } else {
            Some(self.remove(oldest))
        }
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        let oldest = self.nodes[TAIL].prev;
        (oldest != HEAD).then(|| self.nodes[oldest].key.as_str())
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            index: self,
            cursor: self.nodes[HEAD].next,
        }
    }

    /// O(1) check that both sentinels are linked to neighbours that point
    /// back at them.
    pub(crate) fn boundaries_consistent(&self) -> bool {
        let first = self.nodes[HEAD].next;
        let last = self.nodes[TAIL].prev;
        self.nodes[first].prev == HEAD
            && self.nodes[last].next == TAIL
            && ((first == TAIL) == (self.len == 0))
    }

    fn is_live(&self, slot: Slot) -> bool {
        slot > TAIL && slot < self.nodes.len() && self.nodes[slot].prev != DETACHED
    }

    fn link_front(&mut self, slot: Slot) {
        let first = self.nodes[HEAD].next;
        self.nodes[slot].prev = HEAD;
        self.nodes[slot].next = first;
        self.nodes[first].prev = slot;
        self.nodes[HEAD].next = slot;
    }

    fn unlink(&mut self, slot: Slot) {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[slot].prev = DETACHED;
        self.nodes[slot].next = DETACHED;
    }
}

/// Iterator over keys in recency order, MRU first.
pub struct Iter<'a> {
    index: &'a RecencyIndex,
    cursor: Slot,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let node = &self.index.nodes[self.cursor];
        self.cursor = node.next;
        Some(node.key.as_str())
    }
}
