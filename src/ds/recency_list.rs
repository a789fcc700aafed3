//! Recency-ordered doubly linked list backed by [`SlotArena`].
//!
//! Nodes are linked by [`SlotId`] rather than pointers, so promoting an entry
//! to the most-recently-used end or unlinking it from the middle is O(1)
//! without any `unsafe`.
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None,       next: id_2 }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (MRU) ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail (LRU)
//! ```
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// List ordered from most recently used (front) to least recently used (back).
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Most recently used value.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Least recently used value.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Iterates `(SlotId, &T)` pairs from most to least recently used.
    pub fn iter_entries(&self) -> EntryIter<'_, T> {
        EntryIter {
            list: self,
            current: self.head,
        }
    }

    /// Links a new node at the most-recently-used end.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => {
                if let Some(node) = self.arena.get_mut(head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Unlinks and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Promotes `id` to the most-recently-used end; `false` if `id` is not live.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Unlinks and yields every value from most to least recently used.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { list: self }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            },
            None => return,
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev, "broken back link");
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id), "tail does not match last node");
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in recency list");
        }

        assert_eq!(count, self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

pub struct EntryIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for EntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}

pub struct Drain<'a, T> {
    list: &'a mut RecencyList<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.list.head?;
        self.list.remove(id)
    }
}

// An abandoned drain still empties the list.
impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_mru_first() {
        let mut list = RecencyList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"a"));
        assert_eq!(list.len(), 3);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_from_each_position() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "b", "a"]);

        assert!(list.move_to_front(b));
        assert_eq!(values(&list), vec!["b", "c", "a"]);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "b", "c"]);
        assert_eq!(list.back(), Some(&"c"));
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_back_returns_lru() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["c", "a"]);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"a"));

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn removed_id_cannot_be_promoted() {
        let mut list = RecencyList::new();
        let a = list.push_front('a');
        list.remove(a);
        let b = list.push_front('b');

        assert!(!list.move_to_front(a));
        assert!(list.contains(b));
        assert_eq!(list.remove(a), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn drain_empties_list_in_mru_order() {
        let mut list = RecencyList::with_capacity(3);
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        let drained: Vec<_> = list.drain().collect();
        assert_eq!(drained, vec![3, 2, 1]);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_state() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.push_front(2);
        list.clear();

        assert!(list.is_empty());
        assert!(!list.contains(a));
        assert_eq!(list.back_id(), None);
        assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn iter_entries_pairs_ids_with_values() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");

        let entries: Vec<_> = list.iter_entries().map(|(id, v)| (id, *v)).collect();
        assert_eq!(entries, vec![(b, "b"), (a, "a")]);
    }
}
