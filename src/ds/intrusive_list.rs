//! Intrusive doubly linked list backed by `SlotArena`.
//!
//! Stores list nodes in a `SlotArena` and links them by `SlotId`, which gives
//! stable handles and O(1) splices without reference cycles.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Operations
//! - `move_to_back(id)`: detach + attach at tail
//! - `move_after(id, anchor)` / `move_before(id, anchor)`: detach + relink
//!   next to `anchor`; one adjacent swap when `anchor` is a neighbour
//! - `remove(id)`: detach + free slot in arena
//!
//! ## Performance
//! - every push / pop / move: O(1)
//! - `iter`: O(n)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list whose nodes live in a `SlotArena` and link via `SlotId`.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
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

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the id of the node after `id`.
    pub fn next_id(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).and_then(|node| node.next)
    }

    /// Returns the id of the node before `id`.
    pub fn prev_id(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).and_then(|node| node.prev)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Returns an iterator from front (head) to back (tail).
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.head,
        }
    }

    /// Inserts a new node at the front and returns its `SlotId`.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        id
    }

    /// Inserts a new node at the back and returns its `SlotId`.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_back(id);
        id
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes the node `id` from the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the back; returns `false` if `id` is not present.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.tail {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    /// Relinks `id` directly after `anchor`.
    ///
    /// Returns `false` if either node is missing or `id == anchor`.
    pub fn move_after(&mut self, id: SlotId, anchor: SlotId) -> bool {
        if id == anchor || !self.arena.contains(id) || !self.arena.contains(anchor) {
            return false;
        }
        self.detach(id);
        let next = self.next_id(anchor);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = Some(anchor);
            node.next = next;
        }
        if let Some(anchor_node) = self.arena.get_mut(anchor) {
            anchor_node.next = Some(id);
        }
        match next {
            Some(next) => {
                if let Some(next_node) = self.arena.get_mut(next) {
                    next_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        true
    }

    /// Relinks `id` directly before `anchor`.
    ///
    /// Returns `false` if either node is missing or `id == anchor`.
    pub fn move_before(&mut self, id: SlotId, anchor: SlotId) -> bool {
        if id == anchor || !self.arena.contains(id) || !self.arena.contains(anchor) {
            return false;
        }
        self.detach(id);
        let prev = self.prev_id(anchor);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
            node.next = Some(anchor);
        }
        if let Some(anchor_node) = self.arena.get_mut(anchor) {
            anchor_node.prev = Some(id);
        }
        match prev {
            Some(prev) => {
                if let Some(prev_node) = self.arena.get_mut(prev) {
                    prev_node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.arena.get_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
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

    fn attach_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(old_tail) => {
                if let Some(tail_node) = self.arena.get_mut(old_tail) {
                    tail_node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id));
            let node = self.arena.get(id).expect("node missing");
            assert_eq!(node.prev, prev);
            if let Some(next_id) = node.next {
                let next_node = self.arena.get(next_id).expect("next node missing");
                assert_eq!(next_node.prev, Some(id));
            } else {
                assert_eq!(self.tail, Some(id));
            }

            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(SlotId, &T)` pairs from front to back.
pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().map(|(_, v)| *v).collect()
    }

    #[test]
    fn push_pop_order() {
        let mut list = IntrusiveList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_front(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_back_from_head_middle_and_tail() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec!['a', 'b', 'c']);

        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec!['b', 'c', 'a']);
        assert_eq!(list.front_id(), Some(b));

        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec!['b', 'a', 'c']);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_after_neighbour_is_adjacent_swap() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        assert!(list.move_after(a, b));
        assert_eq!(values(&list), vec!['b', 'a', 'c']);
        assert_eq!(list.front_id(), Some(b));

        assert!(list.move_after(a, c));
        assert_eq!(values(&list), vec!['b', 'c', 'a']);
        assert_eq!(list.back_id(), Some(a));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_before_neighbour_is_adjacent_swap() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        assert!(list.move_before(c, b));
        assert_eq!(values(&list), vec!['a', 'c', 'b']);
        assert_eq!(list.back_id(), Some(b));

        assert!(list.move_before(c, a));
        assert_eq!(values(&list), vec!['c', 'a', 'b']);
        assert_eq!(list.front_id(), Some(c));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_rejects_self_and_missing() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        assert!(!list.move_after(a, a));
        list.remove(b);
        assert!(!list.move_after(a, b));
        assert!(!list.move_before(b, a));
        assert!(!list.move_to_back(b));
        list.debug_validate_invariants();
    }

    #[test]
    fn neighbour_queries() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        assert_eq!(list.next_id(a), Some(b));
        assert_eq!(list.prev_id(b), Some(a));
        assert_eq!(list.prev_id(a), None);
        assert_eq!(list.next_id(b), None);
    }

    #[test]
    fn remove_middle_relinks_neighbours() {
        let mut list = IntrusiveList::new();
        list.push_back(1);
        let mid = list.push_back(2);
        list.push_back(3);
        assert_eq!(list.remove(mid), Some(2));
        assert_eq!(values(&list), vec![1, 3]);
        list.clear();
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }
}
