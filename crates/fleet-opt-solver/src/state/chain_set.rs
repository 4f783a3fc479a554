// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::state::index::{ChainIndex, NodeIndex};

/// A set of doubly linked chains over an arena of action nodes.
///
/// Layout: the first `2 * num_chains` slots are per-chain start/end
/// sentinels (chain `c` owns slots `2c` and `2c + 1`); action nodes follow.
/// Keeping the sentinels at the front lets the arena grow in place when a
/// new task is admitted mid-search.
///
/// An action node that is not linked into any chain points to itself
/// (`next[i] == prev[i] == i`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSet {
    next: Vec<NodeIndex>,
    prev: Vec<NodeIndex>,
    chain_of: Vec<Option<ChainIndex>>,
    num_chains: usize,
}

impl ChainSet {
    pub fn new(num_chains: usize, num_action_nodes: usize) -> Self {
        let sentinel_slots = 2 * num_chains;
        let total = sentinel_slots + num_action_nodes;

        let mut next = Vec::with_capacity(total);
        let mut prev = Vec::with_capacity(total);
        let mut chain_of = Vec::with_capacity(total);

        for c in 0..num_chains {
            let start = 2 * c;
            let end = start + 1;
            // start sentinel
            next.push(NodeIndex::new(end));
            prev.push(NodeIndex::new(start));
            chain_of.push(Some(ChainIndex::new(c)));
            // end sentinel
            next.push(NodeIndex::new(end));
            prev.push(NodeIndex::new(start));
            chain_of.push(Some(ChainIndex::new(c)));
        }

        for i in sentinel_slots..total {
            next.push(NodeIndex::new(i));
            prev.push(NodeIndex::new(i));
            chain_of.push(None);
        }

        Self {
            next,
            prev,
            chain_of,
            num_chains,
        }
    }

    #[inline]
    pub fn num_chains(&self) -> usize {
        self.num_chains
    }

    #[inline]
    pub fn num_action_nodes(&self) -> usize {
        self.next.len() - 2 * self.num_chains
    }

    /// Appends a fresh unassigned action node and returns its index.
    #[inline]
    pub fn push_node(&mut self) -> NodeIndex {
        let node = NodeIndex::new(self.next.len());
        self.next.push(node);
        self.prev.push(node);
        self.chain_of.push(None);
        node
    }

    /// Arena index of the `slot`-th action node.
    #[inline]
    pub fn node_of_slot(&self, slot: usize) -> NodeIndex {
        debug_assert!(slot < self.num_action_nodes(), "action slot out of bounds");
        NodeIndex::new(2 * self.num_chains + slot)
    }

    /// Action slot of an arena node. Must not be a sentinel.
    #[inline]
    pub fn slot_of_node(&self, node: NodeIndex) -> usize {
        debug_assert!(!self.is_sentinel(node), "sentinels carry no action slot");
        node.get() - 2 * self.num_chains
    }

    #[inline]
    pub fn start(&self, chain: ChainIndex) -> NodeIndex {
        debug_assert!(chain.get() < self.num_chains, "chain out of bounds");
        NodeIndex::new(2 * chain.get())
    }

    #[inline]
    pub fn end(&self, chain: ChainIndex) -> NodeIndex {
        debug_assert!(chain.get() < self.num_chains, "chain out of bounds");
        NodeIndex::new(2 * chain.get() + 1)
    }

    #[inline]
    pub fn is_sentinel(&self, node: NodeIndex) -> bool {
        node.get() < 2 * self.num_chains
    }

    #[inline]
    pub fn next(&self, node: NodeIndex) -> NodeIndex {
        self.next[node.get()]
    }

    #[inline]
    pub fn prev(&self, node: NodeIndex) -> NodeIndex {
        self.prev[node.get()]
    }

    /// The chain an action node is linked into, if any.
    #[inline]
    pub fn chain_of(&self, node: NodeIndex) -> Option<ChainIndex> {
        self.chain_of[node.get()]
    }

    #[inline]
    pub fn is_assigned(&self, node: NodeIndex) -> bool {
        debug_assert!(!self.is_sentinel(node), "sentinels are never assigned");
        self.chain_of[node.get()].is_some()
    }

    /// First action node of a chain, or `None` for an empty chain.
    #[inline]
    pub fn head(&self, chain: ChainIndex) -> Option<NodeIndex> {
        let first = self.next(self.start(chain));
        if first == self.end(chain) {
            None
        } else {
            Some(first)
        }
    }

    #[inline]
    pub fn is_chain_empty(&self, chain: ChainIndex) -> bool {
        self.head(chain).is_none()
    }

    /// Links `node` immediately after `anchor`. `anchor` must be a start
    /// sentinel or an assigned action node; `node` must be unassigned.
    pub fn insert_after(&mut self, anchor: NodeIndex, node: NodeIndex) {
        assert!(
            !self.is_sentinel(node),
            "cannot link a sentinel as an action node ({})",
            node
        );
        assert!(
            !self.is_assigned(node),
            "node {} is already linked into a chain",
            node
        );
        let chain = self.chain_of[anchor.get()].unwrap_or_else(|| {
            panic!("anchor {} is not part of any chain", anchor)
        });
        assert!(
            anchor != self.end(chain),
            "cannot insert after the end sentinel of {}",
            chain
        );

        let old_next = self.next(anchor);
        self.next[anchor.get()] = node;
        self.prev[node.get()] = anchor;
        self.next[node.get()] = old_next;
        self.prev[old_next.get()] = node;
        self.chain_of[node.get()] = Some(chain);
    }

    /// Unlinks an assigned action node, reconnecting its neighbors.
    pub fn remove(&mut self, node: NodeIndex) {
        assert!(
            !self.is_sentinel(node),
            "cannot remove a sentinel ({})",
            node
        );
        assert!(
            self.is_assigned(node),
            "node {} is not linked into any chain",
            node
        );

        let before = self.prev(node);
        let after = self.next(node);
        self.next[before.get()] = after;
        self.prev[after.get()] = before;
        self.next[node.get()] = node;
        self.prev[node.get()] = node;
        self.chain_of[node.get()] = None;
    }

    /// Iterates the action nodes of a chain in order.
    pub fn iter_chain(&self, chain: ChainIndex) -> ChainIter<'_> {
        ChainIter {
            set: self,
            current: self.next(self.start(chain)),
            end: self.end(chain),
        }
    }

    /// Number of action nodes currently linked into a chain.
    pub fn chain_len(&self, chain: ChainIndex) -> usize {
        self.iter_chain(chain).count()
    }
}

pub struct ChainIter<'a> {
    set: &'a ChainSet,
    current: NodeIndex,
    end: NodeIndex,
}

impl Iterator for ChainIter<'_> {
    type Item = NodeIndex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.end {
            return None;
        }
        let node = self.current;
        self.current = self.set.next(node);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn ci(c: usize) -> ChainIndex {
        ChainIndex::new(c)
    }

    #[test]
    fn test_new_chains_are_empty() {
        let set = ChainSet::new(3, 4);
        assert_eq!(set.num_chains(), 3);
        assert_eq!(set.num_action_nodes(), 4);
        for c in 0..3 {
            assert!(set.is_chain_empty(ci(c)), "fresh chain {} must be empty", c);
            assert_eq!(set.chain_len(ci(c)), 0);
        }
    }

    #[test]
    fn test_fresh_action_nodes_are_self_loops() {
        let set = ChainSet::new(2, 2);
        for slot in 0..2 {
            let n = set.node_of_slot(slot);
            assert_eq!(set.next(n), n);
            assert_eq!(set.prev(n), n);
            assert_eq!(set.chain_of(n), None);
        }
    }

    #[test]
    fn test_insert_and_iterate_in_order() {
        let mut set = ChainSet::new(1, 3);
        let (a, b, c) = (
            set.node_of_slot(0),
            set.node_of_slot(1),
            set.node_of_slot(2),
        );

        set.insert_after(set.start(ci(0)), a);
        set.insert_after(a, c);
        set.insert_after(a, b); // between a and c

        let order: Vec<NodeIndex> = set.iter_chain(ci(0)).collect();
        assert_eq!(order, vec![a, b, c]);
        assert_eq!(set.head(ci(0)), Some(a));
        assert_eq!(set.chain_len(ci(0)), 3);
        for n in [a, b, c] {
            assert_eq!(set.chain_of(n), Some(ci(0)));
        }
    }

    #[test]
    fn test_remove_reconnects_neighbors() {
        let mut set = ChainSet::new(1, 3);
        let (a, b, c) = (
            set.node_of_slot(0),
            set.node_of_slot(1),
            set.node_of_slot(2),
        );
        set.insert_after(set.start(ci(0)), a);
        set.insert_after(a, b);
        set.insert_after(b, c);

        set.remove(b);

        let order: Vec<NodeIndex> = set.iter_chain(ci(0)).collect();
        assert_eq!(order, vec![a, c]);
        // Removed node reverts to the unassigned self-loop state.
        assert_eq!(set.next(b), b);
        assert_eq!(set.prev(b), b);
        assert_eq!(set.chain_of(b), None);
    }

    #[test]
    fn test_remove_head_updates_head() {
        let mut set = ChainSet::new(1, 2);
        let (a, b) = (set.node_of_slot(0), set.node_of_slot(1));
        set.insert_after(set.start(ci(0)), a);
        set.insert_after(a, b);

        set.remove(a);
        assert_eq!(set.head(ci(0)), Some(b));

        set.remove(b);
        assert!(set.is_chain_empty(ci(0)));
    }

    #[test]
    fn test_chains_are_independent() {
        let mut set = ChainSet::new(2, 2);
        let (a, b) = (set.node_of_slot(0), set.node_of_slot(1));
        set.insert_after(set.start(ci(0)), a);
        set.insert_after(set.start(ci(1)), b);

        assert_eq!(set.iter_chain(ci(0)).collect::<Vec<_>>(), vec![a]);
        assert_eq!(set.iter_chain(ci(1)).collect::<Vec<_>>(), vec![b]);
        assert_eq!(set.chain_of(a), Some(ci(0)));
        assert_eq!(set.chain_of(b), Some(ci(1)));
    }

    #[test]
    fn test_push_node_grows_arena_without_touching_chains() {
        let mut set = ChainSet::new(2, 0);
        let a = set.push_node();
        set.insert_after(set.start(ci(1)), a);

        let b = set.push_node();
        assert_eq!(set.num_action_nodes(), 2);
        assert_eq!(set.chain_of(b), None);
        // The earlier link is untouched by growth.
        assert_eq!(set.iter_chain(ci(1)).collect::<Vec<_>>(), vec![a]);
        assert_eq!(set.slot_of_node(b), 1);
        assert_eq!(set.node_of_slot(1), b);
    }

    #[test]
    #[should_panic(expected = "already linked")]
    fn test_double_insert_is_rejected() {
        let mut set = ChainSet::new(2, 1);
        let a = set.node_of_slot(0);
        set.insert_after(set.start(ci(0)), a);
        set.insert_after(set.start(ci(1)), a);
    }

    #[test]
    #[should_panic(expected = "not linked")]
    fn test_remove_unassigned_is_rejected() {
        let mut set = ChainSet::new(1, 1);
        let a = set.node_of_slot(0);
        set.remove(a);
    }

    #[test]
    #[should_panic(expected = "end sentinel")]
    fn test_insert_after_end_sentinel_is_rejected() {
        let mut set = ChainSet::new(1, 1);
        let a = set.node_of_slot(0);
        set.insert_after(set.end(ci(0)), a);
    }
}
