use std::mem::swap;

use super::AigHandle;

/// A node id.
///
/// The id of a node is its positive literal divided by 2. Id 0 is never a node:
/// literals 0 and 1 are the constants.
pub type NodeId = u64;

/// The largest node id whose literals (`2 * id + 1`) fit in a `u64`.
pub const MAX_NODE_ID: NodeId = NodeId::MAX >> 1;

/// The slot of a node inside the arena of its [`Aig`].
///
/// Slots never move: renumbering rewrites the ids stored in the nodes, not their position.
///
/// [`Aig`]: crate::Aig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An AIG node.
///
/// Latches only carry their id: their next-state source is recorded by the owning
/// [`Aig`] as it is usually known after all nodes are.
///
/// [`Aig`]: crate::Aig
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AigNode {
    /// A primary input.
    Input(NodeId),
    /// A latch (for sequential circuits).
    Latch(NodeId),
    /// An AND gate with two fanins.
    And {
        id: NodeId,
        fanin0: AigHandle,
        fanin1: AigHandle,
    },
}

impl AigNode {
    pub fn and(id: NodeId, fanin0: AigHandle, fanin1: AigHandle) -> Self {
        AigNode::And { id, fanin0, fanin1 }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, AigNode::Input(_))
    }

    pub fn is_latch(&self) -> bool {
        matches!(self, AigNode::Latch(_))
    }

    pub fn is_and(&self) -> bool {
        matches!(self, AigNode::And { .. })
    }

    pub fn get_id(&self) -> NodeId {
        match *self {
            AigNode::Input(id) => id,
            AigNode::Latch(id) => id,
            AigNode::And { id, .. } => id,
        }
    }

    /// The positive literal of the node.
    pub fn get_literal(&self) -> u64 {
        self.get_id() << 1
    }

    /// Rewrites the id, the owning AIG must keep its id table in sync.
    pub(super) fn set_id(&mut self, new_id: NodeId) {
        match self {
            AigNode::Input(id) | AigNode::Latch(id) | AigNode::And { id, .. } => *id = new_id,
        }
    }

    /// Returns the fanins if the node is an and gate, else returns [`None`].
    pub fn get_fanins(&self) -> Option<(AigHandle, AigHandle)> {
        match *self {
            AigNode::And { fanin0, fanin1, .. } => Some((fanin0, fanin1)),
            _ => None,
        }
    }

    /// Returns false if the node is not an and gate.
    pub(super) fn set_fanins(&mut self, src0: AigHandle, src1: AigHandle) -> bool {
        match self {
            AigNode::And { fanin0, fanin1, .. } => {
                *fanin0 = src0;
                *fanin1 = src1;
                true
            }
            _ => false,
        }
    }

    /// Swaps the fanins of an and gate if `key(fanin0) < key(fanin1)`.
    ///
    /// With the literal as key, this puts the higher id first and constants last,
    /// which is what the binary AIGER format expects.
    pub(super) fn reorder_fanins<K: Ord>(&mut self, key: impl Fn(&AigHandle) -> K) {
        if let AigNode::And { fanin0, fanin1, .. } = self {
            if key(fanin0) < key(fanin1) {
                swap(fanin0, fanin1);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn node_kind_test() {
        let i = AigNode::Input(1);
        let l = AigNode::Latch(2);
        let a = AigNode::and(3, AigHandle::zero(), AigHandle::one());
        assert!(i.is_input() && !i.is_latch() && !i.is_and());
        assert!(l.is_latch() && !l.is_and());
        assert!(a.is_and());
        assert_eq!(a.get_id(), 3);
        assert_eq!(a.get_literal(), 6);
        assert_eq!(i.get_fanins(), None);
        assert_eq!(a.get_fanins(), Some((AigHandle::zero(), AigHandle::one())));
    }

    #[test]
    fn set_fanins_and_id_test() {
        let mut i = AigNode::Input(1);
        assert!(!i.set_fanins(AigHandle::zero(), AigHandle::zero()));
        i.set_id(4);
        assert_eq!(i, AigNode::Input(4));

        let mut a = AigNode::and(3, AigHandle::zero(), AigHandle::zero());
        let h = AigHandle::new(NodeIndex(0), true);
        assert!(a.set_fanins(h, AigHandle::one()));
        assert_eq!(a.get_fanins(), Some((h, AigHandle::one())));
    }

    #[test]
    fn reorder_fanins_test() {
        let low = AigHandle::new(NodeIndex(0), false);
        let high = AigHandle::new(NodeIndex(1), false);
        let key = |h: &AigHandle| h.get_node().map(|n| n.index() + 1).unwrap_or(0);

        let mut a = AigNode::and(5, low, high);
        a.reorder_fanins(key);
        assert_eq!(a.get_fanins(), Some((high, low)));

        let mut b = AigNode::and(5, AigHandle::one(), low);
        b.reorder_fanins(key);
        assert_eq!(b.get_fanins(), Some((low, AigHandle::one())));

        let mut c = AigNode::and(5, high, low);
        c.reorder_fanins(key);
        assert_eq!(c.get_fanins(), Some((high, low)));
    }
}
