//! Module defining the [`Aig`] struct, as well as [`AigNode`], [`AigHandle`] and the AIGER codecs.
//!
//! To read a file, check [`Aig::from_file`], [`Aig::from_ascii`] and [`Aig::from_bin`].
//! To write one, check [`Aig::write_ascii`] and [`Aig::write_bin`].

pub mod builder;
pub mod error;
pub mod handle;
mod integrity;
pub mod literal;
pub mod node;
mod parser;
mod renumber;
mod symbols;
pub mod varint;
mod writer;

use std::collections::HashMap;

pub use builder::AigBuilder;
pub use error::{AigError, ErrorKind, ParserError, Result};
pub use handle::AigHandle;
pub use literal::Literal;
pub use node::{AigNode, MAX_NODE_ID, NodeId, NodeIndex};

/// Returns `list[pos]`, or an [`AigError::IndexOutOfRange`] error naming the section.
fn at<T: Copy>(list: &[T], pos: usize, what: &'static str) -> Result<T> {
    list.get(pos).copied().ok_or(AigError::IndexOutOfRange {
        what,
        pos,
        count: list.len(),
    })
}

/// A whole AIG.
///
/// Nodes live in an arena and are referred to by [`NodeIndex`]. Each node also carries an
/// AIGER id (its positive literal divided by 2), which is what the file formats see.
/// Inputs, latches and and gates are additionally listed by position, in declaration order,
/// and outputs are plain [`AigHandle`]s.
///
/// An AIG can be built node by node:
///
/// ```rust
/// use aigerio::{Aig, AigHandle};
/// let mut aig = Aig::new();
/// let a = AigHandle::from(aig.new_input().unwrap());
/// let b = AigHandle::from(aig.new_input().unwrap());
/// let g = aig.new_and(a, !b).unwrap();
/// aig.add_output(g).unwrap();
///
/// let mut out = Vec::new();
/// aig.write_ascii(&mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "aag 3 2 0 1 1\n2\n4\n6\n6 2 5\n");
/// ```
///
/// Cloning an AIG copies all of its nodes, the clone is completely unrelated to the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aig {
    nodes: Vec<AigNode>,
    /// id -> slot, kept in sync with the ids stored in the nodes.
    ids: HashMap<NodeId, NodeIndex>,
    /// The M of the header: never lower than any node id.
    max_var: NodeId,
    inputs: Vec<NodeIndex>,
    latches: Vec<NodeIndex>,
    latch_srcs: Vec<AigHandle>,
    outputs: Vec<AigHandle>,
    ands: Vec<NodeIndex>,
    input_symbols: Vec<String>,
    latch_symbols: Vec<String>,
    output_symbols: Vec<String>,
    comment: String,
}

impl Aig {
    /// Create a brand new empty AIG.
    pub fn new() -> Self {
        Aig::default()
    }

    /// Pushes a node whose id is fresh and non-zero.
    fn push_node(&mut self, node: AigNode) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        let id = node.get_id();
        self.ids.insert(id, idx);
        self.max_var = self.max_var.max(id);
        self.nodes.push(node);
        idx
    }

    fn check_handle(&self, handle: AigHandle) -> Result<()> {
        match handle.get_node() {
            Some(node) if node.0 >= self.nodes.len() => Err(AigError::InvalidHandle(node.0)),
            _ => Ok(()),
        }
    }

    /// The id following `M`, failing once ids no longer fit in literals.
    fn next_id(&self) -> Result<NodeId> {
        let id = self.max_var.saturating_add(1);
        if id > MAX_NODE_ID {
            return Err(AigError::IdTooLarge(id));
        }
        Ok(id)
    }

    /// Creates a new input with the next free id.
    pub fn new_input(&mut self) -> Result<NodeIndex> {
        let idx = self.push_node(AigNode::Input(self.next_id()?));
        self.inputs.push(idx);
        self.input_symbols.push(String::new());
        Ok(idx)
    }

    /// Creates a new latch with the next free id. Its next state is constant false
    /// until [`Aig::set_latch_src`] is called.
    pub fn new_latch(&mut self) -> Result<NodeIndex> {
        let idx = self.push_node(AigNode::Latch(self.next_id()?));
        self.latches.push(idx);
        self.latch_srcs.push(AigHandle::zero());
        self.latch_symbols.push(String::new());
        Ok(idx)
    }

    /// Creates a new and gate with the next free id, and returns its positive handle.
    /// Both fanins must be handles of this AIG.
    pub fn new_and(&mut self, fanin0: AigHandle, fanin1: AigHandle) -> Result<AigHandle> {
        self.check_handle(fanin0)?;
        self.check_handle(fanin1)?;
        let id = self.next_id()?;
        let idx = self.push_node(AigNode::and(id, fanin0, fanin1));
        self.ands.push(idx);
        Ok(AigHandle::from(idx))
    }

    /// Mark a signal as a new output, returns the position of the output.
    pub fn add_output(&mut self, src: AigHandle) -> Result<usize> {
        self.check_handle(src)?;
        self.outputs.push(src);
        self.output_symbols.push(String::new());
        Ok(self.outputs.len() - 1)
    }

    /// Sets the next state of a latch.
    pub fn set_latch_src(&mut self, pos: usize, src: AigHandle) -> Result<()> {
        self.check_handle(src)?;
        let count = self.latch_srcs.len();
        let slot = self
            .latch_srcs
            .get_mut(pos)
            .ok_or(AigError::IndexOutOfRange {
                what: "latch",
                pos,
                count,
            })?;
        *slot = src;
        Ok(())
    }

    /// Replaces the source of an output.
    pub fn set_output_src(&mut self, pos: usize, src: AigHandle) -> Result<()> {
        self.check_handle(src)?;
        let count = self.outputs.len();
        let slot = self
            .outputs
            .get_mut(pos)
            .ok_or(AigError::IndexOutOfRange {
                what: "output",
                pos,
                count,
            })?;
        *slot = src;
        Ok(())
    }

    /// Replaces both fanins of an and gate.
    ///
    /// Nothing prevents the rewiring from creating a cycle here: it is detected by
    /// [`Aig::check_integrity`] and [`Aig::renumber`].
    pub fn set_and_fanins(&mut self, pos: usize, fanin0: AigHandle, fanin1: AigHandle) -> Result<()> {
        self.check_handle(fanin0)?;
        self.check_handle(fanin1)?;
        let idx = at(&self.ands, pos, "and")?;
        if self.nodes[idx.0].set_fanins(fanin0, fanin1) {
            Ok(())
        } else {
            Err(AigError::InvalidState(format!(
                "and position {} does not refer to an and gate",
                pos
            )))
        }
    }

    /// Number of inputs (`I`).
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of latches (`L`).
    pub fn latch_count(&self) -> usize {
        self.latches.len()
    }

    /// Number of outputs (`O`).
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Number of and gates (`A`).
    pub fn and_count(&self) -> usize {
        self.ands.len()
    }

    /// Maximum variable index (`M`).
    pub fn max_var(&self) -> NodeId {
        self.max_var
    }

    /// Retrieves a node from its slot.
    pub fn get_node(&self, idx: NodeIndex) -> Option<&AigNode> {
        self.nodes.get(idx.0)
    }

    /// Retrieves the slot of the node with the given id.
    pub fn get_node_by_id(&self, id: NodeId) -> Option<NodeIndex> {
        self.ids.get(&id).copied()
    }

    /// Retrieves inputs, in declaration order.
    pub fn get_inputs(&self) -> &[NodeIndex] {
        &self.inputs
    }

    /// Retrieves latches, in declaration order.
    pub fn get_latches(&self) -> &[NodeIndex] {
        &self.latches
    }

    /// Retrieves and gates, in declaration order.
    pub fn get_ands(&self) -> &[NodeIndex] {
        &self.ands
    }

    /// Retrieves outputs.
    pub fn get_outputs(&self) -> &[AigHandle] {
        &self.outputs
    }

    /// Positive handle of the input at `pos`.
    pub fn input(&self, pos: usize) -> Result<AigHandle> {
        at(&self.inputs, pos, "input").map(AigHandle::from)
    }

    /// Positive handle of the latch at `pos`.
    pub fn latch(&self, pos: usize) -> Result<AigHandle> {
        at(&self.latches, pos, "latch").map(AigHandle::from)
    }

    /// Next state of the latch at `pos`.
    pub fn latch_src(&self, pos: usize) -> Result<AigHandle> {
        at(&self.latch_srcs, pos, "latch")
    }

    /// Source of the output at `pos`.
    pub fn output_src(&self, pos: usize) -> Result<AigHandle> {
        at(&self.outputs, pos, "output")
    }

    /// Positive handle of the and gate at `pos`.
    pub fn and_node(&self, pos: usize) -> Result<AigHandle> {
        at(&self.ands, pos, "and").map(AigHandle::from)
    }

    /// Both fanins of the and gate at `pos`.
    pub fn and_fanins(&self, pos: usize) -> Result<(AigHandle, AigHandle)> {
        let idx = at(&self.ands, pos, "and")?;
        self.nodes[idx.0].get_fanins().ok_or(AigError::InvalidState(format!(
            "and position {} does not refer to an and gate",
            pos
        )))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_nodes_test() {
        let mut aig = Aig::new();
        let i1 = aig.new_input().unwrap();
        let i2 = aig.new_input().unwrap();
        let l3 = aig.new_latch().unwrap();
        let a4 = aig
            .new_and(AigHandle::from(i1), !AigHandle::from(l3))
            .unwrap();

        assert_eq!(aig.input_count(), 2);
        assert_eq!(aig.latch_count(), 1);
        assert_eq!(aig.and_count(), 1);
        assert_eq!(aig.output_count(), 0);
        assert_eq!(aig.max_var(), 4);

        assert_eq!(aig.get_node(i1), Some(&AigNode::Input(1)));
        assert_eq!(aig.get_node(i2), Some(&AigNode::Input(2)));
        assert_eq!(aig.get_node(l3), Some(&AigNode::Latch(3)));
        assert_eq!(aig.get_node_by_id(4), a4.get_node());
        assert_eq!(
            aig.and_fanins(0).unwrap(),
            (AigHandle::from(i1), !AigHandle::from(l3))
        );
        assert_eq!(aig.latch_src(0).unwrap(), AigHandle::zero());

        aig.set_latch_src(0, !a4).unwrap();
        assert_eq!(aig.latch_src(0).unwrap(), !a4);
        assert_eq!(aig.add_output(a4).unwrap(), 0);
        aig.set_output_src(0, AigHandle::one()).unwrap();
        assert_eq!(aig.output_src(0).unwrap(), AigHandle::one());

        aig.set_and_fanins(0, AigHandle::from(i2), AigHandle::from(i1))
            .unwrap();
        assert_eq!(
            aig.and_fanins(0).unwrap(),
            (AigHandle::from(i2), AigHandle::from(i1))
        );
    }

    #[test]
    fn index_error_test() {
        let mut aig = Aig::new();
        let i = AigHandle::from(aig.new_input().unwrap());

        assert!(aig.input(0).is_ok());
        for err in [
            aig.input(1).unwrap_err(),
            aig.latch(0).unwrap_err(),
            aig.latch_src(0).unwrap_err(),
            aig.output_src(0).unwrap_err(),
            aig.and_node(0).unwrap_err(),
            aig.and_fanins(3).unwrap_err(),
            aig.set_latch_src(0, i).unwrap_err(),
            aig.set_output_src(0, i).unwrap_err(),
            aig.set_and_fanins(0, i, i).unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::Index);
        }

        assert!(matches!(
            aig.input(4),
            Err(AigError::IndexOutOfRange {
                what: "input",
                pos: 4,
                count: 1
            })
        ));
    }

    #[test]
    fn foreign_handle_test() {
        let mut a = Aig::new();
        let mut b = Aig::new();
        b.new_input().unwrap();
        let foreign = AigHandle::from(b.new_input().unwrap());
        a.new_input().unwrap();

        assert!(matches!(
            a.new_and(foreign, AigHandle::zero()),
            Err(AigError::InvalidHandle(1))
        ));
        assert!(a.add_output(foreign).is_err());
        assert_eq!(a.and_count(), 0);
        assert_eq!(a.output_count(), 0);
    }

    #[test]
    fn ids_after_load_test() {
        let mut builder = AigBuilder::new();
        builder.add_input(5).unwrap();
        assert!(matches!(builder.add_latch(5), Err(AigError::DuplicateId(5))));
        let mut aig = builder.finish().unwrap();
        assert_eq!(aig.max_var(), 5);

        // Sequential ids continue after the highest one.
        let i = aig.new_input().unwrap();
        assert_eq!(aig.get_node(i).unwrap().get_id(), 6);
        assert_eq!(aig.input_count(), 2);
        assert_eq!(aig.input_symbol(1).unwrap(), "");
    }

    #[test]
    fn id_limit_test() {
        let text = format!("aag {} 1 0 1 0\n2\n2\n", MAX_NODE_ID);
        let mut aig = Aig::from_ascii(text.as_bytes()).unwrap();
        let x = aig.input(0).unwrap();
        assert!(matches!(aig.new_input(), Err(AigError::IdTooLarge(_))));
        assert!(matches!(aig.new_latch(), Err(AigError::IdTooLarge(_))));
        assert!(matches!(aig.new_and(x, x), Err(AigError::IdTooLarge(_))));
        assert_eq!(aig.input_count(), 1);
        assert_eq!(aig.and_count(), 0);

        let text = format!("aag {} 1 0 1 0\n2\n2\n", NodeId::MAX);
        let err = Aig::from_ascii(text.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn clone_is_deep_test() {
        let mut a = Aig::new();
        let x = AigHandle::from(a.new_input().unwrap());
        let g = a.new_and(x, x).unwrap();
        a.add_output(g).unwrap();

        let mut b = a.clone();
        assert_eq!(a, b);
        b.set_output_src(0, !g).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.output_src(0).unwrap(), g);
    }
}
