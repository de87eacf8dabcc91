//! Two-phase construction of an [`Aig`] with explicit node ids.
//!
//! AIGER files may reference an and gate before its own line is read, so and gates are first
//! declared with [`AigBuilder::add_and`] and wired later with [`AigBuilder::wire_and`].
//! A declared but unwired gate only exists inside the builder: [`AigBuilder::finish`] refuses
//! to produce an [`Aig`] while one is left.

use std::collections::HashMap;

use log::trace;

use super::{
    Aig, AigError, AigHandle, AigNode, Literal, MAX_NODE_ID, NodeId, NodeIndex, Result, literal,
};

#[derive(Debug, Clone)]
enum Slot {
    Input(NodeId),
    Latch(NodeId),
    PendingAnd(NodeId),
    And(AigNode),
}

impl Slot {
    fn get_id(&self) -> NodeId {
        match self {
            Slot::Input(id) | Slot::Latch(id) | Slot::PendingAnd(id) => *id,
            Slot::And(node) => node.get_id(),
        }
    }
}

/// Scratch graph populated by the readers.
///
/// ```rust
/// use aigerio::AigBuilder;
/// let mut builder = AigBuilder::new();
/// builder.add_input(1).unwrap();
/// builder.add_and(3).unwrap(); // the fanin 4 is declared below
/// builder.add_input(2).unwrap();
/// let (a, b) = (builder.handle(2).unwrap(), builder.handle(4).unwrap());
/// builder.wire_and(0, a, b).unwrap();
/// let g = builder.handle(6).unwrap();
/// builder.add_output(g).unwrap();
/// let aig = builder.finish().unwrap();
/// assert_eq!(aig.and_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AigBuilder {
    slots: Vec<Slot>,
    ids: HashMap<NodeId, NodeIndex>,
    max_var: NodeId,
    inputs: Vec<NodeIndex>,
    latches: Vec<NodeIndex>,
    latch_srcs: Vec<AigHandle>,
    outputs: Vec<AigHandle>,
    ands: Vec<NodeIndex>,
}

impl AigBuilder {
    pub fn new() -> Self {
        AigBuilder::default()
    }

    /// Raises the maximum variable index of the resulting AIG (the `M` of the header).
    /// Fails if it is above [`MAX_NODE_ID`].
    pub fn set_max_var(&mut self, max_var: NodeId) -> Result<()> {
        if max_var > MAX_NODE_ID {
            return Err(AigError::IdTooLarge(max_var));
        }
        self.max_var = self.max_var.max(max_var);
        Ok(())
    }

    fn register(&mut self, slot: Slot) -> Result<NodeIndex> {
        let id = slot.get_id();
        if id == 0 {
            return Err(AigError::IdZeroReserved);
        }
        if id > MAX_NODE_ID {
            return Err(AigError::IdTooLarge(id));
        }
        if self.ids.contains_key(&id) {
            return Err(AigError::DuplicateId(id));
        }
        let idx = NodeIndex(self.slots.len());
        self.ids.insert(id, idx);
        self.max_var = self.max_var.max(id);
        self.slots.push(slot);
        Ok(idx)
    }

    fn check_handle(&self, handle: AigHandle) -> Result<()> {
        match handle.get_node() {
            Some(node) if node.0 >= self.slots.len() => Err(AigError::InvalidHandle(node.0)),
            _ => Ok(()),
        }
    }

    pub fn add_input(&mut self, id: NodeId) -> Result<NodeIndex> {
        let idx = self.register(Slot::Input(id))?;
        self.inputs.push(idx);
        Ok(idx)
    }

    /// Declares a latch, its next state is constant false until set.
    pub fn add_latch(&mut self, id: NodeId) -> Result<NodeIndex> {
        let idx = self.register(Slot::Latch(id))?;
        self.latches.push(idx);
        self.latch_srcs.push(AigHandle::zero());
        Ok(idx)
    }

    /// Declares an and gate without fanins.
    pub fn add_and(&mut self, id: NodeId) -> Result<NodeIndex> {
        let idx = self.register(Slot::PendingAnd(id))?;
        self.ands.push(idx);
        Ok(idx)
    }

    /// Decodes a literal against the nodes declared so far.
    pub fn handle(&self, lit: Literal) -> Result<AigHandle> {
        literal::to_handle(|id| self.ids.get(&id).copied(), lit)
    }

    /// Sets the fanins of the and gate declared at position `pos`.
    pub fn wire_and(&mut self, pos: usize, fanin0: AigHandle, fanin1: AigHandle) -> Result<()> {
        self.check_handle(fanin0)?;
        self.check_handle(fanin1)?;
        let idx = super::at(&self.ands, pos, "and")?;
        let id = self.slots[idx.0].get_id();
        trace!("wiring and gate id={} at position {}", id, pos);
        self.slots[idx.0] = Slot::And(AigNode::and(id, fanin0, fanin1));
        Ok(())
    }

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

    pub fn add_output(&mut self, src: AigHandle) -> Result<usize> {
        self.check_handle(src)?;
        self.outputs.push(src);
        Ok(self.outputs.len() - 1)
    }

    /// Turns the scratch graph into an [`Aig`], failing if an and gate is still unwired.
    pub fn finish(self) -> Result<Aig> {
        let nodes = self
            .slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Input(id) => Ok(AigNode::Input(id)),
                Slot::Latch(id) => Ok(AigNode::Latch(id)),
                Slot::PendingAnd(id) => Err(AigError::UnwiredAnd(id)),
                Slot::And(node) => Ok(node),
            })
            .collect::<Result<Vec<AigNode>>>()?;

        Ok(Aig {
            nodes,
            ids: self.ids,
            max_var: self.max_var,
            input_symbols: vec![String::new(); self.inputs.len()],
            latch_symbols: vec![String::new(); self.latches.len()],
            output_symbols: vec![String::new(); self.outputs.len()],
            inputs: self.inputs,
            latches: self.latches,
            latch_srcs: self.latch_srcs,
            outputs: self.outputs,
            ands: self.ands,
            comment: String::new(),
        })
    }
}
