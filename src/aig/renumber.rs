use std::collections::{HashMap, VecDeque};

use log::debug;

use super::{Aig, AigError, AigHandle, NodeId, NodeIndex, Result};

impl Aig {
    /// Orders the and gates so that each one comes after both of its fanins.
    ///
    /// Layered traversal: inputs are released first, then latches, both in declaration order.
    /// An and gate becomes ready once both of its fanins are released and ready gates are
    /// handled first in, first out. Gates fed by constants only are ready from the start.
    ///
    /// Returns the positions (in [`Aig::get_ands`]) of the and gates, in the new order.
    pub(super) fn topological_and_order(&self) -> Result<Vec<usize>> {
        // For each node slot, the positions of the and gates using it as a fanin
        let mut fanouts: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        // For each and gate, the number of fanins which are not released yet
        let mut waiting: Vec<u8> = vec![0; self.ands.len()];

        for (pos, &idx) in self.ands.iter().enumerate() {
            let (fanin0, fanin1) = self.nodes[idx.0].get_fanins().ok_or_else(|| {
                AigError::InvalidState(format!("and position {} is not an and gate", pos))
            })?;
            for fanin in [fanin0, fanin1] {
                if let Some(node) = fanin.get_node() {
                    fanouts[node.0].push(pos);
                    waiting[pos] += 1;
                }
            }
        }

        let mut ready: VecDeque<usize> = (0..self.ands.len())
            .filter(|&pos| waiting[pos] == 0)
            .collect();

        let release = |idx: NodeIndex, waiting: &mut Vec<u8>, ready: &mut VecDeque<usize>| {
            for &pos in &fanouts[idx.0] {
                waiting[pos] -= 1;
                if waiting[pos] == 0 {
                    ready.push_back(pos);
                }
            }
        };

        for &idx in self.inputs.iter().chain(&self.latches) {
            release(idx, &mut waiting, &mut ready);
        }

        let mut order = Vec::with_capacity(self.ands.len());
        while let Some(pos) = ready.pop_front() {
            order.push(pos);
            release(self.ands[pos], &mut waiting, &mut ready);
        }

        if order.len() < self.ands.len() {
            return Err(AigError::CyclicGraph {
                assigned: self.inputs.len() + self.latches.len() + order.len(),
                total: self.nodes.len(),
            });
        }

        Ok(order)
    }

    /// Renumbers the nodes the way the binary AIGER format requires:
    /// - inputs get ids `1..=I`, in declaration order
    /// - then latches get ids `I+1..=I+L`, in declaration order
    /// - then and gates get the following ids, each one higher than both of its fanins,
    ///   and are listed in id order
    /// - the fanins of each and gate are swapped if needed so that the first one has the
    ///   higher literal (higher id, constants last).
    ///
    /// `M` becomes `I + L + A`. Fails with [`AigError::CyclicGraph`] if the and gates
    /// form a cycle, in which case the AIG is left untouched.
    pub fn renumber(&mut self) -> Result<()> {
        let order = self.topological_and_order()?;

        let ands: Vec<NodeIndex> = order.iter().map(|&pos| self.ands[pos]).collect();

        let mut id: NodeId = 0;
        for &idx in self.inputs.iter().chain(&self.latches).chain(&ands) {
            id += 1;
            self.nodes[idx.0].set_id(id);
        }

        self.ands = ands;
        self.max_var = id;
        self.ids = self
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.get_id(), NodeIndex(slot)))
            .collect::<HashMap<NodeId, NodeIndex>>();

        // Fanin literals only change through the ids, which are final now
        let literals: Vec<u64> = self.nodes.iter().map(|node| node.get_literal()).collect();
        let key = |h: &AigHandle| match h.get_node() {
            None => h.get_complement() as u64,
            Some(node) => literals[node.0] + h.get_complement() as u64,
        };
        for &idx in &self.ands {
            self.nodes[idx.0].reorder_fanins(key);
        }

        debug!(
            "renumbered {} inputs, {} latches and {} and gates",
            self.inputs.len(),
            self.latches.len(),
            self.ands.len()
        );
        Ok(())
    }
}
