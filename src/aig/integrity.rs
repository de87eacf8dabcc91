use super::{Aig, AigError, AigHandle, AigNode, NodeIndex, Result};

impl Aig {
    fn check_handle_integrity(&self, handle: AigHandle, context: &str) -> Result<()> {
        match handle.get_node() {
            Some(node) if node.0 >= self.nodes.len() => Err(AigError::InvalidState(format!(
                "{} points at node slot {} which is not in the AIG",
                context, node.0
            ))),
            _ => Ok(()),
        }
    }

    fn check_section_kind(
        &self,
        list: &[NodeIndex],
        what: &str,
        is_kind: fn(&AigNode) -> bool,
    ) -> Result<()> {
        for (pos, idx) in list.iter().enumerate() {
            match self.nodes.get(idx.0) {
                Some(node) if is_kind(node) => {}
                _ => {
                    return Err(AigError::InvalidState(format!(
                        "{} position {} refers to a node of another kind",
                        what, pos
                    )));
                }
            }
        }
        Ok(())
    }

    /// Checks that the AIG structure is correct:
    /// - every node has a non-zero id, at most `M`, and the id table is in sync with the nodes
    /// - the input, latch and and gate lists refer to nodes of the right kind, and cover every node
    /// - every handle (fanin, latch next state, output) refers to a node of the AIG
    /// - the and gates do not form a cycle.
    ///
    /// The ids do not have to be in AIGER order, see [`Aig::check_aiger_order`] for that.
    pub fn check_integrity(&self) -> Result<()> {
        // Checking that all nodes have a relevant id
        if self.ids.len() != self.nodes.len() {
            return Err(AigError::InvalidState(format!(
                "{} ids registered for {} nodes",
                self.ids.len(),
                self.nodes.len()
            )));
        }
        for (slot, node) in self.nodes.iter().enumerate() {
            let id = node.get_id();
            if id == 0 {
                return Err(AigError::IdZeroReserved);
            }
            if id > self.max_var {
                return Err(AigError::InvalidState(format!(
                    "id={} is above the maximum variable index {}",
                    id, self.max_var
                )));
            }
            if self.ids.get(&id) != Some(&NodeIndex(slot)) {
                return Err(AigError::InvalidState(format!(
                    "incoherent node id {} for slot {}",
                    id, slot
                )));
            }
            if let Some((fanin0, fanin1)) = node.get_fanins() {
                self.check_handle_integrity(fanin0, "fanin")?;
                self.check_handle_integrity(fanin1, "fanin")?;
            }
        }

        self.check_section_kind(&self.inputs, "input", AigNode::is_input)?;
        self.check_section_kind(&self.latches, "latch", AigNode::is_latch)?;
        self.check_section_kind(&self.ands, "and", AigNode::is_and)?;
        let listed = self.inputs.len() + self.latches.len() + self.ands.len();
        if listed != self.nodes.len() {
            return Err(AigError::InvalidState(format!(
                "{} nodes are listed as inputs, latches or and gates, out of {}",
                listed,
                self.nodes.len()
            )));
        }

        // Checking that latch sources and outputs are registered as nodes
        if self.latch_srcs.len() != self.latches.len() {
            return Err(AigError::InvalidState(
                "latches and latch sources differ in number".to_string(),
            ));
        }
        for &src in &self.latch_srcs {
            self.check_handle_integrity(src, "latch source")?;
        }
        for &src in &self.outputs {
            self.check_handle_integrity(src, "output")?;
        }

        // Checks for acyclicity
        self.topological_and_order()?;

        Ok(())
    }

    /// Tests if the ids of the AIG are in AIGER order:
    /// - inputs with ids $1, ..., i$
    /// - then latches with ids $i + 1, ..., i + l$
    /// - then and gates with ids $i + l + 1, ..., i + l + a$, in positional order, such as
    ///   for all gate z = and(a, b), $lit(z) \gt lit(a) \geq lit(b)$
    /// - and $M = i + l + a$.
    ///
    /// This is what the binary AIGER format requires.
    /// You can use [`Aig::renumber`] to mutate the current AIG into an AIGER-compliant AIG.
    pub fn check_aiger_order(&self) -> Result<()> {
        let mut expected = 0;
        for (what, list) in [
            ("input", &self.inputs),
            ("latch", &self.latches),
            ("and", &self.ands),
        ] {
            for &idx in list {
                expected += 1;
                let id = self.nodes[idx.0].get_id();
                if id != expected {
                    return Err(AigError::InvalidState(format!(
                        "{} with id={} but id {} was expected",
                        what, id, expected
                    )));
                }
            }
        }

        if self.max_var != expected {
            return Err(AigError::InvalidState(format!(
                "maximum variable index {} but {} nodes overall",
                self.max_var, expected
            )));
        }

        for &idx in &self.ands {
            let node = &self.nodes[idx.0];
            let (fanin0, fanin1) = node.get_fanins().ok_or_else(|| {
                AigError::InvalidState(format!("id={} is not an and gate", node.get_id()))
            })?;
            let lhs = node.get_literal();
            let (rhs0, rhs1) = (self.literal(fanin0), self.literal(fanin1));

            if lhs <= rhs0 {
                return Err(AigError::InvalidState(format!(
                    "literal of parent {} should be strictly larger than its fanin0 {}",
                    lhs, rhs0
                )));
            }
            if rhs0 < rhs1 {
                return Err(AigError::InvalidState(format!(
                    "(parent {}) literal of fanin0 {} should be superior or equal to fanin1 {}",
                    lhs, rhs0, rhs1
                )));
            }
        }

        Ok(())
    }
}
