//! Conversions between AIGER literals and [`AigHandle`]s.
//!
//! A literal is `2 * id + complement`. Literals 0 and 1 are the constants false and true
//! and do not refer to any node.

use super::{Aig, AigError, AigHandle, NodeId, NodeIndex, Result};

/// An AIGER literal.
pub type Literal = u64;

/// Decodes a literal, looking up its node with `lookup`.
///
/// Fails with [`AigError::NodeDoesNotExist`] if the id of the literal is not registered.
pub fn to_handle<F>(lookup: F, lit: Literal) -> Result<AigHandle>
where
    F: Fn(NodeId) -> Option<NodeIndex>,
{
    match lit {
        0 => Ok(AigHandle::zero()),
        1 => Ok(AigHandle::one()),
        _ => {
            let id = lit >> 1;
            let node = lookup(id).ok_or(AigError::NodeDoesNotExist(id))?;
            Ok(AigHandle::new(node, lit & 1 != 0))
        }
    }
}

impl Aig {
    /// Encodes a handle of this AIG as a literal.
    ///
    /// # Panics
    ///
    /// Panics if the handle points at a node slot this AIG does not have,
    /// e.g. a handle taken from another AIG.
    pub fn literal(&self, handle: AigHandle) -> Literal {
        let complement = handle.get_complement() as Literal;
        match handle.get_node() {
            None => complement,
            Some(node) => self.nodes[node.0].get_literal() + complement,
        }
    }

    /// Decodes a literal against the nodes of this AIG.
    pub fn handle(&self, lit: Literal) -> Result<AigHandle> {
        to_handle(|id| self.get_node_by_id(id), lit)
    }
}
