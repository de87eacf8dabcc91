//! An [`AigHandle`] points at an [`AigNode`] (or at no node for the constants) and can be
//! complemented (indicates the presence of a NOT gate).
//!
//! [`AigNode`]: crate::AigNode

use std::ops::Not;

use super::NodeIndex;

/// A reference to a signal of the AIG.
///
/// The handle is the in-memory counterpart of an AIGER literal: it refers to a node slot
/// of the owning [`Aig`] and carries an inverter according to the value of `complement`.
/// The constants have no node: [`AigHandle::zero`] is the literal `0` and
/// [`AigHandle::one`] is the literal `1`.
///
/// ```rust
/// use aigerio::{Aig, AigHandle};
/// let mut aig = Aig::new();
/// let a = AigHandle::from(aig.new_input().unwrap());
/// assert_eq!(a, !!a);
/// assert_ne!(a, !a);
/// assert_eq!(!AigHandle::zero(), AigHandle::one());
/// ```
///
/// [`Aig`]: crate::Aig
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AigHandle {
    /// The node the handle is refering to, `None` for the constants.
    node: Option<NodeIndex>,
    /// Set to true if signal should be inverted.
    complement: bool,
}

impl Not for AigHandle {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.complement = !self.complement;
        self
    }
}

impl From<NodeIndex> for AigHandle {
    /// The positive handle of a node.
    fn from(node: NodeIndex) -> Self {
        AigHandle::new(node, false)
    }
}

impl AigHandle {
    pub const fn new(node: NodeIndex, complement: bool) -> Self {
        AigHandle {
            node: Some(node),
            complement,
        }
    }

    /// The constant false signal (literal 0).
    pub const fn zero() -> Self {
        AigHandle {
            node: None,
            complement: false,
        }
    }

    /// The constant true signal (literal 1).
    pub const fn one() -> Self {
        AigHandle {
            node: None,
            complement: true,
        }
    }

    pub fn get_node(&self) -> Option<NodeIndex> {
        self.node
    }

    pub fn get_complement(&self) -> bool {
        self.complement
    }

    pub fn is_const(&self) -> bool {
        self.node.is_none()
    }

    pub fn is_zero(&self) -> bool {
        self.is_const() && !self.complement
    }

    pub fn is_one(&self) -> bool {
        self.is_const() && self.complement
    }

    pub fn is_complement_of(&self, other: &AigHandle) -> bool {
        self.node == other.node && self.complement ^ other.complement
    }
}
