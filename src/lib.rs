pub mod aig;
pub mod model;

// Re-exporting symbols and modules.
pub use aig::varint;
pub use aig::{
    Aig, AigBuilder, AigError, AigHandle, AigNode, ErrorKind, Literal, MAX_NODE_ID, NodeId,
    NodeIndex, ParserError, Result,
};
pub use model::AigModel;
