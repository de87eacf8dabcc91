use thiserror::Error;

use super::NodeId;

/// The result of an AIG operation.
pub type Result<T> = std::result::Result<T, AigError>;

/// Coarse classification of an [`AigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The content (a file or a construction sequence) does not describe a valid AIG.
    Format,
    /// A positional accessor was called out of range, or a handle does not belong to the AIG.
    Index,
    /// The underlying stream failed.
    Io,
}

/// Error returned when an AIG operation failed.
#[derive(Debug, Error)]
pub enum AigError {
    /// A different node with the given id already exists.
    #[error("a different node with id={0} already exists")]
    DuplicateId(NodeId),

    /// The id 0 is reserved for the constant literals 0 and 1.
    #[error("id=0 is reserved for the constants")]
    IdZeroReserved,

    /// The id is too large for its literals to fit in a `u64`.
    #[error("id={0} is too large, literals would not fit in 64 bits")]
    IdTooLarge(NodeId),

    /// The node with given id does not exist (yet).
    #[error("node with id={0} does not exist")]
    NodeDoesNotExist(NodeId),

    /// An and gate was declared but its fanins were never set.
    #[error("and gate with id={0} was declared but never wired")]
    UnwiredAnd(NodeId),

    /// Not every node could be ordered topologically.
    #[error("cyclic or disconnected graph: only {assigned} of {total} nodes could be ordered")]
    CyclicGraph { assigned: usize, total: usize },

    /// Positional access out of range.
    #[error("{what} position {pos} is out of range (count is {count})")]
    IndexOutOfRange {
        what: &'static str,
        pos: usize,
        count: usize,
    },

    /// The handle points at a node slot which does not exist in this AIG.
    #[error("handle refers to node slot {0} which is not part of this AIG")]
    InvalidHandle(usize),

    /// The AIG has reached a state which the requested operation cannot handle.
    #[error("the AIG is in an invalid state: {0}")]
    InvalidState(String),

    /// Just forwarding a [`ParserError`].
    #[error("{0}")]
    ParserError(#[from] ParserError),

    /// Reading from or writing to the stream failed.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AigError {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AigError::IndexOutOfRange { .. } | AigError::InvalidHandle(_) => ErrorKind::Index,
            AigError::IoError(_) => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }
}

/// Error returned when the content of a stream is not valid AIGER.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The header does not start with the expected signature.
    #[error("bad signature: expected {expected}, got {got:?}")]
    BadSignature { expected: &'static str, got: String },

    /// Invalid token, something else was expected.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The stream ended before the section was complete.
    #[error("unexpected end of file while reading {0}")]
    UnexpectedEof(&'static str),

    /// Valid AIGER, but not something this crate handles.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// The header counts are not consistent.
    #[error("header mismatch: {0}")]
    HeaderMismatch(String),
}
