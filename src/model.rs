//! A read-only view of a loaded AIG, talking in literals instead of handles.
//!
//! ```rust
//! use aigerio::AigModel;
//! let model = AigModel::read_aag("aag 3 2 0 1 1\n2\n4\n6\n6 2 4\n".as_bytes()).unwrap();
//! assert_eq!(model.and_count(), 1);
//! assert_eq!(model.and_src1(0).unwrap(), 2);
//! assert_eq!(model.and_src2(0).unwrap(), 4);
//! assert_eq!(model.output_src(0).unwrap(), 6);
//! ```

use std::{
    fmt,
    io::{BufRead, Write},
    path::Path,
};

use crate::{Aig, Literal, NodeId, Result};

/// A completed AIG, exposed by position and literal.
///
/// The model owns its AIG: cloning a model copies the whole graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AigModel {
    aig: Aig,
}

impl From<Aig> for AigModel {
    fn from(aig: Aig) -> Self {
        AigModel { aig }
    }
}

impl AigModel {
    /// Loads a model from a stream in the ASCII AIGER format.
    pub fn read_aag(reader: impl BufRead) -> Result<Self> {
        Aig::from_ascii(reader).map(AigModel::from)
    }

    /// Loads a model from a stream in the binary AIGER format.
    pub fn read_aig(reader: impl BufRead) -> Result<Self> {
        Aig::from_bin(reader).map(AigModel::from)
    }

    /// Loads a model from a file in either format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Aig::from_file(path).map(AigModel::from)
    }

    /// The underlying AIG.
    pub fn aig(&self) -> &Aig {
        &self.aig
    }

    pub fn max_var(&self) -> NodeId {
        self.aig.max_var()
    }

    pub fn input_count(&self) -> usize {
        self.aig.input_count()
    }

    pub fn latch_count(&self) -> usize {
        self.aig.latch_count()
    }

    pub fn output_count(&self) -> usize {
        self.aig.output_count()
    }

    pub fn and_count(&self) -> usize {
        self.aig.and_count()
    }

    /// Literal of the input at `pos`.
    pub fn input(&self, pos: usize) -> Result<Literal> {
        Ok(self.aig.literal(self.aig.input(pos)?))
    }

    /// Literal of the latch at `pos`.
    pub fn latch(&self, pos: usize) -> Result<Literal> {
        Ok(self.aig.literal(self.aig.latch(pos)?))
    }

    /// Next-state literal of the latch at `pos`.
    pub fn latch_src(&self, pos: usize) -> Result<Literal> {
        Ok(self.aig.literal(self.aig.latch_src(pos)?))
    }

    /// Literal driving the output at `pos`.
    pub fn output_src(&self, pos: usize) -> Result<Literal> {
        Ok(self.aig.literal(self.aig.output_src(pos)?))
    }

    /// Literal of the and gate at `pos`.
    pub fn and_node(&self, pos: usize) -> Result<Literal> {
        Ok(self.aig.literal(self.aig.and_node(pos)?))
    }

    /// First fanin literal of the and gate at `pos`.
    pub fn and_src1(&self, pos: usize) -> Result<Literal> {
        let (fanin0, _) = self.aig.and_fanins(pos)?;
        Ok(self.aig.literal(fanin0))
    }

    /// Second fanin literal of the and gate at `pos`.
    pub fn and_src2(&self, pos: usize) -> Result<Literal> {
        let (_, fanin1) = self.aig.and_fanins(pos)?;
        Ok(self.aig.literal(fanin1))
    }

    pub fn input_symbol(&self, pos: usize) -> Result<&str> {
        self.aig.input_symbol(pos)
    }

    pub fn latch_symbol(&self, pos: usize) -> Result<&str> {
        self.aig.latch_symbol(pos)
    }

    pub fn output_symbol(&self, pos: usize) -> Result<&str> {
        self.aig.output_symbol(pos)
    }

    pub fn comment(&self) -> &str {
        self.aig.get_comment()
    }

    /// Writes the model in the ASCII AIGER format.
    pub fn write_aag(&self, writer: &mut impl Write) -> Result<()> {
        self.aig.write_ascii(writer)
    }

    /// Writes the model in the binary AIGER format, renumbering a copy first.
    pub fn write_aig(&self, writer: &mut impl Write) -> Result<()> {
        self.aig.write_bin(writer)
    }
}

fn named(f: &mut fmt::Formatter<'_>, symbol: Result<&str>) -> fmt::Result {
    match symbol.map_err(|_| fmt::Error)? {
        "" => writeln!(f),
        name => writeln!(f, " ({})", name),
    }
}

/// Debug dump, one line per section entry.
impl fmt::Display for AigModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "AIG (M={}, I={}, L={}, O={}, A={}):",
            self.max_var(),
            self.input_count(),
            self.latch_count(),
            self.output_count(),
            self.and_count()
        )?;
        for pos in 0..self.input_count() {
            let lit = self.input(pos).map_err(|_| fmt::Error)?;
            write!(f, "  input {}: {}", pos, lit)?;
            named(f, self.input_symbol(pos))?;
        }
        for pos in 0..self.latch_count() {
            let lit = self.latch(pos).map_err(|_| fmt::Error)?;
            let src = self.latch_src(pos).map_err(|_| fmt::Error)?;
            write!(f, "  latch {}: {} <- {}", pos, lit, src)?;
            named(f, self.latch_symbol(pos))?;
        }
        for pos in 0..self.output_count() {
            let src = self.output_src(pos).map_err(|_| fmt::Error)?;
            write!(f, "  output {}: {}", pos, src)?;
            named(f, self.output_symbol(pos))?;
        }
        for pos in 0..self.and_count() {
            let lit = self.and_node(pos).map_err(|_| fmt::Error)?;
            let src1 = self.and_src1(pos).map_err(|_| fmt::Error)?;
            let src2 = self.and_src2(pos).map_err(|_| fmt::Error)?;
            writeln!(f, "  and {}: {} = {} & {}", pos, lit, src1, src2)?;
        }
        for line in self.comment().lines() {
            writeln!(f, "  # {}", line)?;
        }
        Ok(())
    }
}
