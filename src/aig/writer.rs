use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;

use super::{Aig, Result, varint};

impl Aig {
    /// Writes the AIG in the ASCII AIGER format (`aag`).
    ///
    /// Ids are written as they are, so are `M` and the order of the and gates.
    /// Reading the output back with [`Aig::from_ascii`] gives the same AIG.
    pub fn write_ascii(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(
            writer,
            "aag {} {} {} {} {}",
            self.max_var,
            self.input_count(),
            self.latch_count(),
            self.output_count(),
            self.and_count()
        )?;

        for &idx in &self.inputs {
            writeln!(writer, "{}", self.nodes[idx.0].get_literal())?;
        }
        for (&idx, &src) in self.latches.iter().zip(&self.latch_srcs) {
            writeln!(
                writer,
                "{} {}",
                self.nodes[idx.0].get_literal(),
                self.literal(src)
            )?;
        }
        for &src in &self.outputs {
            writeln!(writer, "{}", self.literal(src))?;
        }
        for &idx in &self.ands {
            let node = &self.nodes[idx.0];
            if let Some((fanin0, fanin1)) = node.get_fanins() {
                writeln!(
                    writer,
                    "{} {} {}",
                    node.get_literal(),
                    self.literal(fanin0),
                    self.literal(fanin1)
                )?;
            }
        }

        self.write_symbols(writer)?;
        debug!("wrote aag with {} and gates", self.and_count());
        Ok(())
    }

    /// Writes the AIG in the binary AIGER format (`aig`).
    ///
    /// The binary format requires ids in AIGER order, so a renumbered copy is written
    /// (see [`Aig::renumber`]): the AIG itself is not modified. Fails with
    /// [`AigError::CyclicGraph`](super::AigError::CyclicGraph) if the and gates form a cycle.
    pub fn write_bin(&self, writer: &mut impl Write) -> Result<()> {
        let mut aig = self.clone();
        aig.renumber()?;
        aig.check_aiger_order()?;

        writeln!(
            writer,
            "aig {} {} {} {} {}",
            aig.max_var,
            aig.input_count(),
            aig.latch_count(),
            aig.output_count(),
            aig.and_count()
        )?;

        for &src in &aig.latch_srcs {
            writeln!(writer, "{}", aig.literal(src))?;
        }
        for &src in &aig.outputs {
            writeln!(writer, "{}", aig.literal(src))?;
        }
        for &idx in &aig.ands {
            let node = &aig.nodes[idx.0];
            if let Some((fanin0, fanin1)) = node.get_fanins() {
                let lhs = node.get_literal();
                let (rhs0, rhs1) = (aig.literal(fanin0), aig.literal(fanin1));
                // Ordering was checked above, none of these underflow
                varint::encode(lhs - rhs0, writer)?;
                varint::encode(rhs0 - rhs1, writer)?;
            }
        }

        aig.write_symbols(writer)?;
        debug!("wrote aig with {} and gates", aig.and_count());
        Ok(())
    }

    /// Writes the AIG to a file in the ASCII AIGER format.
    pub fn write_ascii_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write_ascii(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the AIG to a file in the binary AIGER format.
    pub fn write_bin_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write_bin(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use crate::{Aig, AigError, AigHandle};

    fn to_ascii(aig: &Aig) -> String {
        let mut out = Vec::new();
        aig.write_ascii(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn to_bin(aig: &Aig) -> Vec<u8> {
        let mut out = Vec::new();
        aig.write_bin(&mut out).unwrap();
        out
    }

    const HALF_ADDER: &str = "aag 7 2 0 2 3\n2\n4\n6\n12\n6 13 15\n12 2 4\n14 3 5\n\
                              i0 x\ni1 y\no0 s\no1 c\nc\nhalf adder\n";

    #[test]
    fn write_ascii_test() {
        let aig = Aig::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        assert_eq!(to_ascii(&aig), HALF_ADDER);

        let empty = Aig::new();
        assert_eq!(to_ascii(&empty), "aag 0 0 0 0 0\n");
    }

    #[test]
    fn write_ascii_constants_test() {
        let mut aig = Aig::new();
        let l = AigHandle::from(aig.new_latch().unwrap());
        aig.set_latch_src(0, !l).unwrap();
        aig.add_output(AigHandle::zero()).unwrap();
        aig.add_output(AigHandle::one()).unwrap();
        aig.set_latch_symbol(0, "toggle").unwrap();
        assert_eq!(to_ascii(&aig), "aag 1 0 1 2 0\n2 3\n0\n1\nl0 toggle\n");
    }

    #[test]
    fn write_bin_test() {
        let aig = Aig::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        let bytes = to_bin(&aig);

        let mut expected = b"aig 5 2 0 2 3\n10\n6\n".to_vec();
        // 6 = 4 & 2, 8 = 5 & 3, 10 = 9 & 7
        expected.extend_from_slice(&[2, 2, 3, 2, 1, 2]);
        expected.extend_from_slice(b"i0 x\ni1 y\no0 s\no1 c\nc\nhalf adder\n");
        assert_eq!(bytes, expected);

        // The AIG itself keeps its ids
        assert_eq!(to_ascii(&aig), HALF_ADDER);
    }

    #[test]
    fn write_bin_latch_test() {
        let text = "aag 4 2 1 1 1\n2\n4\n6 8\n9\n8 6 2\n";
        let aig = Aig::from_ascii(text.as_bytes()).unwrap();
        let mut expected = b"aig 4 2 1 1 1\n8\n9\n".to_vec();
        expected.extend_from_slice(&[2, 4]);
        assert_eq!(to_bin(&aig), expected);
    }

    #[test]
    fn bin_round_trip_test() {
        let aig = Aig::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        let bytes = to_bin(&aig);
        let back = Aig::from_bin(bytes.as_slice()).unwrap();

        let mut renumbered = aig.clone();
        renumbered.renumber().unwrap();
        assert_eq!(to_ascii(&back), to_ascii(&renumbered));
        assert_eq!(to_bin(&back), bytes);
    }

    #[test]
    fn ascii_round_trip_test() {
        let aig = Aig::from_file("assets/circuits/and.aig").unwrap();
        let text = to_ascii(&aig);
        let back = Aig::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(back, aig);
        assert_eq!(to_bin(&back), std::fs::read("assets/circuits/and.aig").unwrap());
    }

    #[test]
    fn write_bin_cycle_test() {
        let mut aig = Aig::new();
        let a = AigHandle::from(aig.new_input().unwrap());
        let g0 = aig.new_and(a, a).unwrap();
        let g1 = aig.new_and(g0, !a).unwrap();
        aig.add_output(g1).unwrap();
        aig.set_and_fanins(0, !g1, a).unwrap();

        let mut out = Vec::new();
        assert!(matches!(
            aig.write_bin(&mut out),
            Err(AigError::CyclicGraph { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn write_files_test() {
        let dir = std::env::temp_dir().join(format!("aigerio-writer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let aag = dir.join("half-adder.aag");
        let aig = dir.join("half-adder.aig");

        let original = Aig::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        original.write_ascii_file(&aag).unwrap();
        original.write_bin_file(&aig).unwrap();

        assert_eq!(Aig::from_file(&aag).unwrap(), original);
        let from_bin = Aig::from_file(&aig).unwrap();
        assert_eq!(from_bin.and_count(), 3);
        assert_eq!(from_bin.output_symbol(1).unwrap(), "c");
        assert_eq!(from_bin.get_comment(), "half adder\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
