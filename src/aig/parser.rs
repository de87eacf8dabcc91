use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{Aig, Literal, NodeId, Result, aig::error::ParserError};

fn read_u64(s: &str) -> std::result::Result<u64, ParserError> {
    s.parse::<u64>()
        .map_err(|_| ParserError::InvalidToken(s.to_string() + " expected u64"))
}

fn read_count(s: &str) -> std::result::Result<usize, ParserError> {
    s.parse::<usize>()
        .map_err(|_| ParserError::InvalidToken(s.to_string() + " expected a count"))
}

fn check_even(x: u64) -> Result<()> {
    if x & 1 == 1 {
        return Err(ParserError::InvalidToken(
            "expected positive literal (even), got ".to_string() + &x.to_string(),
        )
        .into());
    }
    Ok(())
}

/// Only the default reset value (0) is supported for latches.
fn check_reset(token: &str) -> Result<()> {
    if read_u64(token)? != 0 {
        return Err(ParserError::UnsupportedFeature(
            "latch reset value other than 0: ".to_string() + token,
        )
        .into());
    }
    Ok(())
}

/// Reads one line, failing on end of file.
///
/// Bytes which are not UTF-8 are malformed content, not a stream failure.
fn read_line(reader: &mut impl BufRead, what: &'static str) -> Result<String> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Err(ParserError::UnexpectedEof(what).into());
    }
    let line = String::from_utf8(line).map_err(|e| {
        ParserError::InvalidToken(format!(
            "{} line is not valid UTF-8: {:?}",
            what,
            String::from_utf8_lossy(e.as_bytes())
        ))
    })?;
    Ok(line)
}

fn read_output(line: &str) -> Result<Literal> {
    let tokens = line.split_whitespace().collect::<Vec<&str>>();

    if tokens.is_empty() {
        return Err(
            ParserError::InvalidToken("expected output token, got nothing".to_string()).into(),
        );
    }

    if tokens.len() > 1 {
        return Err(ParserError::InvalidToken(
            "expected nothing after output, got ".to_string() + tokens[1],
        )
        .into());
    }

    Ok(read_u64(tokens[0])?)
}

fn read_outputs(o: usize, reader: &mut impl BufRead) -> Result<Vec<Literal>> {
    let mut outputs = Vec::new();
    for _ in 0..o {
        outputs.push(read_output(&read_line(reader, "outputs")?)?);
    }
    Ok(outputs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    m: NodeId,
    i: usize,
    l: usize,
    o: usize,
    a: usize,
}

impl Header {
    /// Parses `<signature> M I L O A`.
    fn parse(line: &str, signature: &'static str) -> std::result::Result<Self, ParserError> {
        let tokens = line.split_whitespace().collect::<Vec<&str>>();

        let first = tokens.first().copied().unwrap_or_default();
        if first != signature {
            return Err(ParserError::BadSignature {
                expected: signature,
                got: first.to_string(),
            });
        }

        if tokens.len() < 6 {
            return Err(ParserError::InvalidToken(
                "missing header tokens".to_string(),
            ));
        }

        if tokens.len() > 6 {
            return Err(ParserError::UnsupportedFeature(
                "header only supports M I L O A".to_string(),
            ));
        }

        let m = read_u64(tokens[1])?;
        let i = read_count(tokens[2])?;
        let l = read_count(tokens[3])?;
        let o = read_count(tokens[4])?;
        let a = read_count(tokens[5])?;

        Ok(Header { m, i, l, o, a })
    }

    /// `I + L + A`, which is `M` for a binary file. [`None`] if the sum does not fit in a `u64`.
    fn node_count(&self) -> Option<u64> {
        (self.i as u64)
            .checked_add(self.l as u64)?
            .checked_add(self.a as u64)
    }
}

/// Parser for the ASCII AIGER format.
mod ascii {
    use std::io::BufRead;

    use log::debug;

    use crate::{
        Aig, AigBuilder, Literal, NodeId, Result,
        aig::error::ParserError,
        aig::parser::{Header, check_even, check_reset, read_line, read_outputs, read_u64},
    };

    fn read_input(line: &str) -> Result<NodeId> {
        let tokens = line.split_whitespace().collect::<Vec<&str>>();

        if tokens.is_empty() {
            return Err(
                ParserError::InvalidToken("expected input token, got nothing".to_string()).into(),
            );
        }

        if tokens.len() > 1 {
            return Err(ParserError::InvalidToken(
                "expected nothing after input, got ".to_string() + tokens[1],
            )
            .into());
        }

        let i = read_u64(tokens[0])?;
        check_even(i)?;
        Ok(i >> 1)
    }

    fn read_inputs(i: usize, reader: &mut impl BufRead) -> Result<Vec<NodeId>> {
        let mut inputs = Vec::new();
        for _ in 0..i {
            inputs.push(read_input(&read_line(reader, "inputs")?)?);
        }
        Ok(inputs)
    }

    fn read_latch(line: &str) -> Result<(NodeId, Literal)> {
        let tokens = line.split_whitespace().collect::<Vec<&str>>();

        if tokens.len() < 2 {
            return Err(ParserError::InvalidToken("not enough latch tokens".to_string()).into());
        }

        if tokens.len() > 3 {
            return Err(ParserError::InvalidToken(
                "expected nothing after latch, got ".to_string() + tokens[3],
            )
            .into());
        }

        let lit = read_u64(tokens[0])?;
        let next = read_u64(tokens[1])?;
        if let Some(reset) = tokens.get(2) {
            check_reset(reset)?;
        }
        check_even(lit)?;
        Ok((lit >> 1, next))
    }

    fn read_latches(l: usize, reader: &mut impl BufRead) -> Result<Vec<(NodeId, Literal)>> {
        let mut latches = Vec::new();
        for _ in 0..l {
            latches.push(read_latch(&read_line(reader, "latches")?)?);
        }
        Ok(latches)
    }

    fn read_and(line: &str) -> Result<(NodeId, Literal, Literal)> {
        let tokens = line.split_whitespace().collect::<Vec<&str>>();

        if tokens.len() < 3 {
            return Err(ParserError::InvalidToken("not enough and tokens".to_string()).into());
        }

        if tokens.len() > 3 {
            return Err(ParserError::InvalidToken(
                "expected nothing after and tokens, got ".to_string() + tokens[3],
            )
            .into());
        }

        let lit = read_u64(tokens[0])?;
        let fanin0 = read_u64(tokens[1])?;
        let fanin1 = read_u64(tokens[2])?;

        check_even(lit)?;
        Ok((lit >> 1, fanin0, fanin1))
    }

    fn read_ands(a: usize, reader: &mut impl BufRead) -> Result<Vec<(NodeId, Literal, Literal)>> {
        let mut ands = Vec::new();
        for _ in 0..a {
            ands.push(read_and(&read_line(reader, "and gates")?)?);
        }
        Ok(ands)
    }

    fn check_max_var(id: NodeId, header: &Header) -> Result<()> {
        if id > header.m {
            return Err(ParserError::InvalidToken(format!(
                "literal {} exceeds the maximum variable index {}",
                id << 1,
                header.m
            ))
            .into());
        }
        Ok(())
    }

    /// Builder for the AIGER format.
    ///
    /// Every node is declared first, so that latches, outputs and and gates can refer
    /// to and gates which come later in the file.
    fn build_aig(
        header: &Header,
        inputs: Vec<NodeId>,
        latches: Vec<(NodeId, Literal)>,
        outputs: Vec<Literal>,
        ands: Vec<(NodeId, Literal, Literal)>,
    ) -> Result<Aig> {
        let mut builder = AigBuilder::new();
        builder.set_max_var(header.m)?;

        for &id in &inputs {
            check_max_var(id, header)?;
            builder.add_input(id)?;
        }
        for &(id, _) in &latches {
            check_max_var(id, header)?;
            builder.add_latch(id)?;
        }
        for &(id, _, _) in &ands {
            check_max_var(id, header)?;
            builder.add_and(id)?;
        }

        // Then wire everything
        for (pos, &(_, fanin0, fanin1)) in ands.iter().enumerate() {
            let fanin0 = builder.handle(fanin0)?;
            let fanin1 = builder.handle(fanin1)?;
            builder.wire_and(pos, fanin0, fanin1)?;
        }
        for (pos, &(_, next)) in latches.iter().enumerate() {
            let next = builder.handle(next)?;
            builder.set_latch_src(pos, next)?;
        }
        for &src in &outputs {
            let src = builder.handle(src)?;
            builder.add_output(src)?;
        }

        let aig = builder.finish()?;

        // Forward references are fine, cycles are not
        aig.check_integrity()?;

        Ok(aig)
    }

    impl Aig {
        /// Creates an AIG from a stream in the ASCII AIGER format (`aag`).
        ///
        /// The node ids are the ones of the file. The and gates may be listed in any order
        /// as long as they do not form a cycle.
        pub fn from_ascii(mut reader: impl BufRead) -> Result<Self> {
            let header = Header::parse(&read_line(&mut reader, "header")?, "aag")?;
            debug!("reading aag: {:?}", header);

            let inputs = read_inputs(header.i, &mut reader)?;
            let latches = read_latches(header.l, &mut reader)?;
            let outputs = read_outputs(header.o, &mut reader)?;
            let ands = read_ands(header.a, &mut reader)?;

            let mut aig = build_aig(&header, inputs, latches, outputs, ands)?;
            aig.read_symbols(&mut reader)?;

            debug!(
                "read aag with {} nodes and {} outputs",
                aig.nodes.len(),
                aig.output_count()
            );
            Ok(aig)
        }
    }

}

/// Parser for the binary AIGER format.
mod bin {
    use std::io::BufRead;

    use log::{debug, trace};

    use crate::{
        Aig, AigBuilder, Literal, Result,
        aig::error::ParserError,
        aig::parser::{Header, check_reset, read_line, read_outputs, read_u64},
        aig::varint,
    };

    fn read_latch(line: &str) -> Result<Literal> {
        let tokens = line.split_whitespace().collect::<Vec<&str>>();

        if tokens.is_empty() {
            return Err(ParserError::InvalidToken("not enough latch tokens".to_string()).into());
        }

        if tokens.len() > 2 {
            return Err(ParserError::InvalidToken(
                "expected nothing after latch, got ".to_string() + tokens[2],
            )
            .into());
        }

        let next = read_u64(tokens[0])?;
        if let Some(reset) = tokens.get(1) {
            check_reset(reset)?;
        }
        Ok(next)
    }

    fn read_latches(l: usize, reader: &mut impl BufRead) -> Result<Vec<Literal>> {
        let mut latches = Vec::new();
        for _ in 0..l {
            latches.push(read_latch(&read_line(reader, "latches")?)?);
        }
        Ok(latches)
    }

    /// Reads the delta-encoded and gates. Their ids are implicit and strictly increasing,
    /// and each fanin has a lower literal than its gate.
    fn read_and_register_ands(
        builder: &mut AigBuilder,
        reader: &mut impl BufRead,
        header: &Header,
    ) -> Result<()> {
        let first_id = (header.i as u64)
            .checked_add(header.l as u64)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| ParserError::HeaderMismatch("too many inputs and latches".to_string()))?;

        for pos in 0..header.a {
            let lhs = first_id
                .checked_add(pos as u64)
                .and_then(|id| id.checked_mul(2))
                .ok_or_else(|| {
                    ParserError::HeaderMismatch(format!("and gate {} has no valid literal", pos))
                })?;
            let delta0 = varint::decode(reader)?;
            let delta1 = varint::decode(reader)?;

            if delta0 == 0 || delta0 > lhs {
                return Err(ParserError::InvalidToken(format!(
                    "and gate {}: first delta {} out of range",
                    lhs, delta0
                ))
                .into());
            }
            let rhs0 = lhs - delta0;
            let rhs1 = rhs0.checked_sub(delta1).ok_or_else(|| {
                ParserError::InvalidToken(format!(
                    "and gate {}: second delta {} out of range",
                    lhs, delta1
                ))
            })?;
            trace!("and gate {} = {} & {}", lhs, rhs0, rhs1);

            builder.add_and(lhs >> 1)?;
            let fanin0 = builder.handle(rhs0)?;
            let fanin1 = builder.handle(rhs1)?;
            builder.wire_and(pos, fanin0, fanin1)?;
        }

        Ok(())
    }

    impl Aig {
        /// Creates an AIG from a stream in the binary AIGER format (`aig`).
        ///
        /// The header must satisfy `M = I + L + A`. Inputs get ids `1..=I`, latches the
        /// next `L` ids and and gates the remaining ones, in file order.
        pub fn from_bin(mut reader: impl BufRead) -> Result<Self> {
            let header = Header::parse(&read_line(&mut reader, "header")?, "aig")?;
            debug!("reading aig: {:?}", header);

            let node_count = header.node_count().ok_or_else(|| {
                ParserError::HeaderMismatch("I + L + A does not fit in 64 bits".to_string())
            })?;
            if header.m != node_count {
                return Err(ParserError::HeaderMismatch(format!(
                    "M={} but I + L + A = {}",
                    header.m, node_count
                ))
                .into());
            }

            // Using the binary AIGER format, the AIG can be built progressively.
            let mut builder = AigBuilder::new();
            builder.set_max_var(header.m)?;

            let mut id = 0;
            for _ in 0..header.i {
                id += 1;
                builder.add_input(id)?;
            }
            for _ in 0..header.l {
                id += 1;
                builder.add_latch(id)?;
            }

            // Latches and outputs may refer to and gates, collecting them for later
            let latches = read_latches(header.l, &mut reader)?;
            let outputs = read_outputs(header.o, &mut reader)?;

            read_and_register_ands(&mut builder, &mut reader, &header)?;

            for (pos, &next) in latches.iter().enumerate() {
                let next = builder.handle(next)?;
                builder.set_latch_src(pos, next)?;
            }
            for &src in &outputs {
                let src = builder.handle(src)?;
                builder.add_output(src)?;
            }

            let mut aig = builder.finish()?;
            aig.read_symbols(&mut reader)?;

            debug!(
                "read aig with {} nodes and {} outputs",
                aig.nodes.len(),
                aig.output_count()
            );
            Ok(aig)
        }
    }

}

impl Aig {
    /// Creates an AIG from an AIGER file, choosing the format from the `aag` / `aig`
    /// signature at the start of the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path.as_ref())?;
        let mut reader = BufReader::new(f);
        let signature = reader.fill_buf()?.iter().take(3).copied().collect::<Vec<u8>>();
        match signature.as_slice() {
            b"aag" => Aig::from_ascii(reader),
            b"aig" => Aig::from_bin(reader),
            _ => Err(ParserError::BadSignature {
                expected: "aag or aig",
                got: String::from_utf8_lossy(&signature).into_owned(),
            }
            .into()),
        }
    }
}
