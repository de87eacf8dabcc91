//! The symbol table and comment section, shared by both AIGER formats.
//!
//! ```text
//! i<pos> <name>
//! l<pos> <name>
//! o<pos> <name>
//! c
//! <comment lines>
//! ```

use std::io::{BufRead, Write};

use log::debug;

use super::{Aig, AigError, ParserError, Result};

/// Strips `\n` or `\r\n` from the end of a line.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl Aig {
    fn symbol_table(&mut self, prefix: char) -> Option<&mut Vec<String>> {
        match prefix {
            'i' => Some(&mut self.input_symbols),
            'l' => Some(&mut self.latch_symbols),
            'o' => Some(&mut self.output_symbols),
            _ => None,
        }
    }

    fn read_symbol(&mut self, line: &str) -> Result<()> {
        let mut chars = line.chars();
        let prefix = chars.next().unwrap_or_default();
        let rest = chars.as_str();
        let (pos, name) = rest.split_once(' ').ok_or_else(|| {
            ParserError::InvalidToken(format!("expected symbol name in {:?}", line))
        })?;
        let pos = pos
            .parse::<usize>()
            .map_err(|_| ParserError::InvalidToken(format!("bad symbol position in {:?}", line)))?;
        if name.is_empty() {
            return Err(ParserError::InvalidToken(format!("empty symbol name in {:?}", line)).into());
        }

        let table = self.symbol_table(prefix).ok_or_else(|| {
            ParserError::UnsupportedFeature(format!("symbol kind {:?} in {:?}", prefix, line))
        })?;
        let slot = table.get_mut(pos).ok_or_else(|| {
            ParserError::InvalidToken(format!("symbol position out of range in {:?}", line))
        })?;
        if !slot.is_empty() {
            return Err(ParserError::InvalidToken(format!("duplicate symbol {:?}", line)).into());
        }
        *slot = name.to_string();
        Ok(())
    }

    /// Reads the optional trailer: symbol lines, then everything after a `c` line
    /// is the comment, kept byte for byte.
    pub(super) fn read_symbols(&mut self, reader: &mut impl BufRead) -> Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            let text = trim_line_end(&line);
            if text == b"c" {
                let mut comment = Vec::new();
                reader.read_to_end(&mut comment)?;
                self.comment = String::from_utf8(comment).map_err(|_| {
                    ParserError::InvalidToken("comment is not valid UTF-8".to_string())
                })?;
                debug!("read comment of {} bytes", self.comment.len());
                return Ok(());
            }
            if text.is_empty() {
                continue;
            }
            let text = std::str::from_utf8(text).map_err(|_| {
                ParserError::InvalidToken(format!(
                    "symbol line is not valid UTF-8: {:?}",
                    String::from_utf8_lossy(text)
                ))
            })?;
            self.read_symbol(text)?;
        }
    }

    /// Writes the symbols which have a name, then the comment if there is one.
    pub(super) fn write_symbols(&self, writer: &mut impl Write) -> Result<()> {
        for (prefix, table) in [
            ('i', &self.input_symbols),
            ('l', &self.latch_symbols),
            ('o', &self.output_symbols),
        ] {
            for (pos, name) in table.iter().enumerate() {
                if !name.is_empty() {
                    writeln!(writer, "{}{} {}", prefix, pos, name)?;
                }
            }
        }

        if !self.comment.is_empty() {
            writeln!(writer, "c")?;
            writer.write_all(self.comment.as_bytes())?;
        }
        Ok(())
    }

    fn set_symbol(
        table: &mut [String],
        pos: usize,
        name: &str,
        what: &'static str,
    ) -> Result<()> {
        let count = table.len();
        let slot = table
            .get_mut(pos)
            .ok_or(AigError::IndexOutOfRange { what, pos, count })?;
        *slot = name.to_string();
        Ok(())
    }

    fn get_symbol<'a>(table: &'a [String], pos: usize, what: &'static str) -> Result<&'a str> {
        table
            .get(pos)
            .map(String::as_str)
            .ok_or(AigError::IndexOutOfRange {
                what,
                pos,
                count: table.len(),
            })
    }

    pub fn set_input_symbol(&mut self, pos: usize, name: &str) -> Result<()> {
        Aig::set_symbol(&mut self.input_symbols, pos, name, "input")
    }

    pub fn set_latch_symbol(&mut self, pos: usize, name: &str) -> Result<()> {
        Aig::set_symbol(&mut self.latch_symbols, pos, name, "latch")
    }

    pub fn set_output_symbol(&mut self, pos: usize, name: &str) -> Result<()> {
        Aig::set_symbol(&mut self.output_symbols, pos, name, "output")
    }

    /// Name of the input at `pos`, empty if it has none.
    pub fn input_symbol(&self, pos: usize) -> Result<&str> {
        Aig::get_symbol(&self.input_symbols, pos, "input")
    }

    /// Name of the latch at `pos`, empty if it has none.
    pub fn latch_symbol(&self, pos: usize) -> Result<&str> {
        Aig::get_symbol(&self.latch_symbols, pos, "latch")
    }

    /// Name of the output at `pos`, empty if it has none.
    pub fn output_symbol(&self, pos: usize) -> Result<&str> {
        Aig::get_symbol(&self.output_symbols, pos, "output")
    }

    /// Sets the comment, written as is after the `c` line.
    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.to_string();
    }

    /// The comment, as read: every byte after the `c` line, line endings included.
    pub fn get_comment(&self) -> &str {
        &self.comment
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use crate::{Aig, AigError, AigHandle, ErrorKind};

    fn sample() -> Aig {
        let mut aig = Aig::new();
        let a = AigHandle::from(aig.new_input().unwrap());
        let b = AigHandle::from(aig.new_input().unwrap());
        let l = AigHandle::from(aig.new_latch().unwrap());
        let g = aig.new_and(a, b).unwrap();
        aig.set_latch_src(0, g).unwrap();
        aig.add_output(g).unwrap();
        aig.add_output(!l).unwrap();
        aig
    }

    fn symbols_of(aig: &Aig) -> String {
        let mut out = Vec::new();
        aig.write_symbols(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn read_symbols_test() {
        let mut aig = sample();
        let trailer = "i0 x\ni1 y z\nl0 state\no1 not state\nc\nfirst line\n\nc\nlast\n";
        aig.read_symbols(&mut trailer.as_bytes()).unwrap();

        assert_eq!(aig.input_symbol(0).unwrap(), "x");
        assert_eq!(aig.input_symbol(1).unwrap(), "y z");
        assert_eq!(aig.latch_symbol(0).unwrap(), "state");
        assert_eq!(aig.output_symbol(0).unwrap(), "");
        assert_eq!(aig.output_symbol(1).unwrap(), "not state");
        assert_eq!(aig.get_comment(), "first line\n\nc\nlast\n");

        assert_eq!(symbols_of(&aig), trailer);
    }

    #[test]
    fn no_trailer_test() {
        let mut aig = sample();
        aig.read_symbols(&mut "".as_bytes()).unwrap();
        assert_eq!(aig.input_symbol(0).unwrap(), "");
        assert_eq!(aig.get_comment(), "");
        assert_eq!(symbols_of(&aig), "");

        let mut aig = sample();
        aig.read_symbols(&mut "\no0 out\r\n".as_bytes()).unwrap();
        assert_eq!(aig.output_symbol(0).unwrap(), "out");
    }

    #[test]
    fn comment_is_verbatim_test() {
        let mut aig = sample();
        aig.read_symbols(&mut "i0 x\r\nc\r\nline\r\nlast".as_bytes())
            .unwrap();
        assert_eq!(aig.input_symbol(0).unwrap(), "x");
        assert_eq!(aig.get_comment(), "line\r\nlast");
        assert_eq!(symbols_of(&aig), "i0 x\nc\nline\r\nlast");

        let mut aig = sample();
        aig.read_symbols(&mut "c\n".as_bytes()).unwrap();
        assert_eq!(aig.get_comment(), "");
    }

    #[test]
    fn non_utf8_trailer_test() {
        for trailer in [b"c\ncaf\xe9\n".as_slice(), b"i0 caf\xe9\n".as_slice()] {
            let mut aig = sample();
            let err = aig.read_symbols(&mut &trailer[..]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format);
        }

        let err = Aig::from_ascii(b"aag 1 1 0 1 0\n2\n2\nc\ncaf\xe9\n".as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        let err = Aig::from_bin(b"aig 1 1 0 1 0\n2\no0 \xff\n".as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn read_symbols_errors_test() {
        for trailer in [
            "i2 x\n",
            "x0 name\n",
            "b0 bad\n",
            "i0\n",
            "i0 \n",
            "ia name\n",
            "i0 x\ni0 y\n",
        ] {
            let mut aig = sample();
            let err = aig.read_symbols(&mut trailer.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{:?}", trailer);
        }
    }

    #[test]
    fn set_symbols_test() {
        let mut aig = sample();
        aig.set_input_symbol(1, "b").unwrap();
        aig.set_output_symbol(0, "g").unwrap();
        aig.set_comment("made by hand\n");
        assert_eq!(symbols_of(&aig), "i1 b\no0 g\nc\nmade by hand\n");

        assert!(matches!(
            aig.set_latch_symbol(1, "nope"),
            Err(AigError::IndexOutOfRange { what: "latch", .. })
        ));
        assert_eq!(aig.output_symbol(2).unwrap_err().kind(), ErrorKind::Index);
    }
}
