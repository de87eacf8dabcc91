//! The variable-length integers of the binary AIGER and gate section.
//!
//! Little-endian base 128: each byte carries 7 bits of the value, the high bit is set on every
//! byte but the last one.

use std::io::{self, Read, Write};

use super::{AigError, ParserError, Result};

/// Writes `x` as a varint.
pub fn encode(mut x: u64, writer: &mut impl Write) -> io::Result<()> {
    while x > 0x7f {
        writer.write_all(&[(x & 0x7f) as u8 | 0x80])?;
        x >>= 7;
    }
    writer.write_all(&[x as u8])
}

/// Reads one varint.
///
/// Fails if the stream ends in the middle of the number or if the number does not fit in 64 bits.
pub fn decode(reader: &mut impl Read) -> Result<u64> {
    let mut x: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let mut byte = [0u8; 1];
        reader
            .read_exact(&mut byte)
            .map_err(|e| -> AigError {
                match e.kind() {
                    io::ErrorKind::UnexpectedEof => ParserError::UnexpectedEof("and gate deltas").into(),
                    _ => e.into(),
                }
            })?;
        let ch = byte[0];

        let bits = (ch & 0x7f) as u64;
        if shift >= 64 || (shift > 0 && bits >> (64 - shift) != 0) {
            return Err(ParserError::InvalidToken("delta does not fit in 64 bits".to_string()).into());
        }
        x |= bits << shift;
        shift += 7;

        if ch & 0x80 == 0 {
            return Ok(x);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn encoded(x: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode(x, &mut buf).unwrap();
        buf
    }

    #[test]
    fn encode_test() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(1), vec![0x01]);
        assert_eq!(encoded(127), vec![0x7f]);
        assert_eq!(encoded(128), vec![0x80, 0x01]);
        assert_eq!(encoded(300), vec![0xac, 0x02]);
        assert_eq!(encoded(16384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn varint_law_test() {
        let values = [
            0,
            1,
            2,
            126,
            127,
            128,
            129,
            255,
            16383,
            16384,
            1 << 21,
            (1 << 35) + 17,
            u32::MAX as u64,
            u64::MAX - 1,
            u64::MAX,
        ];
        for x in values {
            let buf = encoded(x);
            assert!(buf.len() <= 10);
            assert_eq!(buf.last().unwrap() & 0x80, 0);
            assert!(buf[..buf.len() - 1].iter().all(|b| b & 0x80 != 0));
            assert_eq!(decode(&mut buf.as_slice()).unwrap(), x);
        }
    }

    #[test]
    fn decode_stream_test() {
        let mut buf = Vec::new();
        for x in [5, 300, 0, 16384] {
            encode(x, &mut buf).unwrap();
        }
        buf.extend_from_slice(b"i0 a\n");

        let mut reader = buf.as_slice();
        assert_eq!(decode(&mut reader).unwrap(), 5);
        assert_eq!(decode(&mut reader).unwrap(), 300);
        assert_eq!(decode(&mut reader).unwrap(), 0);
        assert_eq!(decode(&mut reader).unwrap(), 16384);
        assert_eq!(reader, b"i0 a\n");
    }

    #[test]
    fn decode_error_test() {
        assert!(matches!(
            decode(&mut [0x80u8, 0x80].as_slice()),
            Err(AigError::ParserError(ParserError::UnexpectedEof(_)))
        ));
        assert!(decode(&mut [0u8; 0].as_slice()).is_err());

        let too_long = [0xffu8; 10];
        let mut too_long = too_long.to_vec();
        too_long.push(0x01);
        assert!(matches!(
            decode(&mut too_long.as_slice()),
            Err(AigError::ParserError(ParserError::InvalidToken(_)))
        ));
        // 10th byte may only carry the top bit of a u64.
        let mut overflow = vec![0xffu8; 9];
        overflow.push(0x02);
        assert!(decode(&mut overflow.as_slice()).is_err());
    }
}
