//! Reconstructs the original symbols from a packed bit stream.
//!
//! Mirrors the bit writer in reverse. The offset field width depends on
//! how many symbols the encoder had emitted at that point, so the decoder
//! tracks symbols-decoded-so-far; the two counts advance in lockstep by
//! construction, and no width ever needs to be transmitted.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::code::{offset_field_bits, Symbol, FLAG_BITS, FLAG_LITERAL};
use crate::error::{CodecError, Result};

/// Bit cursor that refuses to read past the advertised stream length.
/// The packed bytes are zero-padded to a whole byte, so the decoder has
/// to stop on the exact bit count rather than on end-of-input.
struct BoundedReader<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    consumed: u64,
    bit_len: u64,
}

impl<'a> BoundedReader<'a> {
    fn new(bytes: &'a [u8], bit_len: u64) -> Self {
        BoundedReader {
            reader: BitReader::endian(Cursor::new(bytes), BigEndian),
            consumed: 0,
            bit_len,
        }
    }

    fn remaining(&self) -> u64 {
        self.bit_len - self.consumed
    }

    fn read(&mut self, bits: u32) -> Result<u32> {
        if self.consumed + bits as u64 > self.bit_len {
            return Err(CodecError::TruncatedStream { bit_offset: self.consumed });
        }
        let value = self
            .reader
            .read::<u32>(bits)
            .map_err(|_| CodecError::TruncatedStream { bit_offset: self.consumed })?;
        self.consumed += bits as u64;
        Ok(value)
    }
}

/// Decode `bit_len` bits of `bytes` back into the original symbols.
///
/// `window_size` and `symbol_bits` must match the encode-side
/// configuration; both are assumed validated by the caller. Fails with
/// `TruncatedStream` when a token is cut off mid-code and with
/// `InvalidToken` on an offset or length no encoder could have produced.
pub fn decode(bytes: &[u8], bit_len: u64, window_size: usize, symbol_bits: u32) -> Result<Vec<Symbol>> {
    let mut reader = BoundedReader::new(bytes, bit_len);
    let mut output: Vec<Symbol> = Vec::new();
    let mut index = 0usize;

    while reader.remaining() > 0 {
        let flag = reader.read(FLAG_BITS)?;

        if flag == FLAG_LITERAL {
            let symbol = reader.read(symbol_bits)? as Symbol;
            output.push(symbol);
        } else {
            let real_window = window_size.min(output.len()) as u32;
            let offset = reader.read(offset_field_bits(real_window))?;
            if offset == 0 || offset > real_window {
                return Err(CodecError::InvalidToken {
                    index,
                    message: format!("offset {} outside window of {}", offset, real_window),
                });
            }
            let length = read_gamma(&mut reader, index)?;

            // Copy one symbol at a time: once the source runs past the
            // original window end it reads symbols this same copy just
            // produced, which is what re-expands an overlapped match.
            let start = output.len() - offset as usize;
            for k in 0..length as usize {
                let symbol = output[start + k];
                output.push(symbol);
            }
        }
        index += 1;
    }

    Ok(output)
}

/// Read a gamma length code: count one bits up to the zero terminator,
/// then that many payload bits under an implicit leading one.
fn read_gamma(reader: &mut BoundedReader, index: usize) -> Result<u32> {
    let mut k = 0u32;
    while reader.read(1)? == 1 {
        k += 1;
        if k > 31 {
            return Err(CodecError::InvalidToken {
                index,
                message: "length code exceeds 32 bits".to_string(),
            });
        }
    }
    let rest = if k > 0 { reader.read(k)? } else { 0 };
    Ok((1 << k) | rest)
}
