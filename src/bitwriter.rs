//! Packs a token stream into its exact bit-level representation.
//!
//! Field widths are never transmitted: the literal/match flag is one bit,
//! the offset field is sized from the window occupancy recorded at each
//! token's emission, and match lengths use a self-delimiting gamma code.
//! The packed bytes are zero-padded at the end; `total_bits` is the
//! number of meaningful bits and the decoder's stop boundary.

use bitstream_io::{BigEndian, BitWrite, BitWriter};

use crate::code::{
    offset_field_bits, token_bit_cost, EncodedToken, Token, FLAG_BITS, FLAG_LITERAL, FLAG_MATCH,
};
use crate::error::{CodecError, Result};
use crate::tokenizer::TokenStep;

/// Outcome of an encode pass: the per-token breakdown plus the packed
/// bit stream. Read-only once produced.
#[derive(Debug)]
pub struct CodecResult {
    pub tokens: Vec<EncodedToken>,
    /// Packed stream, final byte zero-padded.
    pub bytes: Vec<u8>,
    /// Exact number of meaningful bits in `bytes`; equals the sum of the
    /// per-token costs.
    pub total_bits: u64,
}

/// Encode `steps` into a bit stream, accounting every bit.
///
/// Pure function of the steps and their recorded occupancies. A match
/// with a zero or out-of-window operand is rejected with `InvalidToken`;
/// a literal wider than `symbol_bits` with `AlphabetOverflow`.
pub fn write_tokens(steps: &[TokenStep], symbol_bits: u32) -> Result<CodecResult> {
    let mut bytes = Vec::new();
    let mut tokens = Vec::with_capacity(steps.len());
    let mut total_bits = 0u64;

    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);

        for (index, step) in steps.iter().enumerate() {
            let encoded = match step.token {
                Token::Literal { symbol } => {
                    if symbol_bits < 8 && (symbol as u32) >> symbol_bits != 0 {
                        return Err(CodecError::AlphabetOverflow { index, symbol, symbol_bits });
                    }
                    writer.write(FLAG_BITS, FLAG_LITERAL)?;
                    writer.write(symbol_bits, symbol as u32)?;
                    EncodedToken {
                        token: step.token,
                        real_window: step.real_window,
                        flag_bits: FLAG_BITS,
                        symbol_bits,
                        offset_bits: 0,
                        length_bits: 0,
                    }
                }
                Token::Match { offset, length } => {
                    if offset == 0 || length == 0 {
                        return Err(CodecError::InvalidToken {
                            index,
                            message: format!("zero operand in match ({}, {})", offset, length),
                        });
                    }
                    if offset > step.real_window {
                        return Err(CodecError::InvalidToken {
                            index,
                            message: format!(
                                "offset {} outside window of {}",
                                offset, step.real_window
                            ),
                        });
                    }
                    let offset_bits = offset_field_bits(step.real_window);
                    writer.write(FLAG_BITS, FLAG_MATCH)?;
                    writer.write(offset_bits, offset)?;
                    let length_bits = write_gamma(&mut writer, length)?;
                    EncodedToken {
                        token: step.token,
                        real_window: step.real_window,
                        flag_bits: FLAG_BITS,
                        symbol_bits: 0,
                        offset_bits,
                        length_bits,
                    }
                }
            };

            total_bits += encoded.bit_cost() as u64;
            tokens.push(encoded);
        }

        writer.byte_align()?;
    }

    debug_assert_eq!(
        total_bits,
        steps
            .iter()
            .map(|s| token_bit_cost(&s.token, s.real_window, symbol_bits) as u64)
            .sum::<u64>()
    );

    Ok(CodecResult { tokens, bytes, total_bits })
}

/// Write `length >= 1` as a gamma code: `floor(log2(length))` one bits, a
/// zero, then the low bits of `length` with the leading one implicit.
/// Returns the number of bits written.
fn write_gamma<W: std::io::Write>(
    writer: &mut BitWriter<W, BigEndian>,
    length: u32,
) -> Result<u32> {
    let k = 31 - length.leading_zeros();
    for _ in 0..k {
        writer.write(1, 1u32)?;
    }
    writer.write(1, 0u32)?;
    if k > 0 {
        writer.write(k, length & ((1 << k) - 1))?;
    }
    Ok(2 * k + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::SYMBOL_BITS_DEFAULT;
    use crate::tokenizer::tokenize;

    #[test]
    fn empty_stream_costs_nothing() {
        let result = write_tokens(&[], SYMBOL_BITS_DEFAULT).unwrap();
        assert!(result.tokens.is_empty());
        assert!(result.bytes.is_empty());
        assert_eq!(result.total_bits, 0);
    }

    #[test]
    fn repeated_symbol_packs_to_fourteen_bits() {
        // literal 'A' (9 bits), then match offset 1 in a 1-bit field plus
        // gamma(3) = "101": 0 01000001 | 1 1 101 | 00 padding.
        let result = write_tokens(&tokenize(b"AAAA", 64), SYMBOL_BITS_DEFAULT).unwrap();
        assert_eq!(result.total_bits, 14);
        assert_eq!(result.bytes, vec![0x20, 0xF4]);
        assert_eq!(result.tokens[0].bit_cost(), 9);
        assert_eq!(result.tokens[1].bit_cost(), 5);
        assert_eq!(result.tokens[1].code_string(), "1 1 101");
    }

    #[test]
    fn alternating_pair_packs_to_twenty_six_bits() {
        // Two literals (9 bits each), then offset 2 in a 2-bit field plus
        // gamma(4) = "11000".
        let result = write_tokens(&tokenize(b"ABABAB", 64), SYMBOL_BITS_DEFAULT).unwrap();
        assert_eq!(result.total_bits, 26);
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.tokens[2].offset_bits, 2);
        assert_eq!(result.tokens[2].length_bits, 5);
    }

    #[test]
    fn total_is_the_sum_of_per_token_costs() {
        let input = b"IF_WE_CANNOT_DO_AS_WE_WOULD_WE_SHOULD_DO_AS_WE_CAN";
        let result = write_tokens(&tokenize(input, 64), SYMBOL_BITS_DEFAULT).unwrap();
        let sum: u64 = result.tokens.iter().map(|t| t.bit_cost() as u64).sum();
        assert_eq!(result.total_bits, sum);
        assert_eq!(result.bytes.len() as u64, (result.total_bits + 7) / 8);
    }

    #[test]
    fn zero_length_match_is_rejected() {
        let steps = [TokenStep {
            token: Token::Match { offset: 1, length: 0 },
            real_window: 4,
        }];
        let err = write_tokens(&steps, SYMBOL_BITS_DEFAULT).unwrap_err();
        assert!(matches!(err, CodecError::InvalidToken { index: 0, .. }));
    }

    #[test]
    fn offset_beyond_occupancy_is_rejected() {
        let steps = [TokenStep {
            token: Token::Match { offset: 5, length: 2 },
            real_window: 4,
        }];
        let err = write_tokens(&steps, SYMBOL_BITS_DEFAULT).unwrap_err();
        assert!(matches!(err, CodecError::InvalidToken { index: 0, .. }));
    }

    #[test]
    fn narrow_alphabet_rejects_wide_symbols() {
        let steps = [TokenStep {
            token: Token::Literal { symbol: 0xC8 },
            real_window: 0,
        }];
        let err = write_tokens(&steps, 7).unwrap_err();
        assert!(matches!(
            err,
            CodecError::AlphabetOverflow { index: 0, symbol: 0xC8, symbol_bits: 7 }
        ));
    }
}
