// src/lib.rs
//! lzwin: sliding-window dictionary codec with occupancy-sized offset
//! codes and gamma-coded match lengths.
//!
//! Stream layout, per token:
//!   flag 0:  literal, `symbol_bits` raw bits follow
//!   flag 1:  match, offset field of `max(1, ceil(log2(occupancy+1)))`
//!            bits, then a self-delimiting gamma length code
//! No field width is ever transmitted. Encoder and decoder both derive
//! the offset width from the count of symbols processed so far, so the
//! packed bytes plus the exact bit count are the whole format.

pub mod bitwriter;
pub mod code;
pub mod decoder;
pub mod error;
pub mod matcher;
pub mod tokenizer;
pub mod window;

pub use bitwriter::CodecResult;
pub use code::{EncodedToken, Symbol, Token};
pub use error::{CodecError, Result};

/// Default search window, in symbols.
pub const DEFAULT_WINDOW_SIZE: usize = 64;

/// Codec parameters. `window_size` trades match reach against offset
/// width: a larger window finds more matches and pays for every one of
/// them with wider offset fields. `symbol_bits` is the literal alphabet
/// width (8 for plain bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub window_size: usize,
    pub symbol_bits: u32,
}

impl CodecConfig {
    pub fn new(window_size: usize) -> Self {
        CodecConfig {
            window_size,
            symbol_bits: code::SYMBOL_BITS_DEFAULT,
        }
    }

    /// Fail fast before any work touches the buffers.
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 1 {
            return Err(CodecError::InvalidConfiguration {
                message: "window_size must be at least 1".to_string(),
            });
        }
        if self.symbol_bits < 1 || self.symbol_bits > 8 {
            return Err(CodecError::InvalidConfiguration {
                message: format!("symbol_bits {} outside 1..=8", self.symbol_bits),
            });
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig::new(DEFAULT_WINDOW_SIZE)
    }
}

/// Encode `input` with a byte alphabet and the given window.
pub fn encode(input: &[Symbol], window_size: usize) -> Result<CodecResult> {
    encode_with(CodecConfig::new(window_size), input)
}

pub fn encode_with(config: CodecConfig, input: &[Symbol]) -> Result<CodecResult> {
    config.validate()?;
    let steps = tokenizer::tokenize(input, config.window_size);
    bitwriter::write_tokens(&steps, config.symbol_bits)
}

/// Decode `bit_len` bits of `bytes` back into the original symbols.
/// `window_size` must match the one used to encode.
pub fn decode(bytes: &[u8], bit_len: u64, window_size: usize) -> Result<Vec<Symbol>> {
    decode_with(CodecConfig::new(window_size), bytes, bit_len)
}

pub fn decode_with(config: CodecConfig, bytes: &[u8], bit_len: u64) -> Result<Vec<Symbol>> {
    config.validate()?;
    decoder::decode(bytes, bit_len, config.window_size, config.symbol_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_window_is_rejected_on_both_sides() {
        assert!(matches!(
            encode(b"abc", 0).unwrap_err(),
            CodecError::InvalidConfiguration { .. }
        ));
        assert!(matches!(
            decode(&[0x00], 8, 0).unwrap_err(),
            CodecError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn symbol_width_is_validated() {
        for symbol_bits in [0, 9, 32] {
            let config = CodecConfig { window_size: 64, symbol_bits };
            assert!(matches!(
                encode_with(config, b"abc").unwrap_err(),
                CodecError::InvalidConfiguration { .. }
            ));
        }
    }

    #[test]
    fn narrow_alphabet_round_trips() {
        let config = CodecConfig { window_size: 16, symbol_bits: 7 };
        let input = b"ascii only, ascii only, ascii only";
        let packed = encode_with(config, input).unwrap();
        let output = decode_with(config, &packed.bytes, packed.total_bits).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn empty_input_is_an_empty_result() {
        let packed = encode(b"", 64).unwrap();
        assert!(packed.tokens.is_empty());
        assert_eq!(packed.total_bits, 0);
        assert_eq!(decode(&packed.bytes, 0, 64).unwrap(), b"");
    }
}
