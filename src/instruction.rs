//! The public façade: detects whether input is an encoded word or an
//! assembly line and routes to [`decode`](crate::decode) or
//! [`encode`](crate::encode), then renders the shared [`Decoded`] result into
//! something a caller (or the `rvcodec` binary) can print or serialize.

use core::fmt;

use crate::bits::{bin_word_to_u32, hex_word_to_u32, u32_to_bin, u32_to_hex};
use crate::config::IsaConfig;
use crate::decode;
use crate::encode;
use crate::error::CodecError;
use crate::fragment::{Format, Fragment, Isa};

/// The full result of translating one instruction, in both its word and
/// assembly forms, with the bit-to-token fragment breakdown in both
/// orderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionResult {
    /// Lowercase 8-hex-digit encoding, no `0x` prefix.
    pub hex: String,
    /// 32-character `0`/`1` encoding.
    pub bin: String,
    /// Rendered assembly line.
    pub asm: String,
    /// Coarse instruction format.
    pub fmt: Format,
    /// ISA/extension this instruction belongs to.
    pub isa: Isa,
    /// Fragments ordered MSB-first across the 32-bit word.
    pub bin_frags: Vec<Fragment>,
    /// Fragments ordered as they appear in `asm`.
    pub asm_frags: Vec<Fragment>,
}

impl fmt::Display for InstructionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "asm: {}", self.asm)?;
        writeln!(f, "hex: 0x{}", self.hex)?;
        writeln!(f, "bin: {}", self.bin)?;
        writeln!(f, "fmt: {}", self.fmt)?;
        write!(f, "isa: {}", self.isa)
    }
}

impl From<decode::Decoded> for InstructionResult {
    fn from(d: decode::Decoded) -> Self {
        Self {
            hex: u32_to_hex(d.word),
            bin: u32_to_bin(d.word),
            asm: d.asm,
            fmt: d.fmt,
            isa: d.isa,
            bin_frags: d.bin_frags,
            asm_frags: d.asm_frags,
        }
    }
}

/// Detects whether `input` is a hex word, a binary word, or an assembly
/// line, and decodes/encodes it accordingly.
///
/// # Errors
///
/// Returns [`CodecError::MalformedInput`] if `input` is empty or otherwise
/// cannot be classified, and whatever [`decode`](crate::decode::decode) or
/// [`encode`](crate::encode::encode) returns for a recognized-but-invalid
/// encoding.
pub fn translate(input: &str, config: &IsaConfig) -> Result<InstructionResult, CodecError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CodecError::MalformedInput("empty input".to_string()));
    }
    if let Some(word) = hex_word_to_u32(trimmed) {
        return decode::decode(word, config).map(Into::into);
    }
    if let Some(word) = bin_word_to_u32(trimmed) {
        return decode::decode(word, config).map(Into::into);
    }
    if looks_like_assembly(trimmed) {
        return encode::encode(trimmed, config).map(Into::into);
    }
    Err(CodecError::MalformedInput(format!(
        "'{trimmed}' is neither an 8-hex-digit word, a 32-bit binary word, nor assembly"
    )))
}

fn looks_like_assembly(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_hex_word() {
        let r = translate("00c58533", &IsaConfig::rv32i()).unwrap();
        assert_eq!(r.asm, "add x10, x11, x12");
        assert_eq!(r.hex, "00c58533");
    }

    #[test]
    fn round_trips_assembly() {
        let r = translate("add x10, x11, x12", &IsaConfig::rv32i()).unwrap();
        assert_eq!(r.hex, "00c58533");
    }

    #[test]
    fn accepts_binary_word() {
        let r = translate(&"0".repeat(25) + "0110011", &IsaConfig::rv32i()).unwrap();
        assert_eq!(r.asm, "add x0, x0, x0");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            translate("", &IsaConfig::rv32i()),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn rejects_garbage_input() {
        assert!(matches!(
            translate("???", &IsaConfig::rv32i()),
            Err(CodecError::MalformedInput(_))
        ));
    }
}
