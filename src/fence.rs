//! `fence`'s 4-bit predecessor/successor masks.

use core::fmt;

use crate::error::CodecError;

const LETTERS: [char; 4] = ['i', 'o', 'r', 'w'];

/// A 4-bit `fence` predecessor or successor set, rendered as the
/// concatenation of set letters in `i, o, r, w` order (MSB to LSB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenceMask(pub(crate) u8);

impl FenceMask {
    pub(crate) const fn new(bits: u8) -> Self {
        debug_assert!(bits <= 0b1111);
        Self(bits)
    }

    pub(crate) const fn bits(self) -> u8 {
        self.0
    }

    /// Renders the mask as its set letters, e.g. `0b1001` -> `"iw"`.
    #[must_use]
    pub fn render(self) -> String {
        let mut s = String::new();
        for (i, letter) in LETTERS.iter().enumerate() {
            if self.0 & (0b1000 >> i) != 0 {
                s.push(*letter);
            }
        }
        s
    }

    /// Parses a subset of `iorw` (in any order, but only those four
    /// letters) into a mask. An empty string decodes to [`CodecError::InvalidFence`].
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        if text.is_empty() {
            return Err(CodecError::InvalidFence);
        }
        let mut bits = 0u8;
        for c in text.chars() {
            let pos = LETTERS
                .iter()
                .position(|&l| l == c)
                .ok_or_else(|| CodecError::OperandSyntax {
                    mnemonic: "fence".to_string(),
                    detail: format!("'{c}' is not one of i, o, r, w"),
                })?;
            bits |= 0b1000 >> pos;
        }
        Ok(Self(bits))
    }
}

impl fmt::Display for FenceMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_iorw_order() {
        assert_eq!(FenceMask::new(0b1111).render(), "iorw");
        assert_eq!(FenceMask::new(0b1001).render(), "iw");
    }

    #[test]
    fn parses_iorw_subset() {
        assert_eq!(FenceMask::parse("iorw").unwrap(), FenceMask(0b1111));
        assert_eq!(FenceMask::parse("rw").unwrap(), FenceMask(0b0011));
    }

    #[test]
    fn empty_mask_is_invalid() {
        assert_eq!(FenceMask::new(0).render(), "");
        assert!(FenceMask::parse("").is_err());
    }
}
