//! Process-free configuration controlling which encodings are legal and how
//! register names are rendered.

use core::fmt;

/// Base integer ISA width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsaWidth {
    /// 32-bit base integer ISA.
    Rv32i,
    /// 64-bit base integer ISA.
    Rv64i,
}

impl fmt::Display for IsaWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsaWidth::Rv32i => write!(f, "RV32I"),
            IsaWidth::Rv64i => write!(f, "RV64I"),
        }
    }
}

impl std::str::FromStr for IsaWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RV32I" | "RV32" => Ok(IsaWidth::Rv32i),
            "RV64I" | "RV64" => Ok(IsaWidth::Rv64i),
            other => Err(format!("unrecognized ISA width: {other}")),
        }
    }
}

/// `{ ISA, ABI }` configuration value from spec §3/§6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsaConfig {
    /// Restricts which instructions/encodings are legal.
    pub isa: IsaWidth,
    /// Selects ABI register names (`sp`, `ra`, ...) over numeric (`x2`, `x1`, ...) on output.
    pub abi: bool,
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self {
            isa: IsaWidth::Rv32i,
            abi: false,
        }
    }
}

impl IsaConfig {
    /// Shorthand for `{ isa: RV32I, abi: false }`.
    pub const fn rv32i() -> Self {
        Self {
            isa: IsaWidth::Rv32i,
            abi: false,
        }
    }

    /// Shorthand for `{ isa: RV64I, abi: false }`.
    pub const fn rv64i() -> Self {
        Self {
            isa: IsaWidth::Rv64i,
            abi: false,
        }
    }

    /// Same config with ABI register names enabled.
    #[must_use]
    pub const fn with_abi(mut self, abi: bool) -> Self {
        self.abi = abi;
        self
    }
}
