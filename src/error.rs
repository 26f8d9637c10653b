//! Tagged error type shared by the decoder, the encoder and the façade.

use thiserror::Error;

/// Every way a decode or encode call can fail.
///
/// Mirrors the taxonomy of the underlying ISA: each variant carries the raw
/// value that was rejected so callers (and tests) can assert on it without
/// re-parsing the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Opcode bits `[6:0]` do not match any known instruction family.
    #[error("invalid opcode: 0b{0:07b}")]
    InvalidOpcode(u8),

    /// Opcode recognized, but no table entry exists for the observed
    /// sub-fields (funct3/funct7/funct5/funct12/rs2).
    #[error("invalid funct fields for opcode 0b{opcode:07b}: {detail}")]
    InvalidFunct {
        /// The opcode that was being dispatched.
        opcode: u8,
        /// Human-readable description of the sub-field combination that
        /// had no table entry (e.g. `"funct3=0b010"`).
        detail: String,
    },

    /// `fence`'s predecessor/successor mask decoded to the empty set.
    #[error("fence predecessor/successor mask must not be empty")]
    InvalidFence,

    /// A register field required to be `x0` by the ISA manual was not.
    #[error("field `{field}` must be zero, got x{value}")]
    NonZeroReserved {
        /// Name of the offending field (`rd` or `rs1`).
        field: &'static str,
        /// The value it actually held.
        value: u8,
    },

    /// Shift amount does not fit the field width, or a 6-bit shift amount
    /// was used under an ISA profile that forbids it.
    #[error("shift amount {shamt} is out of range for {isa}")]
    ShiftOutOfRange {
        /// The parsed/decoded shift amount.
        shamt: u32,
        /// The ISA profile under which the check failed.
        isa: &'static str,
    },

    /// The fixed high bits of an `OP-IMM` shift encoding did not match the
    /// expected `shtyp` pattern.
    #[error("bad shift-type bits: 0b{0:07b}")]
    BadShtyp(u8),

    /// The decoded/encoded instruction's ISA tag is disallowed by the
    /// caller's [`IsaConfig`](crate::config::IsaConfig).
    #[error("instruction belongs to {found} but config requires {allowed}")]
    IsaMismatch {
        /// ISA tag the instruction actually requires.
        found: &'static str,
        /// ISA tag the config allows.
        allowed: &'static str,
    },

    /// Encoder was given a mnemonic absent from the mnemonic table.
    #[error("unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    /// Assembly operand list did not match the mnemonic's expected shape.
    #[error("malformed operands for `{mnemonic}`: {detail}")]
    OperandSyntax {
        /// The mnemonic being assembled.
        mnemonic: String,
        /// What was wrong with the operand list.
        detail: String,
    },

    /// An integer literal does not fit the target field under its
    /// signedness.
    #[error("immediate {value} does not fit in {width} {signedness} bits")]
    ImmediateOutOfRange {
        /// The parsed value.
        value: i64,
        /// Width of the target field, in bits.
        width: u32,
        /// `"signed"` or `"unsigned"`.
        signedness: &'static str,
    },

    /// A register operand token was not a valid numeric or ABI name.
    #[error("not a valid register name: {0}")]
    BadRegister(String),

    /// A CSR operand was neither a known CSR name nor a 12-bit literal.
    #[error("not a valid CSR name or address: {0}")]
    BadCsr(String),

    /// Input was neither a valid hex/binary encoded word nor parseable
    /// assembly.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An invariant the codec itself is responsible for maintaining was
    /// violated. Should be unreachable from any public entry point.
    #[error("internal codec invariant violated: {0}")]
    InternalError(&'static str),
}
