//! Static ISA data: opcodes and the small sub-field constants the decoder
//! and encoder dispatch on. Mirrors the teacher crate's `common::opcode`
//! module, extended with the `F`/`D`/`A` opcodes and the floating-point
//! rounding-mode name table spec.md §6 needs but the teacher never encoded
//! (it only implements the integer base ISA).

#[allow(clippy::unreadable_literal)]
pub(crate) mod opcode {
    pub const LOAD: u8 = 0b000_0011;
    pub const LOAD_FP: u8 = 0b000_0111;
    pub const MISC_MEM: u8 = 0b000_1111;
    pub const OP_IMM: u8 = 0b001_0011;
    pub const AUIPC: u8 = 0b001_0111;
    pub const OP_IMM_32: u8 = 0b001_1011;
    pub const STORE: u8 = 0b010_0011;
    pub const STORE_FP: u8 = 0b010_0111;
    pub const AMO: u8 = 0b010_1111;
    pub const OP: u8 = 0b011_0011;
    pub const LUI: u8 = 0b011_0111;
    pub const OP_32: u8 = 0b011_1011;
    pub const MADD: u8 = 0b100_0011;
    pub const MSUB: u8 = 0b100_0111;
    pub const NMSUB: u8 = 0b100_1011;
    pub const NMADD: u8 = 0b100_1111;
    pub const OP_FP: u8 = 0b101_0011;
    pub const BRANCH: u8 = 0b110_0011;
    pub const JALR: u8 = 0b110_0111;
    pub const JAL: u8 = 0b110_1111;
    pub const SYSTEM: u8 = 0b111_0011;
}

/// `OP-IMM`/`OP` `funct3` values, shared by both the integer and the `M`
/// extension tables (the latter keyed additionally on `funct7`).
#[allow(clippy::unreadable_literal)]
pub(crate) mod funct3 {
    pub const JALR: u8 = 0b000;

    pub const BEQ: u8 = 0b000;
    pub const BNE: u8 = 0b001;
    pub const BLT: u8 = 0b100;
    pub const BGE: u8 = 0b101;
    pub const BLTU: u8 = 0b110;
    pub const BGEU: u8 = 0b111;

    pub const B_OR_BU_NARROW: u8 = 0b000; // lb/sb
    pub const H: u8 = 0b001; // lh/sh
    pub const W: u8 = 0b010; // lw/sw
    pub const D: u8 = 0b011; // ld/sd, flw-width marker for fp
    pub const BU: u8 = 0b100;
    pub const HU: u8 = 0b101;
    pub const WU: u8 = 0b110;

    pub const ADDI: u8 = 0b000;
    pub const SLLI: u8 = 0b001;
    pub const SLTI: u8 = 0b010;
    pub const SLTIU: u8 = 0b011;
    pub const XORI: u8 = 0b100;
    pub const SRXI: u8 = 0b101; // SRLI or SRAI, distinguished by shtyp
    pub const ORI: u8 = 0b110;
    pub const ANDI: u8 = 0b111;

    pub const ADD_SUB: u8 = 0b000;
    pub const SLL: u8 = 0b001;
    pub const SLT: u8 = 0b010;
    pub const SLTU: u8 = 0b011;
    pub const XOR: u8 = 0b100;
    pub const SRX: u8 = 0b101;
    pub const OR: u8 = 0b110;
    pub const AND: u8 = 0b111;

    pub const MUL: u8 = 0b000;
    pub const MULH: u8 = 0b001;
    pub const MULHSU: u8 = 0b010;
    pub const MULHU: u8 = 0b011;
    pub const DIV: u8 = 0b100;
    pub const DIVU: u8 = 0b101;
    pub const REM: u8 = 0b110;
    pub const REMU: u8 = 0b111;

    pub const FENCE: u8 = 0b000;
    pub const FENCE_I: u8 = 0b001;

    pub const PRIV: u8 = 0b000;
    pub const CSRRW: u8 = 0b001;
    pub const CSRRS: u8 = 0b010;
    pub const CSRRC: u8 = 0b011;
    pub const CSRRWI: u8 = 0b101;
    pub const CSRRSI: u8 = 0b110;
    pub const CSRRCI: u8 = 0b111;
}

#[allow(clippy::unreadable_literal)]
pub(crate) mod funct7 {
    pub const ADD: u8 = 0b000_0000;
    pub const SUB: u8 = 0b010_0000;
    pub const SLL: u8 = 0b000_0000;
    pub const SRL: u8 = 0b000_0000;
    pub const SRA: u8 = 0b010_0000;
    pub const SLT: u8 = 0b000_0000;
    pub const SLTU: u8 = 0b000_0000;
    pub const XOR: u8 = 0b000_0000;
    pub const OR: u8 = 0b000_0000;
    pub const AND: u8 = 0b000_0000;
    pub const MULDIV: u8 = 0b000_0001;
}

/// `OP-IMM`/`OP-IMM-32` shift-type pattern occupying the top bits of the
/// `imm`/`funct7` slot.
#[allow(clippy::unreadable_literal)]
pub(crate) mod shtyp {
    pub const LOGICAL: u8 = 0b000_0000;
    pub const ARITHMETIC: u8 = 0b010_0000;
}

#[allow(clippy::unreadable_literal)]
pub(crate) mod funct12 {
    pub const ECALL: u16 = 0x000;
    pub const EBREAK: u16 = 0x001;
}

/// `AMO` `funct5` values (bits `[31:27]`).
#[allow(clippy::unreadable_literal)]
pub(crate) mod amo_funct5 {
    pub const LR: u8 = 0b00010;
    pub const SC: u8 = 0b00011;
    pub const SWAP: u8 = 0b00001;
    pub const ADD: u8 = 0b00000;
    pub const XOR: u8 = 0b00100;
    pub const AND: u8 = 0b01100;
    pub const OR: u8 = 0b01000;
    pub const MIN: u8 = 0b10000;
    pub const MAX: u8 = 0b10100;
    pub const MINU: u8 = 0b11000;
    pub const MAXU: u8 = 0b11100;
}

/// `OP-FP` `funct5` values (bits `[31:27]`).
#[allow(clippy::unreadable_literal)]
pub(crate) mod fp_funct5 {
    pub const FADD: u8 = 0b00000;
    pub const FSUB: u8 = 0b00001;
    pub const FMUL: u8 = 0b00010;
    pub const FDIV: u8 = 0b00011;
    pub const FSQRT: u8 = 0b01011;
    pub const FSGNJ: u8 = 0b00100;
    pub const FMINMAX: u8 = 0b00101;
    pub const FCVT_FMT_FMT: u8 = 0b01000;
    pub const FCMP: u8 = 0b10100;
    pub const FCVT_W_FMT: u8 = 0b11000;
    pub const FCVT_FMT_W: u8 = 0b11010;
    pub const FCLASS_FMV_X: u8 = 0b11100;
    pub const FMV_FMT_X: u8 = 0b11110;
}

/// `OP-FP`/`MADD` family `fmt` field (bits `[26:25]`).
pub(crate) mod fp_fmt {
    pub const S: u8 = 0b00;
    pub const D: u8 = 0b01;
}

/// Rounding-mode mnemonics for the `rm`/`funct3` slot of floating-point
/// arithmetic, conversions and fused multiply-add instructions.
pub(crate) const ROUNDING_MODES: &[(u8, &str)] = &[
    (0b000, "rne"),
    (0b001, "rtz"),
    (0b010, "rdn"),
    (0b011, "rup"),
    (0b100, "rmm"),
    (0b111, "dyn"),
];

pub(crate) fn rounding_mode_name(bits: u8) -> Option<&'static str> {
    ROUNDING_MODES.iter().find(|(b, _)| *b == bits).map(|(_, n)| *n)
}

pub(crate) fn rounding_mode_bits(name: &str) -> Option<u8> {
    ROUNDING_MODES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(b, _)| *b)
}
