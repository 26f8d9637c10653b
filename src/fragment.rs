//! The fragment model: the shared value type tying one contiguous bit-slice
//! of an encoded word to its role in the rendered assembly. This is the
//! decomposition that makes the codec useful for visualization, not just
//! translation.

use core::fmt;

/// Coarse instruction format, as exposed on [`InstructionResult`](crate::instruction::InstructionResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-register (`add`, `mul`, AMO, most of `OP-FP`).
    R,
    /// 4-register fused multiply-add (`fmadd.s`, ...).
    R4,
    /// Register-immediate (`addi`, loads, `jalr`, CSR, shifts, fence).
    I,
    /// Store.
    S,
    /// Branch.
    B,
    /// Upper-immediate (`lui`, `auipc`).
    U,
    /// Jump-and-link.
    J,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::R => "R",
            Format::R4 => "R4",
            Format::I => "I",
            Format::S => "S",
            Format::B => "B",
            Format::U => "U",
            Format::J => "J",
        };
        write!(f, "{name}-type")
    }
}

/// ISA / extension tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isa {
    /// Base 32-bit integer ISA.
    Rv32I,
    /// Base 64-bit integer ISA (or a 32-bit encoding reporting a 64-bit-only
    /// feature, e.g. a 6-bit shift amount).
    Rv64I,
    /// `M` standard extension (integer multiply/divide).
    ExtM,
    /// `A` standard extension (atomics).
    ExtA,
    /// `F` standard extension (single-precision float).
    ExtF,
    /// `D` standard extension (double-precision float).
    ExtD,
    /// `Zicsr` standard extension.
    ExtZicsr,
    /// `Zifencei` standard extension.
    ExtZifencei,
}

impl Isa {
    /// True if this tag only makes sense under a 64-bit base ISA.
    pub(crate) const fn is_rv64_only(self) -> bool {
        matches!(self, Isa::Rv64I)
    }

    /// The exact spelling spec.md uses for this tag.
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Isa::Rv32I => "RV32I",
            Isa::Rv64I => "RV64I",
            Isa::ExtM => "EXT_M",
            Isa::ExtA => "EXT_A",
            Isa::ExtF => "EXT_F",
            Isa::ExtD => "EXT_D",
            Isa::ExtZicsr => "EXT_Zicsr",
            Isa::ExtZifencei => "EXT_Zifencei",
        }
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One contiguous bit-slice of an encoded word, tied to the assembly token
/// it contributes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    /// The assembly token this slice contributes to (e.g. `"x5"`, `"-12"`,
    /// the mnemonic itself for non-operand fragments).
    pub assembly: String,
    /// MSB-first binary text of the slice.
    pub bits: String,
    /// Field descriptor name (`"opcode"`, `"funct3"`, `"rs1"`, `"b_imm_10_5"`, ...).
    pub field: &'static str,
    /// True iff this fragment is the base register inside `offset(base)`
    /// memory syntax.
    pub mem: bool,
    /// Index of the slice's least-significant bit within the 32-bit word.
    pub index: u32,
}

impl Fragment {
    pub(crate) fn new(
        assembly: impl Into<String>,
        bits: impl Into<String>,
        field: &'static str,
        mem: bool,
        index: u32,
    ) -> Self {
        Self {
            assembly: assembly.into(),
            bits: bits.into(),
            field,
            mem,
            index,
        }
    }
}

/// Sorts `fragments` MSB-first (highest bit index first) in place, as
/// required for `binFrags`.
pub(crate) fn sort_msb_first(fragments: &mut [Fragment]) {
    fragments.sort_by(|a, b| b.index.cmp(&a.index));
}

/// One field of an instruction word awaiting conversion into a [`Fragment`],
/// carrying the position it occupies in the rendered assembly line so both
/// `binFrags` and `asmFrags` can be produced from a single list.
pub(crate) struct FieldSpec {
    field: &'static str,
    high: u32,
    width: u32,
    assembly: String,
    mem: bool,
    asm_pos: u32,
}

impl FieldSpec {
    pub(crate) fn new(
        field: &'static str,
        high: u32,
        width: u32,
        assembly: impl Into<String>,
        mem: bool,
        asm_pos: u32,
    ) -> Self {
        Self {
            field,
            high,
            width,
            assembly: assembly.into(),
            mem,
            asm_pos,
        }
    }
}

/// Builds both fragment orderings of `word` from `specs`: the bit-index
/// partition (`binFrags`, MSB first) and the assembly-token order
/// (`asmFrags`), per each spec's `asm_pos`. Both vectors hold the same
/// fragments, only reordered.
pub(crate) fn build_fragments(word: u32, specs: Vec<FieldSpec>) -> (Vec<Fragment>, Vec<Fragment>) {
    let mut by_field: Vec<(u32, Fragment)> = specs
        .into_iter()
        .map(|s| {
            let bits = crate::bits::bit_slice_text(word, s.high, s.width);
            let index = s.high + 1 - s.width;
            (s.asm_pos, Fragment::new(s.assembly, bits, s.field, s.mem, index))
        })
        .collect();

    let mut bin_frags: Vec<Fragment> = by_field.iter().map(|(_, f)| f.clone()).collect();
    sort_msb_first(&mut bin_frags);

    by_field.sort_by_key(|(pos, _)| *pos);
    let asm_frags: Vec<Fragment> = by_field.into_iter().map(|(_, f)| f).collect();

    (bin_frags, asm_frags)
}
