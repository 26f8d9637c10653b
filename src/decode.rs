//! Instruction word -> assembly decoding.
//!
//! Structured the way the teacher crate's `decode` module is: one dispatch
//! on `opcode`, falling into a per-family function that further dispatches
//! on `funct3`/`funct7`/`funct5`/`funct12`. Where the teacher builds a typed
//! `Instruction` enum variant, we build an assembly string plus the
//! [`Fragment`] list the typed value would have implied, since both
//! directions of this codec need the bit-level breakdown, not just a typed
//! value.

use crate::bits::{bit_slice, sign_extend};
use crate::config::{IsaConfig, IsaWidth};
use crate::csr::Csr;
use crate::error::CodecError;
use crate::fence::FenceMask;
use crate::fragment::{build_fragments, FieldSpec, Format, Fragment, Isa};
use crate::registers::Register;
use crate::tables::{amo_funct5, fp_fmt, fp_funct5, funct3, funct7, opcode, rounding_mode_name, shtyp};

/// Result of decoding a single 32-bit word.
pub(crate) struct Decoded {
    pub word: u32,
    pub asm: String,
    pub fmt: Format,
    pub isa: Isa,
    pub bin_frags: Vec<Fragment>,
    pub asm_frags: Vec<Fragment>,
}

fn opcode_of(word: u32) -> u8 {
    bit_slice(word, 6, 7) as u8
}

fn funct3_of(word: u32) -> u8 {
    bit_slice(word, 14, 3) as u8
}

fn funct7_of(word: u32) -> u8 {
    bit_slice(word, 31, 7) as u8
}

fn rd(word: u32) -> Register {
    Register::new(bit_slice(word, 11, 5) as u8)
}

fn rs1(word: u32) -> Register {
    Register::new(bit_slice(word, 19, 5) as u8)
}

fn rs2(word: u32) -> Register {
    Register::new(bit_slice(word, 24, 5) as u8)
}

fn check_isa(tag: Isa, config: &IsaConfig) -> Result<(), CodecError> {
    if tag.is_rv64_only() && matches!(config.isa, IsaWidth::Rv32i) {
        return Err(CodecError::IsaMismatch {
            found: "RV64I",
            allowed: "RV32I",
        });
    }
    Ok(())
}

fn require_zero(field: &'static str, value: Register) -> Result<(), CodecError> {
    if value.index() != 0 {
        return Err(CodecError::NonZeroReserved {
            field,
            value: value.index(),
        });
    }
    Ok(())
}

/// Decodes `word` into an assembly line, its format/ISA tags and its
/// fragment breakdown, rejecting anything [`config`](IsaConfig) disallows.
pub(crate) fn decode(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    match opcode_of(word) {
        opcode::LUI => decode_upper(word, "lui", Isa::Rv32I, config),
        opcode::AUIPC => decode_upper(word, "auipc", Isa::Rv32I, config),
        opcode::JAL => decode_jal(word, config),
        opcode::JALR => decode_jalr(word, config),
        opcode::BRANCH => decode_branch(word, config),
        opcode::LOAD => decode_load(word, config),
        opcode::LOAD_FP => decode_load_fp(word, config),
        opcode::STORE => decode_store(word, config),
        opcode::STORE_FP => decode_store_fp(word, config),
        opcode::OP_IMM => decode_op_imm(word, config, false),
        opcode::OP_IMM_32 => decode_op_imm(word, config, true),
        opcode::OP => decode_op(word, config, false),
        opcode::OP_32 => decode_op(word, config, true),
        opcode::MISC_MEM => decode_misc_mem(word, config),
        opcode::SYSTEM => decode_system(word, config),
        opcode::AMO => decode_amo(word, config),
        opcode::OP_FP => decode_op_fp(word, config),
        op @ (opcode::MADD | opcode::MSUB | opcode::NMSUB | opcode::NMADD) => {
            decode_fma(word, op, config)
        }
        other => Err(CodecError::InvalidOpcode(other)),
    }
}

fn finish(
    word: u32,
    mnemonic: &str,
    operands: &[String],
    fmt: Format,
    isa: Isa,
    mut specs: Vec<FieldSpec>,
    opcode_high: u32,
) -> Decoded {
    let asm = if operands.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{mnemonic} {}", operands.join(", "))
    };
    specs.push(FieldSpec::new("opcode", opcode_high, 7, mnemonic, false, 0));
    let (bin_frags, asm_frags) = build_fragments(word, specs);
    Decoded {
        word,
        asm,
        fmt,
        isa,
        bin_frags,
        asm_frags,
    }
}

// ---------------------------------------------------------------- U-type

fn decode_upper(word: u32, mnemonic: &'static str, isa: Isa, config: &IsaConfig) -> Result<Decoded, CodecError> {
    check_isa(isa, config)?;
    let rd = rd(word);
    #[allow(clippy::cast_possible_wrap)]
    let imm = (word & 0xFFFF_F000) as i32;
    let operands = vec![rd.render_int(config.abi), imm.to_string()];
    let specs = vec![
        FieldSpec::new("u_imm", 31, 20, imm.to_string(), false, 2),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::U, isa, specs, 6))
}

// ---------------------------------------------------------------- J-type

fn j_imm(word: u32) -> i32 {
    let imm20 = bit_slice(word, 31, 1) << 20;
    let imm19_12 = bit_slice(word, 19, 8) << 12;
    let imm11 = bit_slice(word, 20, 1) << 11;
    let imm10_1 = bit_slice(word, 30, 10) << 1;
    sign_extend(imm20 | imm19_12 | imm11 | imm10_1, 21) as i32
}

fn decode_jal(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    check_isa(Isa::Rv32I, config)?;
    let rd = rd(word);
    let imm = j_imm(word);
    let operands = vec![rd.render_int(config.abi), imm.to_string()];
    let imm_text = imm.to_string();
    let specs = vec![
        FieldSpec::new("j_imm_20", 31, 1, imm_text.clone(), false, 2),
        FieldSpec::new("j_imm_10_1", 30, 10, imm_text.clone(), false, 2),
        FieldSpec::new("j_imm_11", 20, 1, imm_text.clone(), false, 2),
        FieldSpec::new("j_imm_19_12", 19, 8, imm_text, false, 2),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, "jal", &operands, Format::J, Isa::Rv32I, specs, 6))
}

// ---------------------------------------------------------------- I-type

fn i_imm(word: u32) -> i32 {
    sign_extend(bit_slice(word, 31, 12), 12) as i32
}

fn decode_jalr(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    if funct3_of(word) != funct3::JALR {
        return Err(CodecError::InvalidFunct {
            opcode: opcode::JALR,
            detail: format!("funct3=0b{:03b}", funct3_of(word)),
        });
    }
    check_isa(Isa::Rv32I, config)?;
    let rd = rd(word);
    let rs1 = rs1(word);
    let imm = i_imm(word);
    let operands = vec![rd.render_int(config.abi), format!("{imm}({})", rs1.render_int(config.abi))];
    let specs = vec![
        FieldSpec::new("i_imm", 31, 12, imm.to_string(), false, 1),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), true, 1),
        FieldSpec::new("funct3", 14, 3, "jalr", false, 0),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, "jalr", &operands, Format::I, Isa::Rv32I, specs, 6))
}

// ---------------------------------------------------------------- B-type

fn b_imm(word: u32) -> i32 {
    let imm12 = bit_slice(word, 31, 1) << 12;
    let imm11 = bit_slice(word, 7, 1) << 11;
    let imm10_5 = bit_slice(word, 30, 6) << 5;
    let imm4_1 = bit_slice(word, 11, 4) << 1;
    sign_extend(imm12 | imm11 | imm10_5 | imm4_1, 13) as i32
}

fn decode_branch(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let mnemonic = match funct3_of(word) {
        funct3::BEQ => "beq",
        funct3::BNE => "bne",
        funct3::BLT => "blt",
        funct3::BGE => "bge",
        funct3::BLTU => "bltu",
        funct3::BGEU => "bgeu",
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: opcode::BRANCH,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };
    check_isa(Isa::Rv32I, config)?;
    let rs1 = rs1(word);
    let rs2 = rs2(word);
    let imm = b_imm(word);
    let operands = vec![rs1.render_int(config.abi), rs2.render_int(config.abi), imm.to_string()];
    let imm_text = imm.to_string();
    let specs = vec![
        FieldSpec::new("b_imm_12", 31, 1, imm_text.clone(), false, 2),
        FieldSpec::new("b_imm_10_5", 30, 6, imm_text.clone(), false, 2),
        FieldSpec::new("rs2", 24, 5, rs2.render_int(config.abi), false, 1),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), false, 0),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("b_imm_4_1", 11, 4, imm_text.clone(), false, 2),
        FieldSpec::new("b_imm_11", 7, 1, imm_text, false, 2),
    ];
    Ok(finish(word, mnemonic, &operands, Format::B, Isa::Rv32I, specs, 6))
}

// ---------------------------------------------------------------- loads/stores

fn decode_load(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let (mnemonic, isa) = match funct3_of(word) {
        funct3::B_OR_BU_NARROW => ("lb", Isa::Rv32I),
        funct3::H => ("lh", Isa::Rv32I),
        funct3::W => ("lw", Isa::Rv32I),
        funct3::D => ("ld", Isa::Rv64I),
        funct3::BU => ("lbu", Isa::Rv32I),
        funct3::HU => ("lhu", Isa::Rv32I),
        funct3::WU => ("lwu", Isa::Rv64I),
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: opcode::LOAD,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };
    check_isa(isa, config)?;
    let rd = rd(word);
    let rs1 = rs1(word);
    let imm = i_imm(word);
    let operands = vec![rd.render_int(config.abi), format!("{imm}({})", rs1.render_int(config.abi))];
    let specs = vec![
        FieldSpec::new("i_imm", 31, 12, imm.to_string(), false, 1),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), true, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::I, isa, specs, 6))
}

fn decode_load_fp(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let (mnemonic, isa) = match funct3_of(word) {
        funct3::W => ("flw", Isa::ExtF),
        funct3::D => ("fld", Isa::ExtD),
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: opcode::LOAD_FP,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };
    check_isa(isa, config)?;
    let rd = rd(word);
    let rs1 = rs1(word);
    let imm = i_imm(word);
    let operands = vec![rd.render_float(config.abi), format!("{imm}({})", rs1.render_int(config.abi))];
    let specs = vec![
        FieldSpec::new("i_imm", 31, 12, imm.to_string(), false, 1),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), true, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("rd", 11, 5, rd.render_float(config.abi), false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::I, isa, specs, 6))
}

fn s_imm(word: u32) -> i32 {
    let hi = bit_slice(word, 31, 7) << 5;
    let lo = bit_slice(word, 11, 5);
    sign_extend(hi | lo, 12) as i32
}

fn decode_store(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let (mnemonic, isa) = match funct3_of(word) {
        funct3::B_OR_BU_NARROW => ("sb", Isa::Rv32I),
        funct3::H => ("sh", Isa::Rv32I),
        funct3::W => ("sw", Isa::Rv32I),
        funct3::D => ("sd", Isa::Rv64I),
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: opcode::STORE,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };
    check_isa(isa, config)?;
    let rs1 = rs1(word);
    let rs2 = rs2(word);
    let imm = s_imm(word);
    let operands = vec![rs2.render_int(config.abi), format!("{imm}({})", rs1.render_int(config.abi))];
    let imm_text = imm.to_string();
    let specs = vec![
        FieldSpec::new("s_imm_11_5", 31, 7, imm_text.clone(), false, 1),
        FieldSpec::new("rs2", 24, 5, rs2.render_int(config.abi), false, 0),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), true, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("s_imm_4_0", 11, 5, imm_text, false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::S, isa, specs, 6))
}

fn decode_store_fp(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let (mnemonic, isa) = match funct3_of(word) {
        funct3::W => ("fsw", Isa::ExtF),
        funct3::D => ("fsd", Isa::ExtD),
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: opcode::STORE_FP,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };
    check_isa(isa, config)?;
    let rs1 = rs1(word);
    let rs2 = rs2(word);
    let imm = s_imm(word);
    let operands = vec![rs2.render_float(config.abi), format!("{imm}({})", rs1.render_int(config.abi))];
    let imm_text = imm.to_string();
    let specs = vec![
        FieldSpec::new("s_imm_11_5", 31, 7, imm_text.clone(), false, 1),
        FieldSpec::new("rs2", 24, 5, rs2.render_float(config.abi), false, 0),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), true, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("s_imm_4_0", 11, 5, imm_text, false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::S, isa, specs, 6))
}

// ---------------------------------------------------------------- OP-IMM / OP-IMM-32

fn decode_op_imm(word: u32, config: &IsaConfig, word32: bool) -> Result<Decoded, CodecError> {
    let f3 = funct3_of(word);
    let op = if word32 { opcode::OP_IMM_32 } else { opcode::OP_IMM };
    let is_shift = f3 == funct3::SLLI || f3 == funct3::SRXI;
    if is_shift {
        return decode_shift_imm(word, config, word32, f3);
    }
    if word32 {
        // Only ADDIW has a non-shift form at OP-IMM-32.
        if f3 != funct3::ADDI {
            return Err(CodecError::InvalidFunct {
                opcode: op,
                detail: format!("funct3=0b{f3:03b}"),
            });
        }
    }
    let mnemonic = match f3 {
        funct3::ADDI => {
            if word32 {
                "addiw"
            } else {
                "addi"
            }
        }
        funct3::SLTI => "slti",
        funct3::SLTIU => "sltiu",
        funct3::XORI => "xori",
        funct3::ORI => "ori",
        funct3::ANDI => "andi",
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: op,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };
    let isa = if word32 { Isa::Rv64I } else { Isa::Rv32I };
    check_isa(isa, config)?;
    let rd = rd(word);
    let rs1 = rs1(word);
    let imm = i_imm(word);
    let operands = vec![rd.render_int(config.abi), rs1.render_int(config.abi), imm.to_string()];
    let specs = vec![
        FieldSpec::new("i_imm", 31, 12, imm.to_string(), false, 2),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), false, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::I, isa, specs, 6))
}

fn decode_shift_imm(word: u32, config: &IsaConfig, word32: bool, f3: u8) -> Result<Decoded, CodecError> {
    let op = if word32 { opcode::OP_IMM_32 } else { opcode::OP_IMM };
    let bit25 = bit_slice(word, 25, 1);
    let six_bit = !word32 && bit25 == 1;

    let (shtyp_bits, shamt, shtyp_high, shtyp_width, shamt_high, shamt_width) = if six_bit {
        (bit_slice(word, 31, 6), bit_slice(word, 25, 6), 31, 6, 25, 6)
    } else {
        (bit_slice(word, 31, 7), bit_slice(word, 24, 5), 31, 7, 24, 5)
    };

    let is_arithmetic = if six_bit {
        shtyp_bits == u32::from(shtyp::ARITHMETIC >> 1)
    } else {
        shtyp_bits == u32::from(shtyp::ARITHMETIC)
    };
    let is_logical = if six_bit {
        shtyp_bits == u32::from(shtyp::LOGICAL >> 1)
    } else {
        shtyp_bits == u32::from(shtyp::LOGICAL)
    };
    if !is_arithmetic && !is_logical {
        return Err(CodecError::BadShtyp(shtyp_bits as u8));
    }
    if word32 && bit25 == 1 {
        return Err(CodecError::BadShtyp(funct7_of(word)));
    }

    let mnemonic = match f3 {
        funct3::SLLI if word32 => "slliw",
        funct3::SLLI => "slli",
        funct3::SRXI if is_arithmetic && word32 => "sraiw",
        funct3::SRXI if is_arithmetic => "srai",
        funct3::SRXI if word32 => "srliw",
        funct3::SRXI => "srli",
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: op,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };

    let isa = if word32 || six_bit { Isa::Rv64I } else { Isa::Rv32I };
    if six_bit && matches!(config.isa, IsaWidth::Rv32i) {
        return Err(CodecError::ShiftOutOfRange {
            shamt,
            isa: "RV32I",
        });
    }
    check_isa(isa, config)?;

    let rd = rd(word);
    let rs1 = rs1(word);
    let operands = vec![rd.render_int(config.abi), rs1.render_int(config.abi), shamt.to_string()];
    let specs = vec![
        FieldSpec::new("shtyp", shtyp_high, shtyp_width, mnemonic, false, 2),
        FieldSpec::new("shamt", shamt_high, shamt_width, shamt.to_string(), false, 2),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), false, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::I, isa, specs, 6))
}

// ---------------------------------------------------------------- OP / OP-32

fn base_isa(word32: bool) -> Isa {
    if word32 {
        Isa::Rv64I
    } else {
        Isa::Rv32I
    }
}

fn decode_op(word: u32, config: &IsaConfig, word32: bool) -> Result<Decoded, CodecError> {
    let f3 = funct3_of(word);
    let f7 = funct7_of(word);
    let op = if word32 { opcode::OP_32 } else { opcode::OP };

    let (mnemonic, isa) = match (f3, f7) {
        (funct3::ADD_SUB, funct7::ADD) => (if word32 { "addw" } else { "add" }, base_isa(word32)),
        (funct3::ADD_SUB, funct7::SUB) => (if word32 { "subw" } else { "sub" }, base_isa(word32)),
        (funct3::SLL, funct7::SLL) => (if word32 { "sllw" } else { "sll" }, base_isa(word32)),
        (funct3::SRX, funct7::SRL) => (if word32 { "srlw" } else { "srl" }, base_isa(word32)),
        (funct3::SRX, funct7::SRA) => (if word32 { "sraw" } else { "sra" }, base_isa(word32)),
        (funct3::SLT, funct7::SLT) if !word32 => ("slt", Isa::Rv32I),
        (funct3::SLTU, funct7::SLTU) if !word32 => ("sltu", Isa::Rv32I),
        (funct3::XOR, funct7::XOR) if !word32 => ("xor", Isa::Rv32I),
        (funct3::OR, funct7::OR) if !word32 => ("or", Isa::Rv32I),
        (funct3::AND, funct7::AND) if !word32 => ("and", Isa::Rv32I),
        (funct3::MUL, funct7::MULDIV) => (if word32 { "mulw" } else { "mul" }, Isa::ExtM),
        (funct3::MULH, funct7::MULDIV) if !word32 => ("mulh", Isa::ExtM),
        (funct3::MULHSU, funct7::MULDIV) if !word32 => ("mulhsu", Isa::ExtM),
        (funct3::MULHU, funct7::MULDIV) if !word32 => ("mulhu", Isa::ExtM),
        (funct3::DIV, funct7::MULDIV) => (if word32 { "divw" } else { "div" }, Isa::ExtM),
        (funct3::DIVU, funct7::MULDIV) => (if word32 { "divuw" } else { "divu" }, Isa::ExtM),
        (funct3::REM, funct7::MULDIV) => (if word32 { "remw" } else { "rem" }, Isa::ExtM),
        (funct3::REMU, funct7::MULDIV) => (if word32 { "remuw" } else { "remu" }, Isa::ExtM),
        (f3, f7) => {
            return Err(CodecError::InvalidFunct {
                opcode: op,
                detail: format!("funct3=0b{f3:03b}, funct7=0b{f7:07b}"),
            })
        }
    };
    check_isa(isa, config)?;
    let rd = rd(word);
    let rs1 = rs1(word);
    let rs2 = rs2(word);
    let operands = vec![rd.render_int(config.abi), rs1.render_int(config.abi), rs2.render_int(config.abi)];
    let specs = vec![
        FieldSpec::new("funct7", 31, 7, mnemonic, false, 0),
        FieldSpec::new("rs2", 24, 5, rs2.render_int(config.abi), false, 1),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), false, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, mnemonic, &operands, Format::R, isa, specs, 6))
}

// ---------------------------------------------------------------- MISC-MEM

fn decode_misc_mem(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    match funct3_of(word) {
        funct3::FENCE => {
            let fm = bit_slice(word, 31, 4);
            if fm != 0 {
                return Err(CodecError::InvalidFunct {
                    opcode: opcode::MISC_MEM,
                    detail: format!("fm=0b{fm:04b}"),
                });
            }
            check_isa(Isa::Rv32I, config)?;
            let pred = FenceMask::new(bit_slice(word, 27, 4) as u8);
            let succ = FenceMask::new(bit_slice(word, 23, 4) as u8);
            if pred.bits() == 0 || succ.bits() == 0 {
                return Err(CodecError::InvalidFence);
            }
            require_zero("rd", rd(word))?;
            require_zero("rs1", rs1(word))?;
            let asm = format!("fence {pred},{succ}");
            let specs = vec![
                FieldSpec::new("fm", 31, 4, "fence", false, 0),
                FieldSpec::new("pred", 27, 4, pred.render(), false, 1),
                FieldSpec::new("succ", 23, 4, succ.render(), false, 1),
                FieldSpec::new("rs1", 19, 5, "0", false, 1),
                FieldSpec::new("funct3", 14, 3, "fence", false, 0),
                FieldSpec::new("rd", 11, 5, "0", false, 1),
                FieldSpec::new("opcode", 6, 7, "fence", false, 0),
            ];
            let (bin_frags, asm_frags) = build_fragments(word, specs);
            Ok(Decoded {
                word,
                asm,
                fmt: Format::I,
                isa: Isa::Rv32I,
                bin_frags,
                asm_frags,
            })
        }
        funct3::FENCE_I => {
            check_isa(Isa::ExtZifencei, config)?;
            require_zero("rd", rd(word))?;
            require_zero("rs1", rs1(word))?;
            let specs = vec![
                FieldSpec::new("i_imm", 31, 12, "fence.i", false, 0),
                FieldSpec::new("rs1", 19, 5, "0", false, 0),
                FieldSpec::new("funct3", 14, 3, "fence.i", false, 0),
                FieldSpec::new("rd", 11, 5, "0", false, 0),
            ];
            Ok(finish(word, "fence.i", &[], Format::I, Isa::ExtZifencei, specs, 6))
        }
        other => Err(CodecError::InvalidFunct {
            opcode: opcode::MISC_MEM,
            detail: format!("funct3=0b{other:03b}"),
        }),
    }
}

// ---------------------------------------------------------------- SYSTEM

fn decode_system(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    use crate::tables::funct12;
    let f3 = funct3_of(word);
    if f3 == funct3::PRIV {
        require_zero("rd", rd(word))?;
        require_zero("rs1", rs1(word))?;
        let f12 = bit_slice(word, 31, 12) as u16;
        let mnemonic = match f12 {
            funct12::ECALL => "ecall",
            funct12::EBREAK => "ebreak",
            other => {
                return Err(CodecError::InvalidFunct {
                    opcode: opcode::SYSTEM,
                    detail: format!("funct12=0x{other:03x}"),
                })
            }
        };
        check_isa(Isa::Rv32I, config)?;
        let specs = vec![
            FieldSpec::new("i_imm", 31, 12, mnemonic, false, 0),
            FieldSpec::new("rs1", 19, 5, "0", false, 0),
            FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
            FieldSpec::new("rd", 11, 5, "0", false, 0),
        ];
        return Ok(finish(word, mnemonic, &[], Format::I, Isa::Rv32I, specs, 6));
    }

    let csr = Csr::new(bit_slice(word, 31, 12) as u16);
    let rd = rd(word);
    match f3 {
        funct3::CSRRW | funct3::CSRRS | funct3::CSRRC => {
            let mnemonic = match f3 {
                funct3::CSRRW => "csrrw",
                funct3::CSRRS => "csrrs",
                _ => "csrrc",
            };
            check_isa(Isa::ExtZicsr, config)?;
            let rs1 = rs1(word);
            let operands = vec![rd.render_int(config.abi), csr.render(), rs1.render_int(config.abi)];
            let specs = vec![
                FieldSpec::new("csr", 31, 12, csr.render(), false, 1),
                FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), false, 2),
                FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
                FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 0),
            ];
            Ok(finish(word, mnemonic, &operands, Format::I, Isa::ExtZicsr, specs, 6))
        }
        funct3::CSRRWI | funct3::CSRRSI | funct3::CSRRCI => {
            let mnemonic = match f3 {
                funct3::CSRRWI => "csrrwi",
                funct3::CSRRSI => "csrrsi",
                _ => "csrrci",
            };
            check_isa(Isa::ExtZicsr, config)?;
            let uimm = bit_slice(word, 19, 5);
            let operands = vec![rd.render_int(config.abi), csr.render(), uimm.to_string()];
            let specs = vec![
                FieldSpec::new("csr", 31, 12, csr.render(), false, 1),
                FieldSpec::new("uimm", 19, 5, uimm.to_string(), false, 2),
                FieldSpec::new("funct3", 14, 3, mnemonic, false, 0),
                FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 0),
            ];
            Ok(finish(word, mnemonic, &operands, Format::I, Isa::ExtZicsr, specs, 6))
        }
        other => Err(CodecError::InvalidFunct {
            opcode: opcode::SYSTEM,
            detail: format!("funct3=0b{other:03b}"),
        }),
    }
}

// ---------------------------------------------------------------- AMO

fn decode_amo(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let f3 = funct3_of(word);
    let width = match f3 {
        funct3::W => "w",
        funct3::D => "d",
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: opcode::AMO,
                detail: format!("funct3=0b{other:03b}"),
            })
        }
    };
    let f5 = bit_slice(word, 31, 5) as u8;
    let base = match f5 {
        amo_funct5::LR => "lr",
        amo_funct5::SC => "sc",
        amo_funct5::SWAP => "amoswap",
        amo_funct5::ADD => "amoadd",
        amo_funct5::XOR => "amoxor",
        amo_funct5::AND => "amoand",
        amo_funct5::OR => "amoor",
        amo_funct5::MIN => "amomin",
        amo_funct5::MAX => "amomax",
        amo_funct5::MINU => "amominu",
        amo_funct5::MAXU => "amomaxu",
        other => {
            return Err(CodecError::InvalidFunct {
                opcode: opcode::AMO,
                detail: format!("funct5=0b{other:05b}"),
            })
        }
    };
    let aq = bit_slice(word, 26, 1) == 1;
    let rl = bit_slice(word, 25, 1) == 1;
    let suffix = match (aq, rl) {
        (true, true) => ".aqrl",
        (true, false) => ".aq",
        (false, true) => ".rl",
        (false, false) => "",
    };
    let mnemonic = format!("{base}.{width}{suffix}");

    let isa = if width == "d" { Isa::Rv64I } else { Isa::ExtA };
    check_isa(isa, config)?;

    let rd = rd(word);
    let rs1 = rs1(word);
    let rs2 = rs2(word);
    let operands = if f5 == amo_funct5::LR {
        require_zero("rs2", rs2)?;
        vec![rd.render_int(config.abi), format!("({})", rs1.render_int(config.abi))]
    } else {
        vec![
            rd.render_int(config.abi),
            rs2.render_int(config.abi),
            format!("({})", rs1.render_int(config.abi)),
        ]
    };
    let specs = vec![
        FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
        FieldSpec::new("aq", 26, 1, mnemonic.clone(), false, 0),
        FieldSpec::new("rl", 25, 1, mnemonic.clone(), false, 0),
        FieldSpec::new("rs2", 24, 5, rs2.render_int(config.abi), false, 1),
        FieldSpec::new("rs1", 19, 5, rs1.render_int(config.abi), true, 1),
        FieldSpec::new("funct3", 14, 3, mnemonic.clone(), false, 0),
        FieldSpec::new("rd", 11, 5, rd.render_int(config.abi), false, 1),
    ];
    Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
}

// ---------------------------------------------------------------- OP-FP

fn fmt_suffix(fmt: u8) -> Result<(&'static str, Isa), CodecError> {
    match fmt {
        fp_fmt::S => Ok(("s", Isa::ExtF)),
        fp_fmt::D => Ok(("d", Isa::ExtD)),
        other => Err(CodecError::InvalidFunct {
            opcode: opcode::OP_FP,
            detail: format!("fmt=0b{other:02b}"),
        }),
    }
}

fn decode_op_fp(word: u32, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let f5 = bit_slice(word, 31, 5) as u8;
    let fmt = bit_slice(word, 26, 2) as u8;
    let f3 = funct3_of(word);
    let rd_i = rd(word);
    let rs1_f = Register::new(bit_slice(word, 19, 5) as u8);
    let rs2_f = Register::new(bit_slice(word, 24, 5) as u8);

    match f5 {
        fp_funct5::FADD | fp_funct5::FSUB | fp_funct5::FMUL | fp_funct5::FDIV => {
            let (suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            let base = match f5 {
                fp_funct5::FADD => "fadd",
                fp_funct5::FSUB => "fsub",
                fp_funct5::FMUL => "fmul",
                _ => "fdiv",
            };
            let mnemonic = format!("{base}.{suffix}");
            let rm = rounding_mode_name(f3).ok_or_else(|| CodecError::InvalidFunct {
                opcode: opcode::OP_FP,
                detail: format!("rm=0b{f3:03b}"),
            })?;
            let operands = vec![
                rd_i.render_float(config.abi),
                rs1_f.render_float(config.abi),
                rs2_f.render_float(config.abi),
                rm.to_string(),
            ];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, rs2_f.render_float(config.abi), false, 2),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("rm", 14, 3, rm, false, 3),
                FieldSpec::new("rd", 11, 5, rd_i.render_float(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FSQRT => {
            let (suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            require_zero("rs2", rs2_f)?;
            let mnemonic = format!("fsqrt.{suffix}");
            let rm = rounding_mode_name(f3).ok_or_else(|| CodecError::InvalidFunct {
                opcode: opcode::OP_FP,
                detail: format!("rm=0b{f3:03b}"),
            })?;
            let operands = vec![rd_i.render_float(config.abi), rs1_f.render_float(config.abi), rm.to_string()];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, "0", false, 0),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("rm", 14, 3, rm, false, 2),
                FieldSpec::new("rd", 11, 5, rd_i.render_float(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FSGNJ => {
            let (suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            let base = match f3 {
                0b000 => "fsgnj",
                0b001 => "fsgnjn",
                0b010 => "fsgnjx",
                other => {
                    return Err(CodecError::InvalidFunct {
                        opcode: opcode::OP_FP,
                        detail: format!("funct3=0b{other:03b}"),
                    })
                }
            };
            let mnemonic = format!("{base}.{suffix}");
            let operands = vec![
                rd_i.render_float(config.abi),
                rs1_f.render_float(config.abi),
                rs2_f.render_float(config.abi),
            ];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, rs2_f.render_float(config.abi), false, 2),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("funct3", 14, 3, mnemonic.clone(), false, 0),
                FieldSpec::new("rd", 11, 5, rd_i.render_float(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FMINMAX => {
            let (suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            let base = match f3 {
                0b000 => "fmin",
                0b001 => "fmax",
                other => {
                    return Err(CodecError::InvalidFunct {
                        opcode: opcode::OP_FP,
                        detail: format!("funct3=0b{other:03b}"),
                    })
                }
            };
            let mnemonic = format!("{base}.{suffix}");
            let operands = vec![
                rd_i.render_float(config.abi),
                rs1_f.render_float(config.abi),
                rs2_f.render_float(config.abi),
            ];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, rs2_f.render_float(config.abi), false, 2),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("funct3", 14, 3, mnemonic.clone(), false, 0),
                FieldSpec::new("rd", 11, 5, rd_i.render_float(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FCVT_FMT_FMT => {
            let (dst_suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            let src_fmt = bit_slice(word, 24, 5) as u8;
            let (src_suffix, src_isa) = match src_fmt {
                0b00001 => ("d", Isa::ExtD),
                0b00000 => ("s", Isa::ExtF),
                other => {
                    return Err(CodecError::InvalidFunct {
                        opcode: opcode::OP_FP,
                        detail: format!("rs2=0b{other:05b}"),
                    })
                }
            };
            check_isa(src_isa, config)?;
            let mnemonic = format!("fcvt.{dst_suffix}.{src_suffix}");
            let rm = rounding_mode_name(f3).ok_or_else(|| CodecError::InvalidFunct {
                opcode: opcode::OP_FP,
                detail: format!("rm=0b{f3:03b}"),
            })?;
            let operands = vec![rd_i.render_float(config.abi), rs1_f.render_float(config.abi), rm.to_string()];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("rm", 14, 3, rm, false, 2),
                FieldSpec::new("rd", 11, 5, rd_i.render_float(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FCMP => {
            let (suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            let base = match f3 {
                0b010 => "feq",
                0b001 => "flt",
                0b000 => "fle",
                other => {
                    return Err(CodecError::InvalidFunct {
                        opcode: opcode::OP_FP,
                        detail: format!("funct3=0b{other:03b}"),
                    })
                }
            };
            let mnemonic = format!("{base}.{suffix}");
            let operands = vec![
                rd_i.render_int(config.abi),
                rs1_f.render_float(config.abi),
                rs2_f.render_float(config.abi),
            ];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, rs2_f.render_float(config.abi), false, 2),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("funct3", 14, 3, mnemonic.clone(), false, 0),
                FieldSpec::new("rd", 11, 5, rd_i.render_int(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FCVT_W_FMT => {
            let (src_suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            let dst = bit_slice(word, 24, 5) as u8;
            let dst_suffix = match dst {
                0b00000 => "w",
                0b00001 => "wu",
                other => {
                    return Err(CodecError::InvalidFunct {
                        opcode: opcode::OP_FP,
                        detail: format!("rs2=0b{other:05b} (L/LU conversions unsupported)"),
                    })
                }
            };
            let mnemonic = format!("fcvt.{dst_suffix}.{src_suffix}");
            let rm = rounding_mode_name(f3).ok_or_else(|| CodecError::InvalidFunct {
                opcode: opcode::OP_FP,
                detail: format!("rm=0b{f3:03b}"),
            })?;
            let operands = vec![rd_i.render_int(config.abi), rs1_f.render_float(config.abi), rm.to_string()];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("rm", 14, 3, rm, false, 2),
                FieldSpec::new("rd", 11, 5, rd_i.render_int(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FCVT_FMT_W => {
            let (dst_suffix, isa) = fmt_suffix(fmt)?;
            check_isa(isa, config)?;
            let src = bit_slice(word, 24, 5) as u8;
            let src_suffix = match src {
                0b00000 => "w",
                0b00001 => "wu",
                other => {
                    return Err(CodecError::InvalidFunct {
                        opcode: opcode::OP_FP,
                        detail: format!("rs2=0b{other:05b} (L/LU conversions unsupported)"),
                    })
                }
            };
            let mnemonic = format!("fcvt.{dst_suffix}.{src_suffix}");
            let rs1_i = Register::new(bit_slice(word, 19, 5) as u8);
            let rm = rounding_mode_name(f3).ok_or_else(|| CodecError::InvalidFunct {
                opcode: opcode::OP_FP,
                detail: format!("rm=0b{f3:03b}"),
            })?;
            let operands = vec![rd_i.render_float(config.abi), rs1_i.render_int(config.abi), rm.to_string()];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("rs1", 19, 5, rs1_i.render_int(config.abi), false, 1),
                FieldSpec::new("rm", 14, 3, rm, false, 2),
                FieldSpec::new("rd", 11, 5, rd_i.render_float(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FCLASS_FMV_X => {
            let (suffix, isa) = fmt_suffix(fmt)?;
            if suffix == "d" {
                check_isa(Isa::Rv64I, config)?;
            } else {
                check_isa(isa, config)?;
            }
            require_zero("rs2", rs2_f)?;
            let mnemonic = match f3 {
                0b000 => format!("fmv.x.{suffix}"),
                0b001 => format!("fclass.{suffix}"),
                other => {
                    return Err(CodecError::InvalidFunct {
                        opcode: opcode::OP_FP,
                        detail: format!("funct3=0b{other:03b}"),
                    })
                }
            };
            let operands = vec![rd_i.render_int(config.abi), rs1_f.render_float(config.abi)];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, "0", false, 0),
                FieldSpec::new("rs1", 19, 5, rs1_f.render_float(config.abi), false, 1),
                FieldSpec::new("funct3", 14, 3, mnemonic.clone(), false, 0),
                FieldSpec::new("rd", 11, 5, rd_i.render_int(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        fp_funct5::FMV_FMT_X => {
            let (suffix, isa) = fmt_suffix(fmt)?;
            if suffix == "d" {
                check_isa(Isa::Rv64I, config)?;
            } else {
                check_isa(isa, config)?;
            }
            require_zero("rs2", rs2_f)?;
            if f3 != 0b000 {
                return Err(CodecError::InvalidFunct {
                    opcode: opcode::OP_FP,
                    detail: format!("funct3=0b{f3:03b}"),
                });
            }
            let mnemonic = format!("fmv.{suffix}.x");
            let rs1_i = Register::new(bit_slice(word, 19, 5) as u8);
            let operands = vec![rd_i.render_float(config.abi), rs1_i.render_int(config.abi)];
            let specs = vec![
                FieldSpec::new("funct5", 31, 5, mnemonic.clone(), false, 0),
                FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
                FieldSpec::new("rs2", 24, 5, "0", false, 0),
                FieldSpec::new("rs1", 19, 5, rs1_i.render_int(config.abi), false, 1),
                FieldSpec::new("funct3", 14, 3, mnemonic.clone(), false, 0),
                FieldSpec::new("rd", 11, 5, rd_i.render_float(config.abi), false, 0),
            ];
            Ok(finish(word, &mnemonic, &operands, Format::R, isa, specs, 6))
        }
        other => Err(CodecError::InvalidFunct {
            opcode: opcode::OP_FP,
            detail: format!("funct5=0b{other:05b}"),
        }),
    }
}

// ---------------------------------------------------------------- fused multiply-add

fn decode_fma(word: u32, op: u8, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let base = match op {
        opcode::MADD => "fmadd",
        opcode::MSUB => "fmsub",
        opcode::NMSUB => "fnmsub",
        _ => "fnmadd",
    };
    let fmt = bit_slice(word, 26, 2) as u8;
    let (suffix, isa) = fmt_suffix(fmt)?;
    check_isa(isa, config)?;
    let mnemonic = format!("{base}.{suffix}");
    let rd = rd(word);
    let rs1 = Register::new(bit_slice(word, 19, 5) as u8);
    let rs2 = rs2(word);
    let rs3 = Register::new(bit_slice(word, 31, 5) as u8);
    let rm = rounding_mode_name(funct3_of(word)).ok_or_else(|| CodecError::InvalidFunct {
        opcode: op,
        detail: format!("rm=0b{:03b}", funct3_of(word)),
    })?;
    let operands = vec![
        rd.render_float(config.abi),
        rs1.render_float(config.abi),
        rs2.render_float(config.abi),
        rs3.render_float(config.abi),
        rm.to_string(),
    ];
    let specs = vec![
        FieldSpec::new("rs3", 31, 5, rs3.render_float(config.abi), false, 3),
        FieldSpec::new("fmt", 26, 2, mnemonic.clone(), false, 0),
        FieldSpec::new("rs2", 24, 5, rs2.render_float(config.abi), false, 2),
        FieldSpec::new("rs1", 19, 5, rs1.render_float(config.abi), false, 1),
        FieldSpec::new("rm", 14, 3, rm, false, 4),
        FieldSpec::new("rd", 11, 5, rd.render_float(config.abi), false, 0),
    ];
    Ok(finish(word, &mnemonic, &operands, Format::R4, isa, specs, 6))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rv32() -> IsaConfig {
        IsaConfig::rv32i()
    }

    #[test]
    fn decodes_addi() {
        // addi x5, x6, -1
        let word = (0xFFF << 20) | (6 << 15) | (0 << 12) | (5 << 7) | u32::from(opcode::OP_IMM);
        let d = decode(word, &rv32()).unwrap();
        assert_eq!(d.asm, "addi x5, x6, -1");
        assert_eq!(d.fmt, Format::I);
    }

    #[test]
    fn decodes_add_register() {
        let word = (0 << 25) | (7 << 20) | (6 << 15) | (0 << 12) | (5 << 7) | u32::from(opcode::OP);
        let d = decode(word, &rv32()).unwrap();
        assert_eq!(d.asm, "add x5, x6, x7");
    }

    #[test]
    fn rejects_invalid_opcode() {
        assert!(matches!(decode(0, &rv32()), Err(CodecError::InvalidOpcode(0))));
    }

    #[test]
    fn rejects_unknown_branch_funct3() {
        let word = (0b010 << 12) | u32::from(opcode::BRANCH);
        assert!(matches!(
            decode(word, &rv32()),
            Err(CodecError::InvalidFunct { opcode: op, .. }) if op == opcode::BRANCH
        ));
    }

    #[test]
    fn six_bit_shift_requires_rv64() {
        // srli x5, x6, 32 (shamt[5] set) under RV32I config
        let word = (1 << 25) | (6 << 15) | (u32::from(funct3::SRXI) << 12) | (5 << 7) | u32::from(opcode::OP_IMM);
        assert!(matches!(decode(word, &rv32()), Err(CodecError::ShiftOutOfRange { .. })));
        let d = decode(word, &IsaConfig::rv64i()).unwrap();
        assert_eq!(d.asm, "srli x5, x6, 32");
    }

    #[test]
    fn ecall_requires_zero_rd_rs1() {
        let bad = (1 << 7) | u32::from(opcode::SYSTEM);
        assert!(matches!(decode(bad, &rv32()), Err(CodecError::NonZeroReserved { .. })));
        let good = u32::from(opcode::SYSTEM);
        assert_eq!(decode(good, &rv32()).unwrap().asm, "ecall");
    }

    #[test]
    fn fence_rejects_empty_mask() {
        let word = u32::from(opcode::MISC_MEM); // pred=succ=0
        assert!(matches!(decode(word, &rv32()), Err(CodecError::InvalidFence)));
    }
}
