//! Assembly -> instruction word encoding.
//!
//! Parses a line of assembly down to a raw 32-bit word, then hands off to
//! [`decode::decode`](crate::decode::decode) to build the final rendered
//! assembly, format/ISA tags and fragment breakdown from that word. This
//! keeps the bit-layout knowledge (which field goes where, what the
//! fragment breakdown looks like) in one place instead of duplicating it in
//! both directions.

use crate::bits::{emit_imm, parse_int_literal, set_bits};
use crate::config::IsaConfig;
use crate::csr::Csr;
use crate::decode::{self, Decoded};
use crate::error::CodecError;
use crate::fence::FenceMask;
use crate::registers::Register;
use crate::tables::{amo_funct5, fp_fmt, fp_funct5, funct3, funct7, opcode, rounding_mode_bits, shtyp};

/// Parses and encodes one line of assembly under `config`.
pub(crate) fn encode(text: &str, config: &IsaConfig) -> Result<Decoded, CodecError> {
    let (raw_mnemonic, raw_operands) = tokenize(text);
    let (mnemonic, operands) = expand_alias(&raw_mnemonic, raw_operands)?;
    let word = build_word(&mnemonic, &operands, config)?;
    decode::decode(word, config)
}

fn tokenize(text: &str) -> (String, Vec<String>) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(pos) => {
            let (mnemonic, rest) = text.split_at(pos);
            (mnemonic.to_ascii_lowercase(), split_operands(rest.trim()))
        }
        None => (text.to_ascii_lowercase(), Vec::new()),
    }
}

fn split_operands(rest: &str) -> Vec<String> {
    if rest.is_empty() {
        return Vec::new();
    }
    rest.split(',').map(|s| s.trim().to_string()).collect()
}

fn expand_alias(mnemonic: &str, operands: Vec<String>) -> Result<(String, Vec<String>), CodecError> {
    let need = |n: usize| -> Result<(), CodecError> {
        if operands.len() != n {
            Err(CodecError::OperandSyntax {
                mnemonic: mnemonic.to_string(),
                detail: format!("expected {n} operand(s), got {}", operands.len()),
            })
        } else {
            Ok(())
        }
    };
    match mnemonic {
        "nop" => {
            need(0)?;
            Ok(("addi".to_string(), vec!["x0".to_string(), "x0".to_string(), "0".to_string()]))
        }
        "ret" => {
            need(0)?;
            Ok(("jalr".to_string(), vec!["x0".to_string(), "0(x1)".to_string()]))
        }
        "j" => {
            need(1)?;
            Ok(("jal".to_string(), vec!["x0".to_string(), operands[0].clone()]))
        }
        "jr" => {
            need(1)?;
            Ok(("jalr".to_string(), vec!["x0".to_string(), format!("0({})", operands[0])]))
        }
        "mv" => {
            need(2)?;
            Ok(("addi".to_string(), vec![operands[0].clone(), operands[1].clone(), "0".to_string()]))
        }
        "not" => {
            need(2)?;
            Ok(("xori".to_string(), vec![operands[0].clone(), operands[1].clone(), "-1".to_string()]))
        }
        "neg" => {
            need(2)?;
            Ok(("sub".to_string(), vec![operands[0].clone(), "x0".to_string(), operands[1].clone()]))
        }
        _ => Ok((mnemonic.to_string(), operands)),
    }
}

fn want(mnemonic: &str, operands: &[String], n: usize) -> Result<(), CodecError> {
    if operands.len() != n {
        return Err(CodecError::OperandSyntax {
            mnemonic: mnemonic.to_string(),
            detail: format!("expected {n} operand(s), got {}", operands.len()),
        });
    }
    Ok(())
}

fn want_range(mnemonic: &str, operands: &[String], min: usize, max: usize) -> Result<(), CodecError> {
    if operands.len() < min || operands.len() > max {
        return Err(CodecError::OperandSyntax {
            mnemonic: mnemonic.to_string(),
            detail: format!("expected {min}-{max} operand(s), got {}", operands.len()),
        });
    }
    Ok(())
}

fn parse_imm(mnemonic: &str, text: &str) -> Result<i64, CodecError> {
    parse_int_literal(text).ok_or_else(|| CodecError::OperandSyntax {
        mnemonic: mnemonic.to_string(),
        detail: format!("'{text}' is not an integer literal"),
    })
}

/// Splits `off(base)` memory syntax into its immediate and base register
/// text.
fn split_mem(mnemonic: &str, text: &str) -> Result<(&str, &str), CodecError> {
    let open = text.find('(').ok_or_else(|| CodecError::OperandSyntax {
        mnemonic: mnemonic.to_string(),
        detail: format!("'{text}' is not `offset(register)` syntax"),
    })?;
    let close = text.strip_suffix(')').ok_or_else(|| CodecError::OperandSyntax {
        mnemonic: mnemonic.to_string(),
        detail: format!("'{text}' is not `offset(register)` syntax"),
    })?;
    Ok((&text[..open], &close[open + 1..]))
}

fn parse_mem(mnemonic: &str, text: &str) -> Result<(i64, Register), CodecError> {
    let (imm_text, reg_text) = split_mem(mnemonic, text)?;
    let imm = if imm_text.is_empty() { 0 } else { parse_imm(mnemonic, imm_text)? };
    let reg = Register::parse_int(reg_text)?;
    Ok((imm, reg))
}

fn parse_rm(mnemonic: &str, operands: &[String], index: usize) -> Result<u8, CodecError> {
    match operands.get(index) {
        Some(text) => rounding_mode_bits(text).ok_or_else(|| CodecError::OperandSyntax {
            mnemonic: mnemonic.to_string(),
            detail: format!("'{text}' is not a rounding mode"),
        }),
        None => Ok(0b000), // rne, the architectural default
    }
}

fn base_word(opcode: u8, funct3: u8, rd: u8, rs1: u8) -> u32 {
    let w = set_bits(0, 6, 7, u32::from(opcode));
    let w = set_bits(w, 14, 3, u32::from(funct3));
    let w = set_bits(w, 11, 5, u32::from(rd));
    set_bits(w, 19, 5, u32::from(rs1))
}

fn build_word(mnemonic: &str, operands: &[String], config: &IsaConfig) -> Result<u32, CodecError> {
    match mnemonic {
        // ---------------------------------------------------- R-type, base + M
        "add" | "sub" | "sll" | "slt" | "sltu" | "xor" | "srl" | "sra" | "or" | "and" | "mul" | "mulh"
        | "mulhsu" | "mulhu" | "div" | "divu" | "rem" | "remu" | "addw" | "subw" | "sllw" | "srlw" | "sraw"
        | "mulw" | "divw" | "divuw" | "remw" | "remuw" => build_r_type(mnemonic, operands),

        // ---------------------------------------------------- I-type arithmetic
        "addi" | "slti" | "sltiu" | "xori" | "ori" | "andi" | "addiw" => build_i_arith(mnemonic, operands),

        "slli" | "srli" | "srai" | "slliw" | "srliw" | "sraiw" => build_shift(mnemonic, operands, config),

        "jalr" => build_jalr(operands),
        "jal" => build_jal(operands),
        "lui" => build_upper(opcode::LUI, operands),
        "auipc" => build_upper(opcode::AUIPC, operands),

        "beq" | "bne" | "blt" | "bge" | "bltu" | "bgeu" => build_branch(mnemonic, operands),

        "lb" | "lh" | "lw" | "ld" | "lbu" | "lhu" | "lwu" => build_load(mnemonic, operands, false),
        "flw" | "fld" => build_load(mnemonic, operands, true),
        "sb" | "sh" | "sw" | "sd" => build_store(mnemonic, operands, false),
        "fsw" | "fsd" => build_store(mnemonic, operands, true),

        "fence" => build_fence(operands),
        "fence.i" => {
            want("fence.i", operands, 0)?;
            Ok(base_word(opcode::MISC_MEM, funct3::FENCE_I, 0, 0))
        }
        "ecall" => {
            want("ecall", operands, 0)?;
            Ok(base_word(opcode::SYSTEM, funct3::PRIV, 0, 0))
        }
        "ebreak" => {
            want("ebreak", operands, 0)?;
            Ok(set_bits(base_word(opcode::SYSTEM, funct3::PRIV, 0, 0), 31, 12, 0x001))
        }

        "csrrw" | "csrrs" | "csrrc" => build_csr_reg(mnemonic, operands),
        "csrrwi" | "csrrsi" | "csrrci" => build_csr_imm(mnemonic, operands),

        m if is_amo(m) => build_amo(m, operands),

        m if m.starts_with("fmadd.") || m.starts_with("fmsub.") || m.starts_with("fnmsub.") || m.starts_with("fnmadd.") => {
            build_fma(m, operands)
        }

        m => build_op_fp(m, operands).ok_or_else(|| CodecError::UnknownMnemonic(mnemonic.to_string()))?,
    }
}

fn fmt_of(mnemonic: &str, suffix: &str) -> Result<u8, CodecError> {
    match suffix {
        "s" => Ok(fp_fmt::S),
        "d" => Ok(fp_fmt::D),
        other => Err(CodecError::OperandSyntax {
            mnemonic: mnemonic.to_string(),
            detail: format!("unknown floating-point format suffix '{other}'"),
        }),
    }
}

fn build_r_type(mnemonic: &str, operands: &[String]) -> Result<u32, CodecError> {
    want(mnemonic, operands, 3)?;
    let rd = Register::parse_int(&operands[0])?;
    let rs1 = Register::parse_int(&operands[1])?;
    let rs2 = Register::parse_int(&operands[2])?;
    let (f3, f7): (u8, u8) = match mnemonic {
        "add" | "addw" => (funct3::ADD_SUB, funct7::ADD),
        "sub" | "subw" => (funct3::ADD_SUB, funct7::SUB),
        "sll" | "sllw" => (funct3::SLL, funct7::SLL),
        "slt" => (funct3::SLT, funct7::SLT),
        "sltu" => (funct3::SLTU, funct7::SLTU),
        "xor" => (funct3::XOR, funct7::XOR),
        "srl" | "srlw" => (funct3::SRX, funct7::SRL),
        "sra" | "sraw" => (funct3::SRX, funct7::SRA),
        "or" => (funct3::OR, funct7::OR),
        "and" => (funct3::AND, funct7::AND),
        "mul" | "mulw" => (funct3::MUL, funct7::MULDIV),
        "mulh" => (funct3::MULH, funct7::MULDIV),
        "mulhsu" => (funct3::MULHSU, funct7::MULDIV),
        "mulhu" => (funct3::MULHU, funct7::MULDIV),
        "div" | "divw" => (funct3::DIV, funct7::MULDIV),
        "divu" | "divuw" => (funct3::DIVU, funct7::MULDIV),
        "rem" | "remw" => (funct3::REM, funct7::MULDIV),
        "remu" | "remuw" => (funct3::REMU, funct7::MULDIV),
        _ => return Err(CodecError::InternalError("unreachable R-type mnemonic")),
    };
    let op = if mnemonic.ends_with('w') { opcode::OP_32 } else { opcode::OP };
    let w = base_word(op, f3, rd.index(), rs1.index());
    let w = set_bits(w, 24, 5, u32::from(rs2.index()));
    Ok(set_bits(w, 31, 7, u32::from(f7)))
}

fn build_i_arith(mnemonic: &str, operands: &[String]) -> Result<u32, CodecError> {
    want(mnemonic, operands, 3)?;
    let rd = Register::parse_int(&operands[0])?;
    let rs1 = Register::parse_int(&operands[1])?;
    let imm = parse_imm(mnemonic, &operands[2])?;
    let bits = emit_imm(imm, 12, true)?;
    let f3 = match mnemonic {
        "addi" | "addiw" => funct3::ADDI,
        "slti" => funct3::SLTI,
        "sltiu" => funct3::SLTIU,
        "xori" => funct3::XORI,
        "ori" => funct3::ORI,
        "andi" => funct3::ANDI,
        _ => return Err(CodecError::InternalError("unreachable I-arith mnemonic")),
    };
    let op = if mnemonic == "addiw" { opcode::OP_IMM_32 } else { opcode::OP_IMM };
    let w = base_word(op, f3, rd.index(), rs1.index());
    Ok(set_bits(w, 31, 12, bits))
}

fn build_shift(mnemonic: &str, operands: &[String], config: &IsaConfig) -> Result<u32, CodecError> {
    want(mnemonic, operands, 3)?;
    let rd = Register::parse_int(&operands[0])?;
    let rs1 = Register::parse_int(&operands[1])?;
    let shamt = parse_imm(mnemonic, &operands[2])?;
    let word32 = mnemonic.ends_with('w');
    let op = if word32 { opcode::OP_IMM_32 } else { opcode::OP_IMM };
    let f3 = if mnemonic.starts_with("slli") { funct3::SLLI } else { funct3::SRXI };
    let arithmetic = mnemonic.starts_with("srai");

    let max_shamt: i64 = if word32 {
        31
    } else if matches!(config.isa, crate::config::IsaWidth::Rv64i) {
        63
    } else {
        31
    };
    if !(0..=max_shamt).contains(&shamt) {
        return Err(CodecError::ShiftOutOfRange {
            shamt: shamt.max(0) as u32,
            isa: if word32 || max_shamt == 63 { "RV64I" } else { "RV32I" },
        });
    }

    let funct_bits: u8 = if arithmetic { shtyp::ARITHMETIC } else { shtyp::LOGICAL };
    let w = base_word(op, f3, rd.index(), rs1.index());
    if !word32 && shamt > 31 {
        let w = set_bits(w, 31, 6, u32::from(funct_bits >> 1));
        Ok(set_bits(w, 25, 6, shamt as u32))
    } else {
        let w = set_bits(w, 31, 7, u32::from(funct_bits));
        Ok(set_bits(w, 24, 5, shamt as u32))
    }
}

fn build_jalr(operands: &[String]) -> Result<u32, CodecError> {
    want("jalr", operands, 2)?;
    let rd = Register::parse_int(&operands[0])?;
    let (imm, rs1) = parse_mem("jalr", &operands[1])?;
    let bits = emit_imm(imm, 12, true)?;
    let w = base_word(opcode::JALR, funct3::JALR, rd.index(), rs1.index());
    Ok(set_bits(w, 31, 12, bits))
}

fn build_jal(operands: &[String]) -> Result<u32, CodecError> {
    want("jal", operands, 2)?;
    let rd = Register::parse_int(&operands[0])?;
    let imm = parse_imm("jal", &operands[1])?;
    if imm % 2 != 0 {
        return Err(CodecError::OperandSyntax {
            mnemonic: "jal".to_string(),
            detail: "target offset must be even".to_string(),
        });
    }
    let bits = emit_imm(imm, 21, true)? >> 1;
    let w = set_bits(0, 6, 7, u32::from(opcode::JAL));
    let w = set_bits(w, 11, 5, u32::from(rd.index()));
    let w = set_bits(w, 30, 10, bits & 0x3FF);
    let w = set_bits(w, 20, 1, (bits >> 10) & 1);
    let w = set_bits(w, 19, 8, (bits >> 11) & 0xFF);
    Ok(set_bits(w, 31, 1, (bits >> 19) & 1))
}

fn build_upper(op: u8, operands: &[String]) -> Result<u32, CodecError> {
    let mnemonic = if op == opcode::LUI { "lui" } else { "auipc" };
    want(mnemonic, operands, 2)?;
    let rd = Register::parse_int(&operands[0])?;
    let imm = parse_imm(mnemonic, &operands[1])?;
    if imm & 0xFFF != 0 {
        return Err(CodecError::OperandSyntax {
            mnemonic: mnemonic.to_string(),
            detail: "upper immediate must have its low 12 bits clear".to_string(),
        });
    }
    if !(i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&imm) {
        return Err(CodecError::ImmediateOutOfRange {
            value: imm,
            width: 32,
            signedness: "signed",
        });
    }
    let top20 = ((imm >> 12) & 0xFFFFF) as u32;
    let w = set_bits(0, 6, 7, u32::from(op));
    let w = set_bits(w, 11, 5, u32::from(rd.index()));
    Ok(set_bits(w, 31, 20, top20))
}

fn build_branch(mnemonic: &str, operands: &[String]) -> Result<u32, CodecError> {
    want(mnemonic, operands, 3)?;
    let rs1 = Register::parse_int(&operands[0])?;
    let rs2 = Register::parse_int(&operands[1])?;
    let imm = parse_imm(mnemonic, &operands[2])?;
    if imm % 2 != 0 {
        return Err(CodecError::OperandSyntax {
            mnemonic: mnemonic.to_string(),
            detail: "branch offset must be even".to_string(),
        });
    }
    let bits = emit_imm(imm, 13, true)? >> 1;
    let f3 = match mnemonic {
        "beq" => funct3::BEQ,
        "bne" => funct3::BNE,
        "blt" => funct3::BLT,
        "bge" => funct3::BGE,
        "bltu" => funct3::BLTU,
        "bgeu" => funct3::BGEU,
        _ => return Err(CodecError::InternalError("unreachable branch mnemonic")),
    };
    let w = base_word(opcode::BRANCH, f3, 0, rs1.index());
    let w = set_bits(w, 24, 5, u32::from(rs2.index()));
    let w = set_bits(w, 11, 4, bits & 0xF);
    let w = set_bits(w, 7, 1, (bits >> 10) & 1);
    let w = set_bits(w, 30, 6, (bits >> 4) & 0x3F);
    Ok(set_bits(w, 31, 1, (bits >> 11) & 1))
}

fn build_load(mnemonic: &str, operands: &[String], float: bool) -> Result<u32, CodecError> {
    want(mnemonic, operands, 2)?;
    let rd = if float {
        Register::parse_float(&operands[0])?
    } else {
        Register::parse_int(&operands[0])?
    };
    let (imm, rs1) = parse_mem(mnemonic, &operands[1])?;
    let bits = emit_imm(imm, 12, true)?;
    let (op, f3) = match mnemonic {
        "lb" => (opcode::LOAD, funct3::B_OR_BU_NARROW),
        "lh" => (opcode::LOAD, funct3::H),
        "lw" => (opcode::LOAD, funct3::W),
        "ld" => (opcode::LOAD, funct3::D),
        "lbu" => (opcode::LOAD, funct3::BU),
        "lhu" => (opcode::LOAD, funct3::HU),
        "lwu" => (opcode::LOAD, funct3::WU),
        "flw" => (opcode::LOAD_FP, funct3::W),
        "fld" => (opcode::LOAD_FP, funct3::D),
        _ => return Err(CodecError::InternalError("unreachable load mnemonic")),
    };
    let w = base_word(op, f3, rd.index(), rs1.index());
    Ok(set_bits(w, 31, 12, bits))
}

fn build_store(mnemonic: &str, operands: &[String], float: bool) -> Result<u32, CodecError> {
    want(mnemonic, operands, 2)?;
    let rs2 = if float {
        Register::parse_float(&operands[0])?
    } else {
        Register::parse_int(&operands[0])?
    };
    let (imm, rs1) = parse_mem(mnemonic, &operands[1])?;
    let bits = emit_imm(imm, 12, true)?;
    let (op, f3) = match mnemonic {
        "sb" => (opcode::STORE, funct3::B_OR_BU_NARROW),
        "sh" => (opcode::STORE, funct3::H),
        "sw" => (opcode::STORE, funct3::W),
        "sd" => (opcode::STORE, funct3::D),
        "fsw" => (opcode::STORE_FP, funct3::W),
        "fsd" => (opcode::STORE_FP, funct3::D),
        _ => return Err(CodecError::InternalError("unreachable store mnemonic")),
    };
    let w = set_bits(0, 6, 7, u32::from(op));
    let w = set_bits(w, 14, 3, u32::from(f3));
    let w = set_bits(w, 19, 5, u32::from(rs1.index()));
    let w = set_bits(w, 24, 5, u32::from(rs2.index()));
    let w = set_bits(w, 11, 5, bits & 0x1F);
    Ok(set_bits(w, 31, 7, (bits >> 5) & 0x7F))
}

fn build_fence(operands: &[String]) -> Result<u32, CodecError> {
    want("fence", operands, 2)?;
    let pred = FenceMask::parse(&operands[0])?;
    let succ = FenceMask::parse(&operands[1])?;
    let w = set_bits(0, 6, 7, u32::from(opcode::MISC_MEM));
    let w = set_bits(w, 27, 4, u32::from(pred.bits()));
    Ok(set_bits(w, 23, 4, u32::from(succ.bits())))
}

fn build_csr_reg(mnemonic: &str, operands: &[String]) -> Result<u32, CodecError> {
    want(mnemonic, operands, 3)?;
    let rd = Register::parse_int(&operands[0])?;
    let csr = Csr::parse(&operands[1])?;
    let rs1 = Register::parse_int(&operands[2])?;
    let f3 = match mnemonic {
        "csrrw" => funct3::CSRRW,
        "csrrs" => funct3::CSRRS,
        _ => funct3::CSRRC,
    };
    let w = base_word(opcode::SYSTEM, f3, rd.index(), rs1.index());
    Ok(set_bits(w, 31, 12, u32::from(csr.address())))
}

fn build_csr_imm(mnemonic: &str, operands: &[String]) -> Result<u32, CodecError> {
    want(mnemonic, operands, 3)?;
    let rd = Register::parse_int(&operands[0])?;
    let csr = Csr::parse(&operands[1])?;
    let uimm = parse_imm(mnemonic, &operands[2])?;
    let uimm_bits = emit_imm(uimm, 5, false)?;
    let f3 = match mnemonic {
        "csrrwi" => funct3::CSRRWI,
        "csrrsi" => funct3::CSRRSI,
        _ => funct3::CSRRCI,
    };
    let w = set_bits(0, 6, 7, u32::from(opcode::SYSTEM));
    let w = set_bits(w, 14, 3, u32::from(f3));
    let w = set_bits(w, 11, 5, u32::from(rd.index()));
    let w = set_bits(w, 19, 5, uimm_bits);
    Ok(set_bits(w, 31, 12, u32::from(csr.address())))
}

const AMO_BASES: &[(&str, u8)] = &[
    ("lr", amo_funct5::LR),
    ("sc", amo_funct5::SC),
    ("amoswap", amo_funct5::SWAP),
    ("amoadd", amo_funct5::ADD),
    ("amoxor", amo_funct5::XOR),
    ("amoand", amo_funct5::AND),
    ("amoor", amo_funct5::OR),
    ("amomin", amo_funct5::MIN),
    ("amomax", amo_funct5::MAX),
    ("amominu", amo_funct5::MINU),
    ("amomaxu", amo_funct5::MAXU),
];

fn is_amo(mnemonic: &str) -> bool {
    let base = mnemonic.split('.').next().unwrap_or("");
    AMO_BASES.iter().any(|(name, _)| *name == base)
}

fn build_amo(mnemonic: &str, operands: &[String]) -> Result<u32, CodecError> {
    let parts: Vec<&str> = mnemonic.split('.').collect();
    if parts.len() < 2 {
        return Err(CodecError::UnknownMnemonic(mnemonic.to_string()));
    }
    let base = parts[0];
    let width = parts[1];
    let suffix = parts.get(2).copied().unwrap_or("");
    let f5 = AMO_BASES
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, f)| *f)
        .ok_or_else(|| CodecError::UnknownMnemonic(mnemonic.to_string()))?;
    let f3 = match width {
        "w" => funct3::W,
        "d" => funct3::D,
        other => {
            return Err(CodecError::OperandSyntax {
                mnemonic: mnemonic.to_string(),
                detail: format!("unknown AMO width '{other}'"),
            })
        }
    };
    let (aq, rl) = match suffix {
        "" => (0, 0),
        "aq" => (1, 0),
        "rl" => (0, 1),
        "aqrl" => (1, 1),
        other => {
            return Err(CodecError::OperandSyntax {
                mnemonic: mnemonic.to_string(),
                detail: format!("unknown AMO ordering suffix '{other}'"),
            })
        }
    };

    let (rd_text, rs2_text, mem_text) = if f5 == amo_funct5::LR {
        want(mnemonic, operands, 2)?;
        (&operands[0], None, &operands[1])
    } else {
        want(mnemonic, operands, 3)?;
        (&operands[0], Some(&operands[1]), &operands[2])
    };
    let rd = Register::parse_int(rd_text)?;
    let rs2 = match rs2_text {
        Some(t) => Register::parse_int(t)?,
        None => Register::new(0),
    };
    let (off, rs1) = parse_mem(mnemonic, mem_text)?;
    if off != 0 {
        return Err(CodecError::OperandSyntax {
            mnemonic: mnemonic.to_string(),
            detail: "atomic memory operand takes no offset".to_string(),
        });
    }

    let w = base_word(opcode::AMO, f3, rd.index(), rs1.index());
    let w = set_bits(w, 24, 5, u32::from(rs2.index()));
    let w = set_bits(w, 26, 1, aq);
    let w = set_bits(w, 25, 1, rl);
    Ok(set_bits(w, 31, 5, u32::from(f5)))
}

fn build_fma(mnemonic: &str, operands: &[String]) -> Result<u32, CodecError> {
    let parts: Vec<&str> = mnemonic.splitn(2, '.').collect();
    let base = parts[0];
    let suffix = parts.get(1).copied().unwrap_or("");
    let fmt = fmt_of(mnemonic, suffix)?;
    want_range(mnemonic, operands, 4, 5)?;
    let rd = Register::parse_float(&operands[0])?;
    let rs1 = Register::parse_float(&operands[1])?;
    let rs2 = Register::parse_float(&operands[2])?;
    let rs3 = Register::parse_float(&operands[3])?;
    let rm = parse_rm(mnemonic, operands, 4)?;
    let op = match base {
        "fmadd" => opcode::MADD,
        "fmsub" => opcode::MSUB,
        "fnmsub" => opcode::NMSUB,
        _ => opcode::NMADD,
    };
    let w = set_bits(0, 6, 7, u32::from(op));
    let w = set_bits(w, 26, 2, u32::from(fmt));
    let w = set_bits(w, 19, 5, u32::from(rs1.index()));
    let w = set_bits(w, 24, 5, u32::from(rs2.index()));
    let w = set_bits(w, 31, 5, u32::from(rs3.index()));
    let w = set_bits(w, 14, 3, u32::from(rm));
    Ok(set_bits(w, 11, 5, u32::from(rd.index())))
}

fn op_fp_base(fmt: u8, funct5: u8, rd: u8, rs1: u8, rs2: u8, funct3: u8) -> u32 {
    let w = set_bits(0, 6, 7, u32::from(opcode::OP_FP));
    let w = set_bits(w, 31, 5, u32::from(funct5));
    let w = set_bits(w, 26, 2, u32::from(fmt));
    let w = set_bits(w, 24, 5, u32::from(rs2));
    let w = set_bits(w, 19, 5, u32::from(rs1));
    let w = set_bits(w, 14, 3, u32::from(funct3));
    set_bits(w, 11, 5, u32::from(rd))
}

fn build_op_fp(mnemonic: &str, operands: &[String]) -> Option<Result<u32, CodecError>> {
    let parts: Vec<&str> = mnemonic.split('.').collect();
    let base = parts.first().copied().unwrap_or("");
    let result = match base {
        "fadd" | "fsub" | "fmul" | "fdiv" => {
            let suffix = parts.get(1).copied().unwrap_or("");
            let f5 = match base {
                "fadd" => fp_funct5::FADD,
                "fsub" => fp_funct5::FSUB,
                "fmul" => fp_funct5::FMUL,
                _ => fp_funct5::FDIV,
            };
            (|| {
                let fmt = fmt_of(mnemonic, suffix)?;
                want_range(mnemonic, operands, 3, 4)?;
                let rd = Register::parse_float(&operands[0])?;
                let rs1 = Register::parse_float(&operands[1])?;
                let rs2 = Register::parse_float(&operands[2])?;
                let rm = parse_rm(mnemonic, operands, 3)?;
                Ok(op_fp_base(fmt, f5, rd.index(), rs1.index(), rs2.index(), rm))
            })()
        }
        "fsqrt" => {
            let suffix = parts.get(1).copied().unwrap_or("");
            (|| {
                let fmt = fmt_of(mnemonic, suffix)?;
                want_range(mnemonic, operands, 2, 3)?;
                let rd = Register::parse_float(&operands[0])?;
                let rs1 = Register::parse_float(&operands[1])?;
                let rm = parse_rm(mnemonic, operands, 2)?;
                Ok(op_fp_base(fmt, fp_funct5::FSQRT, rd.index(), rs1.index(), 0, rm))
            })()
        }
        "fsgnj" | "fsgnjn" | "fsgnjx" => {
            let suffix = parts.get(1).copied().unwrap_or("");
            let f3 = match base {
                "fsgnj" => 0b000,
                "fsgnjn" => 0b001,
                _ => 0b010,
            };
            (|| {
                let fmt = fmt_of(mnemonic, suffix)?;
                want(mnemonic, operands, 3)?;
                let rd = Register::parse_float(&operands[0])?;
                let rs1 = Register::parse_float(&operands[1])?;
                let rs2 = Register::parse_float(&operands[2])?;
                Ok(op_fp_base(fmt, fp_funct5::FSGNJ, rd.index(), rs1.index(), rs2.index(), f3))
            })()
        }
        "fmin" | "fmax" => {
            let suffix = parts.get(1).copied().unwrap_or("");
            let f3 = u8::from(base == "fmax");
            (|| {
                let fmt = fmt_of(mnemonic, suffix)?;
                want(mnemonic, operands, 3)?;
                let rd = Register::parse_float(&operands[0])?;
                let rs1 = Register::parse_float(&operands[1])?;
                let rs2 = Register::parse_float(&operands[2])?;
                Ok(op_fp_base(fmt, fp_funct5::FMINMAX, rd.index(), rs1.index(), rs2.index(), f3))
            })()
        }
        "fcvt" => build_fcvt(mnemonic, &parts, operands),
        "feq" | "flt" | "fle" => {
            let suffix = parts.get(1).copied().unwrap_or("");
            let f3 = match base {
                "fle" => 0b000,
                "flt" => 0b001,
                _ => 0b010,
            };
            (|| {
                let fmt = fmt_of(mnemonic, suffix)?;
                want(mnemonic, operands, 3)?;
                let rd = Register::parse_int(&operands[0])?;
                let rs1 = Register::parse_float(&operands[1])?;
                let rs2 = Register::parse_float(&operands[2])?;
                Ok(op_fp_base(fmt, fp_funct5::FCMP, rd.index(), rs1.index(), rs2.index(), f3))
            })()
        }
        "fmv" => build_fmv(mnemonic, &parts, operands),
        "fclass" => {
            let suffix = parts.get(1).copied().unwrap_or("");
            (|| {
                let fmt = fmt_of(mnemonic, suffix)?;
                want(mnemonic, operands, 2)?;
                let rd = Register::parse_int(&operands[0])?;
                let rs1 = Register::parse_float(&operands[1])?;
                Ok(op_fp_base(fmt, fp_funct5::FCLASS_FMV_X, rd.index(), rs1.index(), 0, 0b001))
            })()
        }
        _ => return None,
    };
    Some(result)
}

fn build_fcvt(mnemonic: &str, parts: &[&str], operands: &[String]) -> Result<u32, CodecError> {
    if parts.len() != 3 {
        return Err(CodecError::UnknownMnemonic(mnemonic.to_string()));
    }
    let (dst, src) = (parts[1], parts[2]);
    match (dst, src) {
        ("s", "d") | ("d", "s") => {
            let fmt = fmt_of(mnemonic, dst)?;
            let src_code: u8 = if src == "d" { 0b00001 } else { 0b00000 };
            want_range(mnemonic, operands, 2, 3)?;
            let rd = Register::parse_float(&operands[0])?;
            let rs1 = Register::parse_float(&operands[1])?;
            let rm = parse_rm(mnemonic, operands, 2)?;
            Ok(op_fp_base(fmt, fp_funct5::FCVT_FMT_FMT, rd.index(), rs1.index(), src_code, rm))
        }
        ("w" | "wu", "s" | "d") => {
            let fmt = fmt_of(mnemonic, src)?;
            let rs2 = if dst == "w" { 0b00000 } else { 0b00001 };
            want_range(mnemonic, operands, 2, 3)?;
            let rd = Register::parse_int(&operands[0])?;
            let rs1 = Register::parse_float(&operands[1])?;
            let rm = parse_rm(mnemonic, operands, 2)?;
            Ok(op_fp_base(fmt, fp_funct5::FCVT_W_FMT, rd.index(), rs1.index(), rs2, rm))
        }
        ("s" | "d", "w" | "wu") => {
            let fmt = fmt_of(mnemonic, dst)?;
            let rs2 = if src == "w" { 0b00000 } else { 0b00001 };
            want_range(mnemonic, operands, 2, 3)?;
            let rd = Register::parse_float(&operands[0])?;
            let rs1 = Register::parse_int(&operands[1])?;
            let rm = parse_rm(mnemonic, operands, 2)?;
            Ok(op_fp_base(fmt, fp_funct5::FCVT_FMT_W, rd.index(), rs1.index(), rs2, rm))
        }
        _ => Err(CodecError::UnknownMnemonic(mnemonic.to_string())),
    }
}

fn build_fmv(mnemonic: &str, parts: &[&str], operands: &[String]) -> Result<u32, CodecError> {
    if parts.len() != 3 {
        return Err(CodecError::UnknownMnemonic(mnemonic.to_string()));
    }
    let (a, b) = (parts[1], parts[2]);
    match (a, b) {
        ("x", "w") | ("x", "d") => {
            let fmt = fmt_of(mnemonic, b)?;
            want(mnemonic, operands, 2)?;
            let rd = Register::parse_int(&operands[0])?;
            let rs1 = Register::parse_float(&operands[1])?;
            Ok(op_fp_base(fmt, fp_funct5::FCLASS_FMV_X, rd.index(), rs1.index(), 0, 0b000))
        }
        ("w", "x") | ("d", "x") => {
            let fmt = fmt_of(mnemonic, a)?;
            want(mnemonic, operands, 2)?;
            let rd = Register::parse_float(&operands[0])?;
            let rs1 = Register::parse_int(&operands[1])?;
            Ok(op_fp_base(fmt, fp_funct5::FMV_FMT_X, rd.index(), rs1.index(), 0, 0b000))
        }
        _ => Err(CodecError::UnknownMnemonic(mnemonic.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_addi() {
        let d = encode("addi x5, x6, -1", &IsaConfig::rv32i()).unwrap();
        assert_eq!(d.asm, "addi x5, x6, -1");
    }

    #[test]
    fn encodes_nop_alias() {
        let d = encode("nop", &IsaConfig::rv32i()).unwrap();
        assert_eq!(d.asm, "addi x0, x0, 0");
    }

    #[test]
    fn encodes_ret_alias() {
        let d = encode("ret", &IsaConfig::rv32i()).unwrap();
        assert_eq!(d.asm, "jalr x0, 0(x1)");
    }

    #[test]
    fn encodes_jr_alias() {
        let d = encode("jr x1", &IsaConfig::rv32i()).unwrap();
        assert_eq!(d.asm, "jalr x0, 0(x1)");
    }

    #[test]
    fn encodes_neg_alias() {
        let d = encode("neg x5, x6", &IsaConfig::rv32i()).unwrap();
        assert_eq!(d.asm, "sub x5, x0, x6");
    }

    #[test]
    fn encodes_load_mem_syntax() {
        let d = encode("lw x1, -4(x2)", &IsaConfig::rv32i()).unwrap();
        assert_eq!(d.asm, "lw x1, -4(x2)");
    }

    #[test]
    fn rejects_unknown_mnemonic() {
        assert!(matches!(
            encode("frobnicate x1, x2", &IsaConfig::rv32i()),
            Err(CodecError::UnknownMnemonic(_))
        ));
    }

    #[test]
    fn rejects_wrong_operand_count() {
        assert!(matches!(
            encode("addi x1, x2", &IsaConfig::rv32i()),
            Err(CodecError::OperandSyntax { .. })
        ));
    }

    #[test]
    fn fmadd_defaults_rounding_mode() {
        let d = encode("fmadd.s f0, f1, f2, f3", &IsaConfig::rv32i()).unwrap();
        assert_eq!(d.asm, "fmadd.s f0, f1, f2, f3, rne");
    }

    #[test]
    fn lr_rejects_offset() {
        assert!(matches!(
            encode("lr.w x1, 4(x2)", &IsaConfig::rv32i()),
            Err(CodecError::OperandSyntax { .. })
        ));
    }
}
