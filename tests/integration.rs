use rvcodec::{translate, CodecError, IsaConfig, IsaWidth};

fn rv32() -> IsaConfig {
    IsaConfig::rv32i()
}

fn rv64() -> IsaConfig {
    IsaConfig::rv64i()
}

#[test]
fn decodes_hex_word_to_assembly() {
    let r = translate("00c58533", &rv32()).unwrap();
    assert_eq!(r.asm, "add x10, x11, x12");
}

#[test]
fn encodes_assembly_to_matching_hex() {
    let r = translate("add x10, x11, x12", &rv32()).unwrap();
    assert_eq!(r.hex, "00c58533");
    assert_eq!(r.bin.len(), 32);
}

#[test]
fn hex_and_assembly_round_trip_to_the_same_result() {
    let from_hex = translate("00c58533", &rv32()).unwrap();
    let from_asm = translate("add x10, x11, x12", &rv32()).unwrap();
    assert_eq!(from_hex, from_asm);
}

#[test]
fn binary_word_decodes_same_as_hex() {
    let from_bin = translate(&"0".repeat(25) + "0110011", &rv32()).unwrap();
    let from_hex = translate("00000033", &rv32()).unwrap();
    assert_eq!(from_bin, from_hex);
}

#[test]
fn fragments_cover_every_bit_exactly_once() {
    let r = translate("00c58533", &rv32()).unwrap();
    let total_bits: u32 = r.bin_frags.iter().map(|f| f.bits.len() as u32).sum();
    assert_eq!(total_bits, 32);

    let mut covered = vec![false; 32];
    for frag in &r.bin_frags {
        let width = frag.bits.len() as u32;
        for bit in frag.index..frag.index + width {
            assert!(!covered[bit as usize], "bit {bit} covered twice");
            covered[bit as usize] = true;
        }
    }
    assert!(covered.iter().all(|&b| b), "every bit must be covered");
}

#[test]
fn bin_frags_and_asm_frags_are_the_same_set_reordered() {
    let r = translate("fe010113", &rv32()).unwrap(); // addi sp, sp, -32
    let mut bin_sorted = r.bin_frags.clone();
    let mut asm_sorted = r.asm_frags.clone();
    bin_sorted.sort_by_key(|f| f.index);
    asm_sorted.sort_by_key(|f| f.index);
    assert_eq!(bin_sorted, asm_sorted);
}

#[test]
fn abi_names_change_rendering_not_semantics() {
    let numeric = translate("addi x2, x2, -32", &IsaConfig::rv32i()).unwrap();
    let abi = translate("addi sp, sp, -32", &IsaConfig::rv32i().with_abi(true)).unwrap();
    assert_eq!(numeric.hex, abi.hex);
    assert_eq!(abi.asm, "addi sp, sp, -32");
}

#[test]
fn rejects_unknown_opcode() {
    assert!(matches!(
        translate("0000000f", &rv32()),
        Err(CodecError::InvalidOpcode(_))
    ));
}

#[test]
fn rejects_six_bit_shift_under_rv32i() {
    // srli x5, x6, 40 needs a 6-bit shamt, illegal under RV32I
    let err = translate("srli x5, x6, 40", &rv32()).unwrap_err();
    assert!(matches!(err, CodecError::ShiftOutOfRange { .. }));
}

#[test]
fn six_bit_shift_is_legal_under_rv64i() {
    let r = translate("srli x5, x6, 40", &rv64()).unwrap();
    assert_eq!(r.asm, "srli x5, x6, 40");
}

#[test]
fn ld_is_rejected_under_rv32i_config() {
    let err = translate("ld x1, 0(x2)", &rv32()).unwrap_err();
    assert!(matches!(err, CodecError::IsaMismatch { .. }));
}

#[test]
fn ld_is_accepted_under_rv64i_config() {
    let r = translate("ld x1, 0(x2)", &rv64()).unwrap();
    assert_eq!(r.asm, "ld x1, 0(x2)");
}

#[test]
fn fence_round_trips_through_mask_letters() {
    let r = translate("fence rw,io", &rv32()).unwrap();
    assert_eq!(r.asm, "fence rw,io");
}

#[test]
fn csr_instruction_renders_known_name() {
    let r = translate("csrrs x5, mstatus, x0", &rv32()).unwrap();
    assert_eq!(r.asm, "csrrs x5, mstatus, x0");
}

#[test]
fn float_fma_round_trips_with_default_rounding_mode() {
    let r = translate("fmadd.s f1, f2, f3, f4", &rv32()).unwrap();
    assert_eq!(r.asm, "fmadd.s f1, f2, f3, f4, rne");
}

#[test]
fn atomic_lr_rejects_nonzero_rs2() {
    // lr.w with rs2 != 0 is malformed per the base ISA
    let word = (0b00010 << 27) | (1 << 20) | (2 << 15) | (0b010 << 12) | (3 << 7) | 0b010_1111u32;
    let hex = format!("{word:08x}");
    assert!(matches!(
        translate(&hex, &rv32()),
        Err(CodecError::NonZeroReserved { .. })
    ));
}

#[test]
fn nop_alias_encodes_as_addi_zero_zero_zero() {
    let r = translate("nop", &rv32()).unwrap();
    assert_eq!(r.asm, "addi x0, x0, 0");
}

#[test]
fn unknown_mnemonic_is_rejected() {
    assert!(matches!(
        translate("frobnicate x1, x2", &rv32()),
        Err(CodecError::UnknownMnemonic(_))
    ));
}

#[test]
fn malformed_input_is_rejected() {
    assert!(matches!(
        translate("", &rv32()),
        Err(CodecError::MalformedInput(_))
    ));
    assert!(matches!(
        translate("   ", &rv32()),
        Err(CodecError::MalformedInput(_))
    ));
}

#[test]
fn immediate_out_of_range_is_rejected() {
    let err = translate("addi x1, x2, 4096", &rv32()).unwrap_err();
    assert!(matches!(err, CodecError::ImmediateOutOfRange { .. }));
}
