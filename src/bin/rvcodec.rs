//! Command-line front end: translates one instruction (encoded word or
//! assembly line) given on the command line and prints the result.

use clap::Parser;
use log::debug;

use rvcodec::{translate, IsaConfig, IsaWidth};

/// Translate a RISC-V instruction word to assembly, or assembly to a word.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Instruction to translate: an 8-hex-digit word, a 32-bit binary word,
    /// or an assembly line (quote it if it contains spaces).
    input: String,

    /// Base integer ISA width to decode/encode against.
    #[arg(long, default_value = "rv32i")]
    isa: IsaWidth,

    /// Render registers by their ABI names (`sp`, `a0`, ...) instead of
    /// numeric ones (`x2`, `x10`, ...).
    #[arg(long)]
    abi: bool,

    /// Print the fragment breakdown (bit-slice -> assembly token mapping)
    /// in both orderings.
    #[arg(long)]
    fragments: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let config = IsaConfig { isa: args.isa, abi: args.abi };
    debug!("translating {:?} under {config:?}", args.input);

    match translate(&args.input, &config) {
        Ok(result) => {
            println!("{result}");
            if args.fragments {
                print_fragments("binFrags", &result.bin_frags);
                print_fragments("asmFrags", &result.asm_frags);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_fragments(label: &str, fragments: &[rvcodec::Fragment]) {
    println!("{label}:");
    for frag in fragments {
        println!("  {:<14} {:>12} -> {}", frag.field, frag.bits, frag.assembly);
    }
}
