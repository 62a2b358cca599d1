use std::io::{self, Write};
use std::num::ParseIntError;
use std::process;

use clap::{Parser, Subcommand};
use clap_num::maybe_hex;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use mipsim::cpu::Cpu;
use mipsim::instr::Instruction;
use mipsim::loader::{load_image, EXIT_FILE_ERROR};
use mipsim::memory::{Memory, INSTRUCTION_START};

/// Simulate a big-endian 32-bit MIPS-I processor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a binary image of 4-byte big-endian instruction words
    Run {
        /// Path to the input image
        input: String,

        /// Print each instruction to stderr as it executes
        #[arg(short, long)]
        trace: bool,
    },

    /// Print the disassembly of each word in an image without executing
    Decode {
        /// Path to the input image
        input: String,

        /// Base address of the listing (use 0x prefix for hexadecimal)
        #[arg(short, long, value_parser = maybe_hex::<u32>, default_value_t = INSTRUCTION_START)]
        base: u32,
    },

    /// Interactively read and write simulator memory
    Memtest,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();
    let code = match args.command {
        Command::Run { input, trace } => run(&input, trace),
        Command::Decode { input, base } => decode_listing(&input, base),
        Command::Memtest => memtest(),
    };
    process::exit(code);
}

fn run(input: &str, trace: bool) -> i32 {
    let words = match load_image(input) {
        Ok(words) => words,
        Err(err) => {
            eprintln!("could not read {input}: {err}");
            return EXIT_FILE_ERROR;
        }
    };
    let mut cpu = Cpu::new(Memory::new(words));
    cpu.set_trace(trace);
    match cpu.run() {
        Ok(code) => i32::from(code),
        Err(trap) => {
            eprintln!("{trap}");
            trap.exit_code()
        }
    }
}

fn decode_listing(input: &str, base: u32) -> i32 {
    let words = match load_image(input) {
        Ok(words) => words,
        Err(err) => {
            eprintln!("could not read {input}: {err}");
            return EXIT_FILE_ERROR;
        }
    };
    for (n, word) in words.iter().enumerate() {
        let addr = base.wrapping_add(4 * n as u32);
        if *word == 0 {
            println!("0x{addr:08x}: nop");
            continue;
        }
        match Instruction::decode(*word) {
            Ok(instr) => println!("0x{addr:08x}: {instr}"),
            Err(err) => println!("0x{addr:08x}: {err}"),
        }
    }
    0
}

fn parse_dec_or_hex(value: &str) -> Result<u32, ParseIntError> {
    if let Some(hex) = value.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else {
        value.parse()
    }
}

fn memtest() -> i32 {
    println!("This will test memory.");
    println!("Commands: r <addr>, w <addr> <value>, q.");
    println!("Addresses and values are decimal or 0x-prefixed hexadecimal.");
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("could not start line editor: {err}");
            return -20;
        }
    };
    let mut memory = Memory::default();
    loop {
        let line = match rl.readline("memtest> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {err}");
                break;
            }
        };
        let _ = rl.add_history_entry(line.as_str());
        let mut terms = line.split_whitespace();
        match (terms.next(), terms.next(), terms.next()) {
            (Some("r") | Some("read"), Some(addr), None) => {
                match parse_dec_or_hex(addr).map(|addr| memory.get_word(addr)) {
                    Ok(Ok(value)) => println!("0x{value:08x} ({value})"),
                    Ok(Err(err)) => println!("{err}"),
                    Err(err) => println!("bad address: {err}"),
                }
            }
            (Some("w") | Some("write"), Some(addr), Some(value)) => {
                match (parse_dec_or_hex(addr), parse_dec_or_hex(value)) {
                    (Ok(addr), Ok(value)) => {
                        if let Err(err) = memory.write_word(addr, value) {
                            println!("{err}");
                        }
                    }
                    _ => println!("bad address or value"),
                }
            }
            (Some("q") | Some("quit") | Some("end"), None, None) => break,
            (None, ..) => {}
            _ => println!("unrecognised command"),
        }
        // Anything the simulated program would print (a write to the
        // putc register) comes out here
        let output = memory.flush_output();
        if !output.is_empty() {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(&output);
            let _ = stdout.flush();
            println!();
        }
    }
    0
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn check_parse_dec_or_hex() {
        assert_eq!(parse_dec_or_hex("42").unwrap(), 42);
        assert_eq!(parse_dec_or_hex("0x30000000").unwrap(), 0x3000_0000);
        assert!(parse_dec_or_hex("wat").is_err());
    }
}
