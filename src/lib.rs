//! User-space simulator of a big-endian 32-bit MIPS-I processor
//!
//! A binary image of instruction words is executed against the
//! architectural state in [`cpu::Cpu`] until the program counter
//! reaches zero, at which point the low byte of `$v0` becomes the
//! process exit status. Two fixed memory addresses provide character
//! input and output, so simulated programs can talk to the console.

#![forbid(unsafe_code)]

pub mod cpu;
pub mod encode;
pub mod fields;
pub mod instr;
pub mod loader;
pub mod memory;
pub mod registers;
