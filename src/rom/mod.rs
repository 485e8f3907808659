//! Program encoding for the microcoded ROM processor.
//!
//! The processor executes one fixed-width word per cycle, laid out as:
//!
//! ```text
//! CCC SSSSS DDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDD
//! ```
//!
//! From the top: a 3-bit operation class, a 5-bit per-class subclass, and a
//! 32-bit data field. Branch targets and other label references are ORed
//! into the data field once their addresses are known.

pub mod compile;
pub mod ops;
pub mod program;

pub use self::compile::{compile_program, Error};
pub use self::ops::Op;
pub use self::program::{CompiledProgram, Instruction, LabelRef, Program};

use crate::mem::Memory;
use static_assertions::const_assert;
use std::io::{self, Write};

/// A single ROM word, as stored in the program store.
pub type Word = u64;

/// Program-space address of a ROM word, as driven on the start-request bus.
pub type Addr = u16;

pub const CLASS_WIDTH: u32 = 3;
pub const SUBCLASS_WIDTH: u32 = 5;
pub const DATA_WIDTH: u32 = 32;
pub const WORD_WIDTH: u32 = CLASS_WIDTH + SUBCLASS_WIDTH + DATA_WIDTH;

pub const SUBCLASS_SHIFT: u32 = DATA_WIDTH;
pub const CLASS_SHIFT: u32 = DATA_WIDTH + SUBCLASS_WIDTH;

pub const DATA_MASK: Word = (1 << DATA_WIDTH) - 1;
pub const SUBCLASS_MASK: Word = (1 << SUBCLASS_WIDTH) - 1;

pub const BYTES_PER_WORD: usize = (WORD_WIDTH as usize + 7) / 8;

const_assert!(WORD_WIDTH == 40);
const_assert!(BYTES_PER_WORD == 5);

/// Lays a compilation into a fresh word-store image, with labels registered
/// unprefixed at their program addresses.
pub fn image_of_compilation(compiled: &CompiledProgram) -> Memory {
    let mut memory = Memory::new(WORD_WIDTH as usize);
    compiled.add_to_memory(&mut memory, BYTES_PER_WORD, "", 0);
    memory
}

pub fn mif_of_compilation<W: Write + ?Sized>(
    compiled: &CompiledProgram,
    sink: &mut W,
) -> io::Result<()> {
    image_of_compilation(compiled).write_mif(sink)
}

pub fn mem_of_compilation<W: Write + ?Sized>(
    compiled: &CompiledProgram,
    sink: &mut W,
) -> io::Result<()> {
    image_of_compilation(compiled).write_mem(sink)
}
