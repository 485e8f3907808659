//! Byte-stream encoding for the script engine.
//!
//! Scripts are branch-free: each instruction is a short self-describing byte
//! sequence (a header byte carrying class, flags, and size/count fields,
//! then operands), and a compiled script is nothing more than the
//! concatenation of its instructions in program order.

pub mod compile;
pub mod ops;

pub use self::compile::{compile_script, CompiledScript};
pub use self::ops::{DataSize, Error, ScriptOp, ScriptParam};

pub type Byte = u8;
