use super::program::{CompiledProgram, LabelRef, Program};
use super::{Addr, Word};
use log::debug;
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    DuplicateLabel(String),
    UndefinedLabel(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateLabel(name) => write!(f, "Label '{}' is defined twice", name),
            Error::UndefinedLabel(name) => {
                write!(f, "Label '{}' is used but never defined", name)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Pass 1: record the address of every label definition. Every instruction
/// consumes one address slot whether or not it carries labels.
fn build_label_map(program: &Program, base: Addr) -> Result<HashMap<String, Addr>, Error> {
    let mut label_map = HashMap::new();

    let mut address = base;
    for inst in &program.code {
        for label in &inst.labels {
            if let LabelRef::Def(name) = label {
                if label_map.insert(name.clone(), address).is_some() {
                    return Err(Error::DuplicateLabel(name.clone()));
                }
            }
        }

        address += 1;
    }

    Ok(label_map)
}

/// Compiles a program in exactly two passes over the instruction list, both
/// counting addresses up from `base`. Pass 1 resolves every label definition
/// before pass 2 consumes any use, so forward references cost nothing.
pub fn compile_program(program: &Program, base: Addr) -> Result<CompiledProgram, Error> {
    let label_map = build_label_map(program, base)?;

    let mut compiled = CompiledProgram::default();

    // Pass 2: OR each use's resolved address into the word's data field and
    // emit the (address, word) pair.
    let mut address = base;
    for inst in &program.code {
        let mut word = inst.op.encode();
        for label in &inst.labels {
            if let LabelRef::Use(name) = label {
                let target = label_map
                    .get(name)
                    .ok_or_else(|| Error::UndefinedLabel(name.clone()))?;
                word |= Word::from(*target);
            }
        }

        debug!("{:04x}: {:010x}  {}", address, word, inst.op);
        compiled.add_contents(address, word);
        address += 1;
    }

    for (name, address) in label_map {
        compiled.add_label(name, address);
    }

    Ok(compiled)
}
