//! The text-source pipeline: tokenize each line, parse statements into the
//! symbolic program forms, then hand off to the ROM compiler or script
//! encoder. Each phase reports its own errors, tagged with source locations
//! where one exists.

pub mod defines;
pub mod parse;
pub mod tokenize;
pub mod types;

pub use self::types::{Error, Loc, Located};

use self::defines::Defines;
use crate::rom::{self, CompiledProgram, Program};
use crate::script::{self, CompiledScript, ScriptOp};

pub fn parse_rom(source: &str, defines: &Defines) -> Result<Program, Error> {
    let mut parser = parse::RomParser::new(defines);
    for (loc, tokens) in tokenize::tokenize(source)? {
        parser
            .parse_line(loc, tokens)
            .map_err(|err| Located::new(loc, err))?;
    }
    Ok(parser.finish()?)
}

pub fn assemble_rom(
    source: &str,
    defines: &Defines,
    base: rom::Addr,
) -> Result<CompiledProgram, Error> {
    let program = parse_rom(source, defines)?;
    Ok(rom::compile_program(&program, base)?)
}

pub fn parse_script(source: &str, defines: &Defines) -> Result<Vec<ScriptOp>, Error> {
    let mut parser = parse::ScriptParser::new(defines);
    for (loc, tokens) in tokenize::tokenize(source)? {
        parser
            .parse_line(tokens)
            .map_err(|err| Located::new(loc, err))?;
    }
    Ok(parser.finish())
}

pub fn assemble_script(source: &str, defines: &Defines) -> Result<CompiledScript, Error> {
    let ops = parse_script(source, defines)?;
    Ok(script::compile_script(ops)?)
}
