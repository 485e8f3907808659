use crate::assembler::{self, defines::Defines};
use crate::common;
use crate::rom;
use anyhow::Context;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[cfg(windows)]
pub fn terminal_init() {
    ansi_term::enable_ansi_support().expect("Could not enable terminal ANSI support");
}

#[cfg(not(windows))]
pub fn terminal_init() {}

#[derive(StructOpt, Debug)]
#[structopt(name = "busrom")]
pub enum CommandRoot {
    /// Assemble a ROM processor program and write memory images
    Rom(SubcommandRom),
    /// Assemble a script engine program to a flat byte stream
    Script(SubcommandScript),
}

fn parse_addr(s: &str) -> Result<rom::Addr, String> {
    common::parse_radix_int(s)
        .and_then(|num| rom::Addr::try_from(num).ok())
        .ok_or_else(|| format!("'{}' is not a valid ROM address", s))
}

#[derive(StructOpt, Debug)]
pub struct SubcommandRom {
    #[structopt(name = "SRC", parse(from_os_str))]
    in_src: PathBuf,

    /// Write an `@addr value` image to this path ('-' for stdout)
    #[structopt(long, parse(from_os_str))]
    mif: Option<PathBuf>,

    /// Write a flat-hex image to this path ('-' for stdout)
    #[structopt(long, parse(from_os_str))]
    mem: Option<PathBuf>,

    /// Base address the program is compiled at
    #[structopt(long, default_value = "0", parse(try_from_str = parse_addr))]
    base: rom::Addr,

    /// Compile-time define, `key[=value]`, repeatable
    #[structopt(short = "D", long = "define", number_of_values = 1)]
    defines: Vec<String>,
}

#[derive(StructOpt, Debug)]
pub struct SubcommandScript {
    #[structopt(name = "SRC", parse(from_os_str))]
    in_src: PathBuf,

    /// Write the raw byte stream to this path; with no path, hex bytes go
    /// to stdout one instruction per line
    #[structopt(short, long, parse(from_os_str))]
    out: Option<PathBuf>,

    /// Compile-time define, `key[=value]`, repeatable
    #[structopt(short = "D", long = "define", number_of_values = 1)]
    defines: Vec<String>,
}

pub fn root(cmd: CommandRoot) -> anyhow::Result<()> {
    match cmd {
        CommandRoot::Rom(scmd) => rom_cmd(scmd),
        CommandRoot::Script(scmd) => script_cmd(scmd),
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Could not read source file '{}'", path.display()))
}

/// Scoped sink acquisition: a file is created only when a real path is
/// given, and either way the sink is flushed and closed when the writer
/// returns, on success and error paths alike.
fn with_sink<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    if path == Path::new("-") {
        let stdout = io::stdout();
        let mut sink = stdout.lock();
        write(&mut sink)?;
        return Ok(());
    }

    let mut sink = File::create(path)
        .with_context(|| format!("Could not open output file '{}'", path.display()))?;
    write(&mut sink)?;
    Ok(())
}

pub fn rom_cmd(cmd: SubcommandRom) -> anyhow::Result<()> {
    let defines = Defines::of_args(cmd.defines.iter().map(String::as_str));
    let source = read_source(&cmd.in_src)?;
    let compiled = assembler::assemble_rom(&source, &defines, cmd.base)?;

    if let Some(path) = &cmd.mif {
        with_sink(path, |sink| rom::mif_of_compilation(&compiled, sink))?;
    }
    if let Some(path) = &cmd.mem {
        with_sink(path, |sink| rom::mem_of_compilation(&compiled, sink))?;
    }

    // With no image requested, show the MIF form rather than nothing.
    if cmd.mif.is_none() && cmd.mem.is_none() {
        with_sink(Path::new("-"), |sink| {
            rom::mif_of_compilation(&compiled, sink)
        })?;
    }

    Ok(())
}

pub fn script_cmd(cmd: SubcommandScript) -> anyhow::Result<()> {
    let defines = Defines::of_args(cmd.defines.iter().map(String::as_str));
    let source = read_source(&cmd.in_src)?;
    let compiled = assembler::assemble_script(&source, &defines)?;

    match &cmd.out {
        Some(path) => std::fs::write(path, compiled.as_bytes())
            .with_context(|| format!("Could not open output file '{}'", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            for op in compiled.contents() {
                let line: Vec<String> = op.iter().map(|byte| format!("{:02x}", byte)).collect();
                writeln!(sink, "{}", line.join(" "))?;
            }
        }
    }

    Ok(())
}
