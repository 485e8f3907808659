use super::defines::Defines;
use super::tokenize::Token;
use super::types::{Loc, Located};
use crate::common;
use crate::rom::ops::{AluOp, BranchOp, Op, ReqOp, SetParam};
use crate::rom::program::{Instruction, LabelRef, Program};
use crate::script::ops::{DataSize, ScriptOp, ScriptParam};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UnexpectedToken(Token, &'static str),
    UnexpectedEndOfLine(&'static str),
    UnknownOpcode(String),
    UndefinedDefine(String),
    MalformedDefine(String, String),
    TrailingLabel(String),
    InvalidDataSize(u32),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnexpectedToken(tk, expected) => {
                write!(f, "Unexpected token '{}', {}", tk, expected)
            }
            Error::UnexpectedEndOfLine(expected) => {
                write!(f, "Unexpected end of line, {}", expected)
            }
            Error::UnknownOpcode(name) => write!(f, "Unknown instruction '{}'", name),
            Error::UndefinedDefine(name) => write!(f, "Define '{}' was never given a value", name),
            Error::MalformedDefine(name, value) => {
                write!(f, "Define '{}' has non-numeric value '{}'", name, value)
            }
            Error::TrailingLabel(name) => write!(
                f,
                "Label '{}' has no instruction to attach to; label-only slots do not exist",
                name
            ),
            Error::InvalidDataSize(bits) => {
                write!(f, "Data size {} is not one of 8, 16 or 32", bits)
            }
        }
    }
}

enum Operand {
    Data(u32),
    Label(String),
}

fn resolve_operand(defines: &Defines, tk: Token) -> Result<Operand, Error> {
    match tk {
        Token::Num(num) => Ok(Operand::Data(num)),
        Token::Name(name) => Ok(Operand::Label(name)),
        Token::Define(name) => match defines.lookup(&name) {
            None => Err(Error::UndefinedDefine(name)),
            Some(value) => common::parse_radix_int(value)
                .map(Operand::Data)
                .ok_or_else(|| Error::MalformedDefine(name.clone(), value.to_owned())),
        },
        tk => Err(Error::UnexpectedToken(tk, "expected an operand")),
    }
}

fn resolve_numeric(defines: &Defines, tk: Option<Token>) -> Result<u32, Error> {
    let tk = tk.ok_or(Error::UnexpectedEndOfLine("expected a numeric operand"))?;
    match resolve_operand(defines, tk)? {
        Operand::Data(num) => Ok(num),
        Operand::Label(name) => Err(Error::UnexpectedToken(
            Token::Name(name),
            "expected a numeric operand",
        )),
    }
}

fn expect_exhausted(it: &mut impl Iterator<Item = Token>) -> Result<(), Error> {
    match it.next() {
        None => Ok(()),
        Some(tk) => Err(Error::UnexpectedToken(tk, "expected end of line")),
    }
}

fn split_mnemonic(name: &str) -> (&str, Option<&str>) {
    match name.split_once('.') {
        Some((class, sub)) => (class, Some(sub)),
        None => (name, None),
    }
}

/// Parses ROM program statements, attaching pending label definitions to the
/// next instruction parsed (a label never occupies an address slot of its
/// own).
pub(super) struct RomParser<'d> {
    defines: &'d Defines,
    pending: Vec<(Loc, String)>,
    program: Program,
}

impl<'d> RomParser<'d> {
    pub fn new(defines: &'d Defines) -> Self {
        RomParser {
            defines,
            pending: Vec::new(),
            program: Program::new(),
        }
    }

    pub fn parse_line(&mut self, loc: Loc, tokens: Vec<Token>) -> Result<(), Error> {
        let mut it = tokens.into_iter();

        let mut first = it.next();
        while let Some(Token::LabelDef(name)) = first {
            self.pending.push((loc, name));
            first = it.next();
        }

        let name = match first {
            None => return Ok(()),
            Some(Token::Name(name)) => name,
            Some(tk) => {
                return Err(Error::UnexpectedToken(
                    tk,
                    "expected a label definition or mnemonic",
                ))
            }
        };

        let (op, use_label) = self.parse_op(&name, &mut it)?;
        expect_exhausted(&mut it)?;

        let mut labels: Vec<LabelRef> = self
            .pending
            .drain(..)
            .map(|(_, name)| LabelRef::Def(name))
            .collect();
        if let Some(name) = use_label {
            labels.push(LabelRef::Use(name));
        }

        self.program.push(Instruction { op, labels });
        Ok(())
    }

    pub fn finish(self) -> Result<Program, Located<Error>> {
        if let Some((loc, name)) = self.pending.into_iter().next() {
            return Err(Located::new(loc, Error::TrailingLabel(name)));
        }
        Ok(self.program)
    }

    fn parse_op(
        &self,
        name: &str,
        it: &mut impl Iterator<Item = Token>,
    ) -> Result<(Op, Option<String>), Error> {
        let unknown = || Error::UnknownOpcode(name.to_owned());

        match split_mnemonic(name) {
            ("alu", Some(sub)) => {
                let op = AluOp::from_str(sub).map_err(|_| unknown())?;
                let (data, label) = self.data_or_label(it)?;
                Ok((Op::Alu(op, data), label))
            }
            ("set", Some(sub)) => {
                let op = SetParam::from_str(sub).map_err(|_| unknown())?;
                let (data, label) = self.data_or_label(it)?;
                Ok((Op::Set(op, data), label))
            }
            ("req", Some(sub)) => {
                let op = ReqOp::from_str(sub).map_err(|_| unknown())?;
                let (data, label) = self.data_or_label(it)?;
                Ok((Op::Req(op, data), label))
            }
            ("branch", Some(sub)) => {
                let op = BranchOp::from_str(sub).map_err(|_| unknown())?;
                let (data, label) = self.data_or_label(it)?;
                Ok((Op::Branch(op, data), label))
            }
            ("wait", None) => {
                let (data, label) = self.data_or_label(it)?;
                Ok((Op::Wait(data), label))
            }
            ("finish", None) => Ok((Op::Finish, None)),
            _ => Err(unknown()),
        }
    }

    /// An operand is either immediate data or a bare label name, which
    /// encodes as data 0 plus a label use ORed in at compile time.
    fn data_or_label(
        &self,
        it: &mut impl Iterator<Item = Token>,
    ) -> Result<(u32, Option<String>), Error> {
        let tk = it.next().ok_or(Error::UnexpectedEndOfLine("expected an operand"))?;
        match resolve_operand(self.defines, tk)? {
            Operand::Data(data) => Ok((data, None)),
            Operand::Label(name) => Ok((0, Some(name))),
        }
    }
}

/// Parses script statements. Scripts have no labels, so every operand is
/// numeric and each line stands alone.
pub(super) struct ScriptParser<'d> {
    defines: &'d Defines,
    ops: Vec<ScriptOp>,
}

impl<'d> ScriptParser<'d> {
    pub fn new(defines: &'d Defines) -> Self {
        ScriptParser {
            defines,
            ops: Vec::new(),
        }
    }

    pub fn parse_line(&mut self, tokens: Vec<Token>) -> Result<(), Error> {
        let mut it = tokens.into_iter();

        let name = match it.next() {
            None => return Ok(()),
            Some(Token::Name(name)) => name,
            Some(tk) => return Err(Error::UnexpectedToken(tk, "expected a mnemonic")),
        };

        let op = self.parse_op(&name, &mut it)?;
        expect_exhausted(&mut it)?;

        self.ops.push(op);
        Ok(())
    }

    pub fn finish(self) -> Vec<ScriptOp> {
        self.ops
    }

    fn parse_op(
        &self,
        name: &str,
        it: &mut impl Iterator<Item = Token>,
    ) -> Result<ScriptOp, Error> {
        let unknown = || Error::UnknownOpcode(name.to_owned());

        match split_mnemonic(name) {
            ("set", Some(sub)) => {
                let param = ScriptParam::from_str(sub).map_err(|_| unknown())?;
                let data = self.numeric(it)?;
                Ok(ScriptOp::Set(param, data as u8))
            }
            ("poll", Some(sub)) => {
                let expect_set = match sub {
                    "set" => true,
                    "clr" => false,
                    _ => return Err(unknown()),
                };
                let addr = self.numeric(it)? as u8;
                let bit = self.numeric_or(it, 0)? as u8;
                Ok(ScriptOp::Poll {
                    addr,
                    bit,
                    expect_set,
                })
            }
            ("read", sub) => {
                let inc = self.inc_suffix(sub, name)?;
                let addr = self.numeric(it)? as u8;
                let size = self.data_size(it)?;
                let count = self.numeric_or(it, 1)? as usize;
                Ok(ScriptOp::Read {
                    addr,
                    size,
                    count,
                    inc,
                })
            }
            ("write", sub) => {
                let inc = self.inc_suffix(sub, name)?;
                let addr = self.numeric(it)? as u8;
                let size = self.data_size(it)?;
                let mut data = Vec::new();
                for tk in it {
                    data.push(resolve_numeric(self.defines, Some(tk))?);
                }
                Ok(ScriptOp::Write {
                    addr,
                    size,
                    data,
                    inc,
                })
            }
            _ => Err(unknown()),
        }
    }

    fn inc_suffix(&self, sub: Option<&str>, name: &str) -> Result<bool, Error> {
        match sub {
            None => Ok(false),
            Some("inc") => Ok(true),
            Some(_) => Err(Error::UnknownOpcode(name.to_owned())),
        }
    }

    fn numeric(&self, it: &mut impl Iterator<Item = Token>) -> Result<u32, Error> {
        resolve_numeric(self.defines, it.next())
    }

    fn numeric_or(
        &self,
        it: &mut impl Iterator<Item = Token>,
        default: u32,
    ) -> Result<u32, Error> {
        match it.next() {
            None => Ok(default),
            tk => resolve_numeric(self.defines, tk),
        }
    }

    fn data_size(&self, it: &mut impl Iterator<Item = Token>) -> Result<DataSize, Error> {
        let bits = self.numeric(it)?;
        DataSize::from_bits(bits).ok_or(Error::InvalidDataSize(bits))
    }
}
