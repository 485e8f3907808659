use super::Byte;
use itertools::Itertools;
use std::fmt::Display;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ScriptClass {
    Set = 0,
    Poll = 1,
    Read = 2,
    Write = 3,
}

pub const CLASS_SHIFT: u32 = 6;

/// Flag bit shared by the read/write headers (post-increment) and the poll
/// header (wait-for-set rather than wait-for-clear).
pub const INC_FLAG: Byte = 0x20;
pub const POLL_SET_FLAG: Byte = 0x20;

pub const POLL_BIT_MASK: Byte = 0x1F;

/// Engine parameters targeted by a set instruction. The ids are sparse; they
/// select the parameter register directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ScriptParam {
    #[strum(serialize = "addr1")]
    Addr1 = 1,
    #[strum(serialize = "addr2")]
    Addr2 = 2,
    #[strum(serialize = "addr3")]
    Addr3 = 3,
    PollDelay = 8,
    PollCount = 12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum DataSize {
    Bits8 = 0,
    Bits16 = 1,
    Bits32 = 2,
}

impl DataSize {
    pub fn from_bits(bits: u32) -> Option<DataSize> {
        match bits {
            8 => Some(DataSize::Bits8),
            16 => Some(DataSize::Bits16),
            32 => Some(DataSize::Bits32),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        8 << (self as u32)
    }

    pub fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    fn code(self) -> Byte {
        self as Byte
    }
}

/// Longest read/write burst a single header byte can describe.
pub const MAX_BURST: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidOperandCount(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidOperandCount(count) => write!(
                f,
                "Operand count {} is outside the encodable burst range 1..={}",
                count, MAX_BURST
            ),
        }
    }
}

impl std::error::Error for Error {}

/// One script engine operation. `encode` produces its exact byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    Set(ScriptParam, Byte),
    Poll {
        addr: Byte,
        bit: u8,
        expect_set: bool,
    },
    Read {
        addr: Byte,
        size: DataSize,
        count: usize,
        inc: bool,
    },
    Write {
        addr: Byte,
        size: DataSize,
        data: Vec<u32>,
        inc: bool,
    },
}

fn class_bits(class: ScriptClass) -> Byte {
    (class as Byte) << CLASS_SHIFT
}

fn inc_bits(inc: bool) -> Byte {
    if inc {
        INC_FLAG
    } else {
        0
    }
}

/// Burst counts encode as `count - 1` in a 3-bit field; 0 and anything past
/// `MAX_BURST` have no encoding and are rejected.
fn burst_bits(count: usize) -> Result<Byte, Error> {
    if count == 0 || count > MAX_BURST {
        return Err(Error::InvalidOperandCount(count));
    }
    Ok(((count - 1) as Byte) << 2)
}

impl ScriptOp {
    pub fn encode(&self) -> Result<Vec<Byte>, Error> {
        match self {
            ScriptOp::Set(param, data) => {
                Ok(vec![class_bits(ScriptClass::Set) | (*param as Byte), *data])
            }
            ScriptOp::Poll {
                addr,
                bit,
                expect_set,
            } => {
                let flag = if *expect_set { POLL_SET_FLAG } else { 0 };
                Ok(vec![
                    class_bits(ScriptClass::Poll) | flag | (bit & POLL_BIT_MASK),
                    *addr,
                ])
            }
            ScriptOp::Read {
                addr,
                size,
                count,
                inc,
            } => Ok(vec![
                class_bits(ScriptClass::Read) | inc_bits(*inc) | size.code() | burst_bits(*count)?,
                *addr,
            ]),
            ScriptOp::Write {
                addr,
                size,
                data,
                inc,
            } => {
                let header = class_bits(ScriptClass::Write)
                    | inc_bits(*inc)
                    | size.code()
                    | burst_bits(data.len())?;

                let mut bytes = vec![header, *addr];
                for value in data {
                    bytes.extend_from_slice(&value.to_le_bytes()[..size.bytes()]);
                }
                Ok(bytes)
            }
        }
    }
}

impl Display for ScriptOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptOp::Set(param, data) => write!(f, "set.{} {:#x}", param, data),
            ScriptOp::Poll {
                addr,
                bit,
                expect_set,
            } => write!(
                f,
                "poll.{} {:#x} {}",
                if *expect_set { "set" } else { "clr" },
                addr,
                bit
            ),
            ScriptOp::Read {
                addr,
                size,
                count,
                inc,
            } => write!(
                f,
                "read{} {:#x} {} {}",
                if *inc { ".inc" } else { "" },
                addr,
                size.bits(),
                count
            ),
            ScriptOp::Write {
                addr,
                size,
                data,
                inc,
            } => write!(
                f,
                "write{} {:#x} {} {}",
                if *inc { ".inc" } else { "" },
                addr,
                size.bits(),
                data.iter().map(|value| format!("{:#x}", value)).join(" ")
            ),
        }
    }
}
