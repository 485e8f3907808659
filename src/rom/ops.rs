use super::{Word, CLASS_SHIFT, DATA_MASK, SUBCLASS_MASK, SUBCLASS_SHIFT};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt::Display;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, FromPrimitive)]
pub enum OpClass {
    Alu = 0,
    SetParameter = 1,
    BusRequest = 2,
    Branch = 3,
    Wait = 4,
    Finish = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, FromPrimitive)]
#[strum(serialize_all = "snake_case")]
pub enum AluOp {
    Or = 0,
    And = 1,
    Bic = 2,
    Xor = 3,
    Add = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, FromPrimitive)]
#[strum(serialize_all = "snake_case")]
pub enum SetParam {
    Address = 0,
    Repeat = 1,
    Accumulator = 2,
    Increment = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, FromPrimitive)]
#[strum(serialize_all = "snake_case")]
pub enum BranchOp {
    Branch = 0,
    Beq = 1,
    Bne = 2,
    Loop = 3,
    BranchLink = 4,
    BeqLink = 5,
    BneLink = 6,
    Ret = 7,
}

/// Bus transaction subclasses. The `*Inc` variants share the transaction kind
/// of their plain counterparts but post-increment the bus address, encoded as
/// the corresponding subclass id with bit 2 set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, FromPrimitive)]
#[strum(serialize_all = "snake_case")]
pub enum ReqOp {
    Read = 0,
    WriteArg = 1,
    WriteAcc = 2,
    ReadInc = 4,
    WriteArgInc = 5,
    WriteAccInc = 6,
}

/// One ROM processor operation, carrying its 32-bit data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Alu(AluOp, u32),
    Set(SetParam, u32),
    Req(ReqOp, u32),
    Branch(BranchOp, u32),
    Wait(u32),
    Finish,
}

impl Op {
    pub fn class(self) -> OpClass {
        match self {
            Op::Alu(_, _) => OpClass::Alu,
            Op::Set(_, _) => OpClass::SetParameter,
            Op::Req(_, _) => OpClass::BusRequest,
            Op::Branch(_, _) => OpClass::Branch,
            Op::Wait(_) => OpClass::Wait,
            Op::Finish => OpClass::Finish,
        }
    }

    pub fn subclass(self) -> Word {
        match self {
            Op::Alu(op, _) => op as Word,
            Op::Set(op, _) => op as Word,
            Op::Req(op, _) => op as Word,
            Op::Branch(op, _) => op as Word,
            Op::Wait(_) | Op::Finish => 0,
        }
    }

    pub fn data(self) -> u32 {
        match self {
            Op::Alu(_, data)
            | Op::Set(_, data)
            | Op::Req(_, data)
            | Op::Branch(_, data)
            | Op::Wait(data) => data,
            Op::Finish => 0,
        }
    }

    pub fn encode(self) -> Word {
        ((self.class() as Word) << CLASS_SHIFT)
            | (self.subclass() << SUBCLASS_SHIFT)
            | (Word::from(self.data()) & DATA_MASK)
    }

    /// Reverses `encode`. Returns `None` for words whose class/subclass bits
    /// do not name an operation (including nonzero subclass bits on `wait`
    /// and `finish`, and any set bits above the word width).
    pub fn decode(word: Word) -> Option<Op> {
        let class = OpClass::from_u64(word >> CLASS_SHIFT)?;
        let subclass = (word >> SUBCLASS_SHIFT) & SUBCLASS_MASK;
        let data = (word & DATA_MASK) as u32;

        match class {
            OpClass::Alu => Some(Op::Alu(AluOp::from_u64(subclass)?, data)),
            OpClass::SetParameter => Some(Op::Set(SetParam::from_u64(subclass)?, data)),
            OpClass::BusRequest => Some(Op::Req(ReqOp::from_u64(subclass)?, data)),
            OpClass::Branch => Some(Op::Branch(BranchOp::from_u64(subclass)?, data)),
            OpClass::Wait => {
                if subclass != 0 {
                    return None;
                }
                Some(Op::Wait(data))
            }
            OpClass::Finish => {
                if subclass != 0 || data != 0 {
                    return None;
                }
                Some(Op::Finish)
            }
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Alu(op, data) => write!(f, "alu.{} {:#x}", op, data),
            Op::Set(op, data) => write!(f, "set.{} {:#x}", op, data),
            Op::Req(op, data) => write!(f, "req.{} {:#x}", op, data),
            Op::Branch(op, data) => write!(f, "branch.{} {:#x}", op, data),
            Op::Wait(data) => write!(f, "wait {:#x}", data),
            Op::Finish => write!(f, "finish"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn encodings_match_hardware() {
        assert_eq!(Op::Alu(AluOp::Add, 40).encode(), 0x04_0000_0028);
        assert_eq!(Op::Set(SetParam::Address, 0x100).encode(), 0x20_0000_0100);
        assert_eq!(Op::Req(ReqOp::Read, 0).encode(), 0x40_0000_0000);
        assert_eq!(
            Op::Req(ReqOp::WriteArgInc, 0xFFFF_FFFF).encode(),
            0x45_FFFF_FFFF
        );
        assert_eq!(Op::Branch(BranchOp::Beq, 0).encode(), 0x61_0000_0000);
        assert_eq!(Op::Branch(BranchOp::Ret, 0).encode(), 0x67_0000_0000);
        assert_eq!(Op::Wait(100).encode(), 0x80_0000_0064);
        assert_eq!(Op::Finish.encode(), 0xA0_0000_0000);
    }

    #[test]
    fn data_is_masked_to_field_width() {
        assert_eq!(Op::Wait(0xFFFF_FFFF).encode(), 0x80_FFFF_FFFF);
    }

    #[test]
    fn decode_roundtrips_every_subclass() {
        let mut ops = Vec::new();
        ops.extend(AluOp::iter().map(|op| Op::Alu(op, 0x1234)));
        ops.extend(SetParam::iter().map(|op| Op::Set(op, 0x1234)));
        ops.extend(ReqOp::iter().map(|op| Op::Req(op, 0x1234)));
        ops.extend(BranchOp::iter().map(|op| Op::Branch(op, 0x1234)));
        ops.push(Op::Wait(0x1234));
        ops.push(Op::Finish);

        for op in ops {
            assert_eq!(Op::decode(op.encode()), Some(op));
        }
    }

    #[test]
    fn decode_rejects_junk() {
        // Class 6 and 7 are unassigned.
        assert_eq!(Op::decode(6 << CLASS_SHIFT), None);
        // Bus request subclass 3 is a hole in the subclass table.
        assert_eq!(Op::decode(0x43_0000_0000), None);
        // `finish` carries no data.
        assert_eq!(Op::decode(0xA0_0000_0001), None);
        // Set bits above the word width never decode.
        assert_eq!(Op::decode(1 << 40), None);
    }

    #[test]
    fn display_names_follow_mnemonics() {
        assert_eq!(Op::Req(ReqOp::WriteArgInc, 1).to_string(), "req.write_arg_inc 0x1");
        assert_eq!(Op::Branch(BranchOp::BeqLink, 0).to_string(), "branch.beq_link 0x0");
        assert_eq!(Op::Finish.to_string(), "finish");
    }
}
