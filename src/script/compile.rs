use super::ops::{Error, ScriptOp};
use super::Byte;
use log::debug;

/// An ordered sequence of already-encoded instructions. Serialization is
/// plain concatenation; the byte stream carries no framing, so consumers
/// recover instruction boundaries from each header byte alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledScript {
    contents: Vec<Vec<Byte>>,
}

impl CompiledScript {
    pub(super) fn add_contents(&mut self, op: Vec<Byte>) {
        self.contents.push(op);
    }

    pub fn contents(&self) -> &[Vec<Byte>] {
        &self.contents
    }

    pub fn as_bytes(&self) -> Vec<Byte> {
        self.contents.iter().flatten().copied().collect()
    }
}

/// Compiles a script in a single pass: this format has no labels and no
/// branches, so each operation encodes independently, in order.
pub fn compile_script<I>(script: I) -> Result<CompiledScript, Error>
where
    I: IntoIterator<Item = ScriptOp>,
{
    let mut compiled = CompiledScript::default();

    for (index, op) in script.into_iter().enumerate() {
        let bytes = op.encode()?;
        debug!("script[{}]: {} ({} bytes)", index, op, bytes.len());
        compiled.add_contents(bytes);
    }

    Ok(compiled)
}

#[cfg(test)]
mod test {
    use super::super::ops::{DataSize, ScriptParam};
    use super::*;

    #[test]
    fn empty_script() {
        let compiled = compile_script(Vec::new()).unwrap();
        assert!(compiled.contents().is_empty());
        assert!(compiled.as_bytes().is_empty());
    }

    #[test]
    fn concatenation_preserves_program_order() {
        let compiled = compile_script(vec![
            ScriptOp::Set(ScriptParam::Addr1, 0x34),
            ScriptOp::Write {
                addr: 0x10,
                size: DataSize::Bits32,
                data: vec![0xAABBCCDD],
                inc: false,
            },
            ScriptOp::Read {
                addr: 0x10,
                size: DataSize::Bits32,
                count: 1,
                inc: false,
            },
        ])
        .unwrap();

        assert_eq!(compiled.contents().len(), 3);
        assert_eq!(
            compiled.as_bytes(),
            vec![0x01, 0x34, 0xC2, 0x10, 0xDD, 0xCC, 0xBB, 0xAA, 0x82, 0x10]
        );
    }

    #[test]
    fn encode_errors_abort_compilation() {
        let result = compile_script(vec![ScriptOp::Write {
            addr: 0,
            size: DataSize::Bits8,
            data: Vec::new(),
            inc: false,
        }]);
        assert_eq!(result, Err(Error::InvalidOperandCount(0)));
    }
}
