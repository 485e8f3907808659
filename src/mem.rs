//! A word-addressed store with a configurable bit-width per word, serialized
//! to the two text image formats the hardware load paths consume.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct Memory {
    bit_width: usize,
    words: BTreeMap<usize, u64>,
    labels: HashMap<String, usize>,
}

impl Memory {
    pub fn new(bit_width: usize) -> Self {
        Memory {
            bit_width,
            words: BTreeMap::new(),
            labels: HashMap::new(),
        }
    }

    pub fn bytes_per_word(&self) -> usize {
        (self.bit_width + 7) / 8
    }

    fn hex_digits(&self) -> usize {
        2 * self.bytes_per_word()
    }

    /// Stores `data` at the word slot covering `byte_address`. Callers align
    /// byte addresses to the word width; an unaligned address lands in the
    /// word containing it.
    pub fn add_data_word(&mut self, byte_address: usize, data: u64) {
        self.words.insert(byte_address / self.bytes_per_word(), data);
    }

    pub fn add_label(&mut self, name: String, address: usize) {
        self.labels.insert(name, address);
    }

    pub fn resolve_label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Word address of the highest populated slot, if any.
    pub fn last_address(&self) -> Option<usize> {
        self.words.keys().next_back().copied()
    }

    /// Emits one `@<hex-addr> <hex-value>` line per populated word, in
    /// ascending address order.
    pub fn write_mif<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        for (address, data) in &self.words {
            writeln!(
                sink,
                "@{:x} {:0width$x}",
                address,
                data,
                width = self.hex_digits()
            )?;
        }
        Ok(())
    }

    /// Emits one hex value per line for every address from 0 up to the
    /// highest populated address, zero for unpopulated slots.
    pub fn write_mem<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        if let Some(last) = self.last_address() {
            for address in 0..=last {
                let data = self.words.get(&address).copied().unwrap_or(0);
                writeln!(sink, "{:0width$x}", data, width = self.hex_digits())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn image() -> Memory {
        let mut memory = Memory::new(40);
        memory.add_data_word(0, 0x20_0000_0100);
        memory.add_data_word(10, 0x61_0000_0000);
        memory
    }

    fn render<F: Fn(&Memory, &mut Vec<u8>) -> io::Result<()>>(memory: &Memory, f: F) -> String {
        let mut sink = Vec::new();
        f(memory, &mut sink).unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn five_byte_words() {
        assert_eq!(Memory::new(40).bytes_per_word(), 5);
        assert_eq!(Memory::new(32).bytes_per_word(), 4);
    }

    #[test]
    fn mif_lists_populated_words_only() {
        assert_eq!(
            render(&image(), |m, sink| m.write_mif(sink)),
            "@0 2000000100\n@2 6100000000\n"
        );
    }

    #[test]
    fn mem_zero_fills_gaps_from_address_zero() {
        assert_eq!(
            render(&image(), |m, sink| m.write_mem(sink)),
            "2000000100\n0000000000\n6100000000\n"
        );
    }

    #[test]
    fn empty_memory_serializes_to_nothing() {
        let memory = Memory::new(40);
        assert_eq!(render(&memory, |m, sink| m.write_mif(sink)), "");
        assert_eq!(render(&memory, |m, sink| m.write_mem(sink)), "");
    }

    #[test]
    fn labels_resolve_to_their_recorded_address() {
        let mut memory = image();
        memory.add_label(String::from("start"), 2);
        assert_eq!(memory.resolve_label("start"), Some(2));
        assert_eq!(memory.resolve_label("missing"), None);
    }
}
