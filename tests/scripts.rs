//! Script streams ported from the hardware regression scripts: parameter
//! setup followed by bursts of reads, writes and polls against timer, GPIO
//! and SRAM windows.

use busrom::script::{self, DataSize, ScriptOp, ScriptParam};

const GPIO_OUTPUT: u32 = 0x1000_0000;
const TIMER_COMPARATOR0: u32 = 0x0000_0010;

fn set_address_window(addr: u32) -> Vec<ScriptOp> {
    vec![
        ScriptOp::Set(ScriptParam::Addr1, (addr >> 8) as u8),
        ScriptOp::Set(ScriptParam::Addr2, (addr >> 16) as u8),
        ScriptOp::Set(ScriptParam::Addr3, (addr >> 24) as u8),
    ]
}

#[test]
fn gpio_write_then_read_back() {
    let mut ops = set_address_window(GPIO_OUTPUT);
    ops.push(ScriptOp::Write {
        addr: GPIO_OUTPUT as u8,
        size: DataSize::Bits32,
        data: vec![0xFFFF_FFFF],
        inc: false,
    });
    ops.push(ScriptOp::Read {
        addr: GPIO_OUTPUT as u8,
        size: DataSize::Bits32,
        count: 1,
        inc: false,
    });

    let compiled = script::compile_script(ops).unwrap();
    assert_eq!(
        compiled.as_bytes(),
        vec![
            0x01, 0x00, // addr1
            0x02, 0x00, // addr2
            0x03, 0x10, // addr3
            0xC2, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, // write 32
            0x82, 0x00, // read 32
        ]
    );
}

#[test]
fn timer_comparator_poll_sequence() {
    let mut ops = set_address_window(TIMER_COMPARATOR0);
    ops.push(ScriptOp::Set(ScriptParam::PollDelay, 14));
    ops.push(ScriptOp::Write {
        addr: TIMER_COMPARATOR0 as u8,
        size: DataSize::Bits16,
        data: vec![0x100],
        inc: false,
    });
    ops.push(ScriptOp::Poll {
        addr: TIMER_COMPARATOR0 as u8,
        bit: 31,
        expect_set: true,
    });
    ops.push(ScriptOp::Read {
        addr: TIMER_COMPARATOR0 as u8,
        size: DataSize::Bits32,
        count: 1,
        inc: false,
    });

    let compiled = script::compile_script(ops).unwrap();
    assert_eq!(
        compiled.as_bytes(),
        vec![
            0x01, 0x00, // addr1
            0x02, 0x00, // addr2
            0x03, 0x00, // addr3
            0x08, 0x0E, // poll_delay = 14
            0xC1, 0x10, 0x00, 0x01, // write 16
            0x7F, 0x10, // poll for set, bit 31
            0x82, 0x10, // read 32
        ]
    );
}

#[test]
fn incrementing_burst_transfers() {
    let ops = vec![
        ScriptOp::Write {
            addr: 0x40,
            size: DataSize::Bits32,
            data: vec![0x1, 0x2, 0x3, 0x4, 0x5],
            inc: true,
        },
        ScriptOp::Read {
            addr: 0x44,
            size: DataSize::Bits32,
            count: 2,
            inc: true,
        },
    ];

    let compiled = script::compile_script(ops).unwrap();
    assert_eq!(
        compiled.as_bytes(),
        vec![
            0xF2, 0x40, // write.inc, 5 values of 32 bits
            0x01, 0x00, 0x00, 0x00, //
            0x02, 0x00, 0x00, 0x00, //
            0x03, 0x00, 0x00, 0x00, //
            0x04, 0x00, 0x00, 0x00, //
            0x05, 0x00, 0x00, 0x00, //
            0xA6, 0x44, // read.inc, 2 values of 32 bits
        ]
    );
}

#[test]
fn per_op_grouping_is_preserved() {
    let compiled = script::compile_script(vec![
        ScriptOp::Set(ScriptParam::PollCount, 3),
        ScriptOp::Read {
            addr: 0x10,
            size: DataSize::Bits8,
            count: 4,
            inc: false,
        },
    ])
    .unwrap();

    assert_eq!(compiled.contents(), &[vec![0x0C, 0x03], vec![0x8C, 0x10]]);
}
