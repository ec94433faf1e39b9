//! Immediate-mode transfers driven end-to-end against the recording
//! register backend.

use axi_platform::{CountingDelay, RecordingBus};
use axi_spi_engine::regs::{
    REG_CMD_FIFO, REG_DATA_WIDTH, REG_SDI_FIFO, REG_SDI_FIFO_LEVEL, REG_SDO_FIFO,
};
use axi_spi_engine::{Config, Descriptor, Error, Message, ProtocolConfig, SpiOp};

const BASE: u32 = 0x4440_0000;

fn config() -> Config {
    Config {
        base: BASE,
        rx_dma_base: 0x4441_0000,
        tx_dma_base: 0x4442_0000,
        offload_channel: 0,
        ref_clock_hz: 100_000_000,
        clock_divider: 0,
        chip_select: 3,
        protocol: ProtocolConfig::empty(),
        cs_assert_delay: 0,
        offload_rx_enabled: false,
        offload_tx_enabled: false,
        rx_timeout_us: Config::DEFAULT_RX_TIMEOUT_US,
    }
}

fn descriptor(bus: &mut RecordingBus, config: Config, bits: u32) -> Descriptor {
    bus.set_reg(BASE + REG_DATA_WIDTH, 32);
    let mut desc = Descriptor::new(bus, config).unwrap();
    desc.set_word_width(bits).unwrap();
    bus.clear_log();
    desc
}

#[test]
fn write_message_streams_program_then_data_in_order() {
    let mut bus = RecordingBus::new();
    let mut delay = CountingDelay::new();
    let mut desc = descriptor(&mut bus, config(), 16);

    let mut msg = Message::new(vec![
        SpiOp::AssertCs,
        SpiOp::Write { bytes: 2 },
        SpiOp::DeassertCs,
    ]);
    msg.tx.copy_from_slice(&[0xab, 0xcd]);

    desc.execute(&mut bus, &mut delay, &mut msg).unwrap();

    assert_eq!(
        bus.writes(),
        &[
            (BASE + REG_CMD_FIFO, 0x2000), // clock divider
            (BASE + REG_CMD_FIFO, 0x2100), // protocol config
            (BASE + REG_CMD_FIFO, 0x2210), // width 16
            (BASE + REG_CMD_FIFO, 0x10f7), // assert CS 3
            (BASE + REG_CMD_FIFO, 0x0200), // write 1 word
            (BASE + REG_CMD_FIFO, 0x10ff), // deassert
            (BASE + REG_CMD_FIFO, 0x3000), // sync
            (BASE + REG_SDO_FIFO, 0xabcd),
        ]
    );
    assert_eq!(delay.total_us(), 0, "a pure write needs no rx polling");
}

#[test]
fn read_message_drains_the_rx_fifo_into_the_buffer() {
    let mut bus = RecordingBus::new();
    let mut delay = CountingDelay::new();
    let mut desc = descriptor(&mut bus, config(), 16);

    // First poll sees an empty FIFO, second sees both words ready.
    bus.push_read(BASE + REG_SDI_FIFO_LEVEL, 0);
    bus.push_read(BASE + REG_SDI_FIFO_LEVEL, 2);
    bus.push_read(BASE + REG_SDI_FIFO, 0x1234);
    bus.push_read(BASE + REG_SDI_FIFO, 0x5678);

    let mut msg = Message::new(vec![
        SpiOp::AssertCs,
        SpiOp::Read { bytes: 4 },
        SpiOp::DeassertCs,
    ]);
    desc.execute(&mut bus, &mut delay, &mut msg).unwrap();

    assert_eq!(msg.rx, vec![0x12, 0x34, 0x56, 0x78]);
    assert_eq!(delay.total_us(), 10, "one empty poll, one poll interval");
    assert!(bus.writes_to(BASE + REG_SDO_FIFO).is_empty());
}

#[test]
fn partial_words_unpack_only_the_requested_bytes() {
    let mut bus = RecordingBus::new();
    let mut delay = CountingDelay::new();
    let mut desc = descriptor(&mut bus, config(), 16);

    bus.push_read(BASE + REG_SDI_FIFO_LEVEL, 2);
    bus.push_read(BASE + REG_SDI_FIFO, 0xaabb);
    bus.push_read(BASE + REG_SDI_FIFO, 0xcc00);

    // 3 bytes at 16 bits is 2 words with one pad byte.
    let mut msg = Message::new(vec![SpiOp::Read { bytes: 3 }]);
    desc.execute(&mut bus, &mut delay, &mut msg).unwrap();
    assert_eq!(msg.rx, vec![0xaa, 0xbb, 0xcc]);
}

#[test]
fn rx_starvation_times_out_within_the_budget() {
    let mut bus = RecordingBus::new();
    let mut delay = CountingDelay::new();
    let mut cfg = config();
    cfg.rx_timeout_us = 100;
    let mut desc = descriptor(&mut bus, cfg, 16);

    let mut msg = Message::new(vec![SpiOp::Read { bytes: 4 }]);
    let err = desc.execute(&mut bus, &mut delay, &mut msg).unwrap_err();
    assert_eq!(
        err,
        Error::RxTimeout {
            expected: 2,
            received: 0
        }
    );
    assert_eq!(delay.total_us(), 100);
}

#[test]
fn mismatched_buffers_fail_before_any_register_write() {
    let mut bus = RecordingBus::new();
    let mut delay = CountingDelay::new();
    let mut desc = descriptor(&mut bus, config(), 16);

    let mut msg = Message::new(vec![SpiOp::Read { bytes: 4 }]);
    msg.rx.truncate(1);

    let err = desc.execute(&mut bus, &mut delay, &mut msg).unwrap_err();
    assert_eq!(
        err,
        Error::BufferLength {
            expected: 4,
            actual: 1
        }
    );
    assert!(bus.writes().is_empty());
}
