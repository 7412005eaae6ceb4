//! Slash HID report encoding.
//!
//! The command bytes were captured from the vendor software and carry no
//! documented meaning, every literal here must be sent exactly as written.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};
use crate::mode::Mode;

/// Number of segments on the Slash lightbar.
pub const SEGMENTS: usize = 7;

/// Largest report accepted by the device, including the report ID.
pub const MAX_REPORT_LEN: usize = 64;

/// Longest payload sent, the second mode selection report.
const MAX_PAYLOAD_LEN: usize = 16;

const _: () = assert!(MAX_PAYLOAD_LEN < MAX_REPORT_LEN);

/// Per-segment brightness, last segment first.
pub type CustomPattern = [u8; SEGMENTS];

/// Builds reports for a single device variant.
#[derive(Debug, Copy, Clone)]
pub struct PacketBuilder {
    report_id: u8,
}

impl PacketBuilder {
    pub const fn new(report_id: u8) -> Self {
        Self { report_id }
    }

    /// Prefix a payload with the report ID.
    fn packet(&self, payload: &[u8]) -> Bytes {
        debug_assert!(payload.len() <= MAX_PAYLOAD_LEN);

        let mut buf = BytesMut::with_capacity(payload.len() + 1);
        buf.put_u8(self.report_id);
        buf.put_slice(payload);
        buf.freeze()
    }

    /// Vendor handshake waking the controller up.
    pub fn wakeup_sequence(&self) -> [Bytes; 3] {
        [
            self.packet(b"ASUS Tech.Inc."),
            self.packet(&[0xc2]),
            self.packet(&[0xd1, 0x01, 0x00, 0x01]),
        ]
    }

    pub fn init_sequence(&self) -> [Bytes; 2] {
        [
            self.packet(&[0xd7, 0x00, 0x00, 0x01, 0xac]),
            self.packet(&[0xd2, 0x02, 0x01, 0x08, 0xab]),
        ]
    }

    /// Turn the lightbar on or off.
    ///
    /// The device expects `0x00` for on and `0x80` for off.
    pub fn set_enabled(&self, enabled: bool) -> Bytes {
        let state = if enabled { 0x00 } else { 0x80 };
        self.packet(&[0xd8, 0x02, 0x00, 0x01, state])
    }

    /// Persist the current configuration across reboots.
    pub fn save(&self) -> Bytes {
        self.packet(&[0xd4, 0x00, 0x00, 0x01, 0xab])
    }

    pub fn set_mode(&self, mode: Mode) -> [Bytes; 2] {
        let select = self.packet(&[0xd2, 0x03, 0x00, 0x0c]);

        let mut payload = BytesMut::with_capacity(MAX_PAYLOAD_LEN);
        payload.put_slice(&[0xd3, 0x04, 0x00, 0x0c, 0x01]);
        payload.put_u8(mode.code());
        payload.put_slice(&[0x02, 0x19, 0x03, 0x13, 0x04, 0x11, 0x05, 0x12, 0x06, 0x13]);

        [select, self.packet(&payload)]
    }

    /// Look up a mode by name and build its reports.
    pub fn set_mode_by_name(&self, name: &str) -> Result<[Bytes; 2]> {
        Ok(self.set_mode(name.parse()?))
    }

    /// Switch to custom mode and upload a per-segment pattern.
    pub fn set_custom(&self, pattern: &[u8]) -> Result<[Bytes; 4]> {
        if pattern.len() != SEGMENTS {
            return Err(Error::InvalidPatternLength(pattern.len()));
        }

        let mut data = BytesMut::with_capacity(4 + SEGMENTS);
        data.put_slice(&[0xd3, 0x00, 0x00, 0x07]);
        data.put_slice(pattern);

        Ok([
            self.packet(&[0xd2, 0x02, 0x01, 0x08, 0xac]),
            self.packet(&[0xd3, 0x03, 0x01, 0x08, 0xac, 0xff, 0xff, 0x01, 0x05, 0xff, 0xff]),
            self.packet(&[0xd4, 0x00, 0x00, 0x01, 0xac]),
            self.packet(&data),
        ])
    }
}

/// Parse a hex string like `ff00ff00ff00ff` into bytes.
///
/// An optional `0x` prefix and any whitespace are ignored.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits.strip_prefix("0x").unwrap_or(&digits);

    if digits.len() % 2 != 0 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(s.to_string()));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidHex(s.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT_ID: u8 = 0x5d;

    fn builder() -> PacketBuilder {
        PacketBuilder::new(REPORT_ID)
    }

    #[test]
    fn wakeup_order() {
        let packets = builder().wakeup_sequence();
        assert_eq!(&packets[0][..], b"\x5dASUS Tech.Inc.");
        assert_eq!(&packets[1][..], &[0x5d, 0xc2]);
        assert_eq!(&packets[2][..], &[0x5d, 0xd1, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn init() {
        let packets = builder().init_sequence();
        assert_eq!(&packets[0][..], &[0x5d, 0xd7, 0x00, 0x00, 0x01, 0xac]);
        assert_eq!(&packets[1][..], &[0x5d, 0xd2, 0x02, 0x01, 0x08, 0xab]);
    }

    #[test]
    fn enabled_is_inverted() {
        assert_eq!(builder().set_enabled(true).last(), Some(&0x00));
        assert_eq!(builder().set_enabled(false).last(), Some(&0x80));
        assert_eq!(&builder().set_enabled(false)[..5], &[0x5d, 0xd8, 0x02, 0x00, 0x01]);
    }

    #[test]
    fn save() {
        assert_eq!(&builder().save()[..], &[0x5d, 0xd4, 0x00, 0x00, 0x01, 0xab]);
    }

    #[test]
    fn mode_code_position() {
        for mode in Mode::ALL {
            let [select, effect] = builder().set_mode(mode);
            assert_eq!(&select[..], &[0x5d, 0xd2, 0x03, 0x00, 0x0c]);

            // Sixth payload byte, after the report ID.
            assert_eq!(effect[6], mode.code());
            assert_eq!(effect.len(), 17);
        }
    }

    #[test]
    fn mode_full_packet() {
        let [_, effect] = builder().set_mode(Mode::Flow);
        assert_eq!(&effect[..], &[
            0x5d, 0xd3, 0x04, 0x00, 0x0c, 0x01, 0x19, 0x02, 0x19, 0x03, 0x13, 0x04, 0x11, 0x05,
            0x12, 0x06, 0x13,
        ]);
    }

    #[test]
    fn unknown_mode_name() {
        assert!(matches!(builder().set_mode_by_name("Nope"), Err(Error::UnknownMode(_))));
    }

    #[test]
    fn custom_pattern() {
        let pattern = [1, 2, 3, 4, 5, 6, 7];
        let packets = builder().set_custom(&pattern).unwrap();

        assert_eq!(&packets[0][..], &[0x5d, 0xd2, 0x02, 0x01, 0x08, 0xac]);
        assert_eq!(&packets[1][..], &[
            0x5d, 0xd3, 0x03, 0x01, 0x08, 0xac, 0xff, 0xff, 0x01, 0x05, 0xff, 0xff
        ]);
        assert_eq!(&packets[2][..], &[0x5d, 0xd4, 0x00, 0x00, 0x01, 0xac]);
        assert_eq!(&packets[3][..], &[0x5d, 0xd3, 0x00, 0x00, 0x07, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn custom_pattern_length() {
        for len in [0, 6, 8, 14] {
            let pattern = vec![0xff; len];
            match builder().set_custom(&pattern) {
                Err(Error::InvalidPatternLength(n)) => assert_eq!(n, len),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn report_id_prefix() {
        let builder = PacketBuilder::new(0x5e);
        let mut packets = Vec::new();
        packets.extend(builder.wakeup_sequence());
        packets.extend(builder.init_sequence());
        packets.extend(builder.set_mode(Mode::Buzzer));
        packets.extend(builder.set_custom(&[0xff; SEGMENTS]).unwrap());
        packets.push(builder.set_enabled(true));
        packets.push(builder.save());

        for packet in packets {
            assert_eq!(packet[0], 0x5e);
            assert!(packet.len() <= MAX_PAYLOAD_LEN + 1);
            assert!(packet.len() <= MAX_REPORT_LEN);
        }
    }

    #[test]
    fn hex() {
        assert_eq!(parse_hex("ff00ff00ff00ff").unwrap(), vec![0xff, 0, 0xff, 0, 0xff, 0, 0xff]);
        assert_eq!(parse_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(parse_hex("01 02 0A").unwrap(), vec![1, 2, 10]);
        assert!(matches!(parse_hex("abc"), Err(Error::InvalidHex(_))));
        assert!(matches!(parse_hex("zz"), Err(Error::InvalidHex(_))));
        assert!(matches!(parse_hex("+f+f+f+f+f+f+f"), Err(Error::InvalidHex(_))));
        assert!(matches!(parse_hex("-1"), Err(Error::InvalidHex(_))));
    }
}
