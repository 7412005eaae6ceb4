//! Slash controller abstraction.

use crate::protocol::PacketBuilder;

/// HID lighting controller.
pub(crate) trait HidController {
    /// HID vendor ID.
    fn vendor_id(&self) -> u16;

    /// HID product ID.
    fn product_id(&self) -> u16;

    /// Report ID prefixed to every packet.
    fn report_id(&self) -> u8;

    /// Packet builder for this controller's reports.
    fn packets(&self) -> PacketBuilder {
        PacketBuilder::new(self.report_id())
    }
}
