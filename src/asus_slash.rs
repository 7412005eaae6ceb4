//! ASUS ROG Slash lightbar variants.

use crate::controller::HidController;

const ASUS_VENDOR_ID: u16 = 0x0b05;

/// Slash lightbar on the 0x19B6 keyboard controller.
pub struct AsusSlash;

impl HidController for AsusSlash {
    fn vendor_id(&self) -> u16 {
        ASUS_VENDOR_ID
    }

    fn product_id(&self) -> u16 {
        0x19b6
    }

    fn report_id(&self) -> u8 {
        0x5d
    }
}

/// Regular Slash device.
pub struct AsusSlashRegular;

impl HidController for AsusSlashRegular {
    fn vendor_id(&self) -> u16 {
        ASUS_VENDOR_ID
    }

    fn product_id(&self) -> u16 {
        0x193b
    }

    fn report_id(&self) -> u8 {
        0x5e
    }
}
