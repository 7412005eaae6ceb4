//! Error types.

use hidapi::HidError;
use thiserror::Error;

/// Slash control error.
#[derive(Error, Debug)]
pub enum Error {
    /// Mode name is not part of the device's mode table.
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// Custom pattern does not have exactly one byte per segment.
    #[error("custom pattern must be 7 bytes (14 hex digits), got {0} bytes")]
    InvalidPatternLength(usize),

    #[error("invalid hex pattern: {0:?}")]
    InvalidHex(String),

    /// Opening the HID device failed.
    #[error("unable to open device: {0} (root permissions required)")]
    DeviceUnavailable(#[source] HidError),

    #[error("unable to write report: {0}")]
    Write(#[source] HidError),

    #[error("unable to read battery capacity: {0}")]
    BatteryReadFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
