//! Slash lighting effects.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// Lighting effect.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Mode {
    Static,
    Bounce,
    Slash,
    Loading,
    BitStream,
    Transmission,
    Flow,
    Flux,
    Phantom,
    Spectrum,
    Hazard,
    Interfacing,
    Ramp,
    GameOver,
    Start,
    Buzzer,
}

impl Mode {
    /// Every mode, in firmware listing order.
    pub const ALL: [Mode; 16] = [
        Mode::Static,
        Mode::Bounce,
        Mode::Slash,
        Mode::Loading,
        Mode::BitStream,
        Mode::Transmission,
        Mode::Flow,
        Mode::Flux,
        Mode::Phantom,
        Mode::Spectrum,
        Mode::Hazard,
        Mode::Interfacing,
        Mode::Ramp,
        Mode::GameOver,
        Mode::Start,
        Mode::Buzzer,
    ];

    /// Convert mode to the Slash wire format.
    pub const fn code(self) -> u8 {
        match self {
            Mode::Static => 0x06,
            Mode::Bounce => 0x10,
            Mode::Slash => 0x12,
            Mode::Loading => 0x13,
            Mode::BitStream => 0x1d,
            Mode::Transmission => 0x1a,
            Mode::Flow => 0x19,
            Mode::Flux => 0x25,
            Mode::Phantom => 0x24,
            Mode::Spectrum => 0x26,
            Mode::Hazard => 0x32,
            Mode::Interfacing => 0x33,
            Mode::Ramp => 0x34,
            Mode::GameOver => 0x42,
            Mode::Start => 0x43,
            Mode::Buzzer => 0x44,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Static => "Static",
            Mode::Bounce => "Bounce",
            Mode::Slash => "Slash",
            Mode::Loading => "Loading",
            Mode::BitStream => "BitStream",
            Mode::Transmission => "Transmission",
            Mode::Flow => "Flow",
            Mode::Flux => "Flux",
            Mode::Phantom => "Phantom",
            Mode::Spectrum => "Spectrum",
            Mode::Hazard => "Hazard",
            Mode::Interfacing => "Interfacing",
            Mode::Ramp => "Ramp",
            Mode::GameOver => "GameOver",
            Mode::Start => "Start",
            Mode::Buzzer => "Buzzer",
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
