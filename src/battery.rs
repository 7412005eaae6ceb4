//! Battery charge visualization.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};
use crate::protocol::{CustomPattern, SEGMENTS};

/// Default sysfs battery capacity file.
pub const DEFAULT_CAPACITY_PATH: &str = "/sys/class/power_supply/BAT1/capacity";

/// Percentage assumed when the capacity cannot be read.
pub const FALLBACK_PERCENT: u8 = 100;

/// Percentage covered by a single segment.
const BRACKET: f64 = 14.2857;

/// Segment intensity per brightness level.
const LEVEL_INTENSITY: f64 = 85.333;

/// Render a battery percentage as a bar of lit segments.
///
/// The bar fills from the last pattern byte towards the first, with the
/// segment at the charge boundary partially lit in proportion to the
/// remainder. Intensities above `0xff` saturate.
pub fn encode(brightness: u32, percent: u8) -> CustomPattern {
    let percent = f64::from(percent);
    let filled = ((percent / BRACKET) as usize).min(SEGMENTS);
    let max_intensity = (f64::from(brightness) * LEVEL_INTENSITY) as u32;

    let mut pattern = [0; SEGMENTS];
    for segment in &mut pattern[SEGMENTS - filled..] {
        *segment = saturate(max_intensity);
    }

    if filled < SEGMENTS {
        let partial = (percent % BRACKET) * f64::from(max_intensity) / BRACKET;
        pattern[SEGMENTS - 1 - filled] = saturate(partial as u32);
    }

    pattern
}

fn saturate(intensity: u32) -> u8 {
    intensity.min(u32::from(u8::MAX)) as u8
}

/// Read the battery charge from a sysfs capacity file.
pub fn read_percent(path: &Path) -> Result<u8> {
    let content = fs::read_to_string(path)
        .map_err(|err| Error::BatteryReadFailure(format!("{}: {err}", path.display())))?;

    let percent: i64 = content
        .trim()
        .parse()
        .map_err(|err| Error::BatteryReadFailure(format!("{}: {err}", path.display())))?;

    Ok(percent.clamp(0, 100) as u8)
}

/// Read the battery charge, assuming a full battery on failure.
pub fn percent_or_default(path: &Path) -> u8 {
    read_percent(path).unwrap_or_else(|err| {
        warn!("{err}, assuming {FALLBACK_PERCENT}%");
        FALLBACK_PERCENT
    })
}
