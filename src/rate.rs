/*
 * Update Rate Module
 *
 * The animation rate is chosen in Hz from a bounded, stepped range and turned
 * into a timer period. The bounds keep the period between 20 ms and 200 ms,
 * so a zero rate can never reach the period computation.
 */

use std::time::Duration;

use thiserror::Error;

pub const MIN_RATE_HZ: u32 = 5;
pub const MAX_RATE_HZ: u32 = 50;
pub const RATE_STEP_HZ: u32 = 5;
pub const DEFAULT_RATE_HZ: u32 = 25;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    #[error("update rate {0} Hz is outside 5..=50 Hz")]
    OutOfRange(u32),
    #[error("update rate {0} Hz is not a multiple of 5 Hz")]
    OffStep(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UpdateRate(u32);

impl UpdateRate {
    pub fn hz(self) -> u32 {
        self.0
    }

    // Clamp into bounds and round to the nearest step
    pub fn snapped(hz: u32) -> Self {
        let clamped = hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ);
        let steps = (clamped + RATE_STEP_HZ / 2) / RATE_STEP_HZ;
        Self((steps * RATE_STEP_HZ).clamp(MIN_RATE_HZ, MAX_RATE_HZ))
    }

    // Timer period for this rate, `round(1000 / hz)` milliseconds.
    pub fn period(self) -> Duration {
        debug_assert!(self.0 >= MIN_RATE_HZ, "update rate below minimum");
        let millis = (1000.0 / f64::from(self.0)).round() as u64;
        debug_assert!(millis > 0, "derived timer period must be positive");
        Duration::from_millis(millis)
    }
}

impl Default for UpdateRate {
    fn default() -> Self {
        Self(DEFAULT_RATE_HZ)
    }
}

impl TryFrom<u32> for UpdateRate {
    type Error = RateError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        if !(MIN_RATE_HZ..=MAX_RATE_HZ).contains(&hz) {
            return Err(RateError::OutOfRange(hz));
        }
        if hz % RATE_STEP_HZ != 0 {
            return Err(RateError::OffStep(hz));
        }
        Ok(Self(hz))
    }
}
