use crate::pin::PinId;

/// GPIO of the on-board LED of a Raspberry Pi Pico
pub const DEFAULT_PIN: PinId = PinId::new(25);

/// Time each level is held, in milliseconds
pub const DEFAULT_HALF_PERIOD_MS: u32 = 250;

/// Which line to blink and how fast.
///
/// The value is fixed for the lifetime of a [`Blinker`](crate::Blinker),
/// it is handed over at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkConfig {
    pub pin: PinId,
    pub half_period_ms: u32,
}

impl BlinkConfig {
    pub const fn new(pin: PinId, half_period_ms: u32) -> Self {
        BlinkConfig {
            pin,
            half_period_ms,
        }
    }

    /// Duration of one HIGH + LOW cycle
    pub const fn period_ms(&self) -> u64 {
        2 * self.half_period_ms as u64
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        BlinkConfig::new(DEFAULT_PIN, DEFAULT_HALF_PERIOD_MS)
    }
}
