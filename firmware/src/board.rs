//! Raspberry Pi Pico wiring.

use embassy_rp::gpio::{self, Flex};
use heartbeat::{HardwareFault, Level, PinController, PinId};

/// The on-board LED of the Pico is wired to GPIO 25
pub const LED_PIN: PinId = PinId::new(25);

/// Highest GPIO number of the RP2040 user bank
const MAX_PIN: u8 = 29;

/// [`PinController`] over one RP2040 GPIO.
///
/// The line is handed over as a [`Flex`] pin, which starts as an input and
/// only becomes an output in [`PinController::configure`]. `line` is the
/// GPIO number the [`Flex`] was created from, any other id is rejected.
pub struct FlexPin<'d> {
    flex: Flex<'d>,
    line: PinId,
}

impl<'d> FlexPin<'d> {
    pub fn new(flex: Flex<'d>, line: PinId) -> Self {
        FlexPin { flex, line }
    }

    fn check(&self, pin: PinId) -> Result<(), HardwareFault> {
        if pin.number() > MAX_PIN || pin != self.line {
            return Err(HardwareFault::InvalidPin(pin));
        }
        Ok(())
    }
}

impl PinController for FlexPin<'_> {
    fn configure(&mut self, pin: PinId) -> Result<(), HardwareFault> {
        self.check(pin)?;
        // Drive LOW as soon as the output driver is enabled
        self.flex.set_low();
        self.flex.set_as_output();
        Ok(())
    }

    fn set_level(&mut self, pin: PinId, level: Level) -> Result<(), HardwareFault> {
        self.check(pin)?;
        self.flex.set_level(match level {
            Level::High => gpio::Level::High,
            Level::Low => gpio::Level::Low,
        });
        Ok(())
    }
}
