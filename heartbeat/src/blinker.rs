//! The control loop.
//!
//! A [`Blinker`] walks through the following states:
//!
//! ```text
//!            configure ok
//!   Init ──────────────────► CycleHigh ◄──────┐
//!     │                          │ HIGH, wait  │ LOW, wait
//!     │ fault                    ▼             │
//!     └──────────► Fatal ◄── CycleLow ─────────┘
//!                   fault (any set_level)
//! ```
//!
//! `Fatal` has no outgoing transition. Once a fault is seen the blinker is
//! gone (it is consumed by [`Blinker::run`]) and no further pin operation can
//! be issued.

use core::fmt;

use embedded_hal_async::delay::DelayNs;

use crate::config::BlinkConfig;
use crate::pin::{HardwareFault, Level, PinController};
use crate::run::RunCondition;

/// State of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Init,
    CycleHigh,
    CycleLow,
    Fatal,
}

impl Phase {
    /// The state reached after the current one completes without a fault
    pub fn next(&self) -> Phase {
        match self {
            Phase::Init => Phase::CycleHigh,
            Phase::CycleHigh => Phase::CycleLow,
            Phase::CycleLow => Phase::CycleHigh,
            Phase::Fatal => Phase::Fatal,
        }
    }

    /// The level driven while in this state
    pub fn level(&self) -> Option<Level> {
        match self {
            Phase::CycleHigh => Some(Level::High),
            Phase::CycleLow => Some(Level::Low),
            Phase::Init | Phase::Fatal => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::CycleHigh => "cycle-high",
            Phase::CycleLow => "cycle-low",
            Phase::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Blinks one output line forever (or until the run condition says stop).
///
/// The blinker owns the pin controller and the delay source. `P` and `D`
/// may also be `&mut` borrows, which is how tests keep access to their
/// simulated hardware.
pub struct Blinker<P, D> {
    pin: P,
    delay: D,
    config: BlinkConfig,
    phase: Phase,
}

impl<P: PinController, D: DelayNs> Blinker<P, D> {
    pub fn new(pin: P, delay: D, config: BlinkConfig) -> Self {
        Blinker {
            pin,
            delay,
            config,
            phase: Phase::Init,
        }
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configures the pin, then runs full HIGH/LOW cycles while `condition`
    /// agrees.
    ///
    /// The blinker is consumed, so the pin is configured exactly once per
    /// blinker. Returns `Ok(())` when the condition stops the loop and the
    /// first [`HardwareFault`] otherwise; nothing touches the pin after a
    /// fault.
    pub async fn run<C: RunCondition>(mut self, condition: C) -> Result<(), HardwareFault> {
        let result = self.drive(condition).await;
        if let Err(fault) = result {
            error!("{} fault in {}: {}", self.config.pin, self.phase, fault);
            self.phase = Phase::Fatal;
        }
        result
    }
}

/// Private API
impl<P: PinController, D: DelayNs> Blinker<P, D> {
    async fn drive<C: RunCondition>(&mut self, mut condition: C) -> Result<(), HardwareFault> {
        self.pin.configure(self.config.pin)?;
        info!(
            "{} configured as output, half period {} ms",
            self.config.pin, self.config.half_period_ms
        );
        self.phase = self.phase.next();

        while condition.keep_running() {
            self.hold().await?;
            self.hold().await?;
        }
        Ok(())
    }

    /// Drives the level of the current phase and waits one half period
    async fn hold(&mut self) -> Result<(), HardwareFault> {
        let Some(level) = self.phase.level() else {
            return Ok(());
        };
        self.pin.set_level(self.config.pin, level)?;
        trace!("{} -> {}", self.config.pin, level);

        self.delay.delay_ms(self.config.half_period_ms).await;
        self.phase = self.phase.next();
        Ok(())
    }
}
