//! Heartbeat LED control loop.
//!
//! The crate drives a single digital output through two phases: a one-time
//! pin configuration followed by an endless HIGH/LOW cycle with a fixed
//! half period. Hardware access and time are both capabilities passed in by
//! the caller:
//! - a [`PinController`] that can configure a line as output and drive it
//! - an async [`DelayNs`](embedded_hal_async::delay::DelayNs) source
//!
//! The firmware plugs in the RP2040 HAL and the embassy timer, tests plug in
//! the simulation from [`sim`].
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod blinker;
pub mod config;
pub mod pin;
pub mod run;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use blinker::{Blinker, Phase};
pub use config::BlinkConfig;
pub use pin::{Direction, HardwareFault, Level, PinController, PinId};
pub use run::{Cancel, Cycles, Forever, RunCondition};
