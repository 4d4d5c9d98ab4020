//! Hardware pin controller capability.
//!
//! The control loop never touches a HAL directly. It talks to a
//! [`PinController`], which exposes exactly two operations over one physical
//! output line: configure the line as an output and drive it to a level.

use core::fmt;

/// Identifies a physical GPIO line, e.g. `PinId::new(25)` for the on-board
/// LED of a Raspberry Pi Pico.
///
/// [`Copy`] and [`Clone`] are derived so that the identifier can be passed
/// by value on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(u8);

impl PinId {
    pub const fn new(number: u8) -> Self {
        PinId(number)
    }

    /// Returns the GPIO number
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Direction of a pin. The heartbeat only ever uses [`Direction::Output`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Logical level of an output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Returns the opposite level
    pub const fn toggled(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

/// The only error kind of the system: the pin could not be configured or
/// driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareFault {
    /// The identifier does not name an output capable line of this
    /// controller
    InvalidPin(PinId),
    /// The line exists but the peripheral did not accept the request
    Unavailable(PinId),
}

impl HardwareFault {
    /// Returns the pin the fault was raised for
    pub const fn pin(&self) -> PinId {
        match self {
            HardwareFault::InvalidPin(pin) | HardwareFault::Unavailable(pin) => *pin,
        }
    }
}

impl fmt::Display for HardwareFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareFault::InvalidPin(pin) => write!(f, "{pin} is not a valid output line"),
            HardwareFault::Unavailable(pin) => write!(f, "{pin} is not available"),
        }
    }
}

/// Narrow capability over one output line.
///
/// `configure` must succeed once before any call to `set_level`. The
/// controller does not check that ordering, the caller owns it (see
/// [`Blinker`](crate::Blinker)).
pub trait PinController {
    /// Binds `pin` to an output capable line and sets its direction to
    /// [`Direction::Output`].
    fn configure(&mut self, pin: PinId) -> Result<(), HardwareFault>;

    /// Drives `pin` to `level`.
    fn set_level(&mut self, pin: PinId, level: Level) -> Result<(), HardwareFault>;
}

impl<T: PinController + ?Sized> PinController for &mut T {
    fn configure(&mut self, pin: PinId) -> Result<(), HardwareFault> {
        T::configure(self, pin)
    }

    fn set_level(&mut self, pin: PinId, level: Level) -> Result<(), HardwareFault> {
        T::set_level(self, pin, level)
    }
}
