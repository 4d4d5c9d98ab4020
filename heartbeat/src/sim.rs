//! Software stand-ins for the hardware and the clock.
//!
//! A [`Timeline`] holds a virtual clock and the log of everything that
//! happened to the pin. [`SimPin`] and [`SimClock`] borrow the same timeline,
//! so every pin event is stamped with the virtual time at which it was
//! issued and no test ever waits on the wall clock.
//!
//! ```ignore
//! use heartbeat::sim::{SimClock, SimPin, Timeline};
//! use heartbeat::{BlinkConfig, Blinker, Cycles, Level};
//!
//! let timeline = Timeline::new();
//! let blinker = Blinker::new(
//!     SimPin::new(&timeline),
//!     SimClock::new(&timeline),
//!     BlinkConfig::default(),
//! );
//! embassy_futures::block_on(blinker.run(&mut Cycles(1))).unwrap();
//!
//! assert_eq!(timeline.levels().as_slice(), &[(0, Level::High), (250, Level::Low)]);
//! assert_eq!(timeline.now_ms(), 500);
//! ```

use core::cell::{Cell, RefCell};

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::pin::{Direction, HardwareFault, Level, PinController, PinId};
use crate::run::RunCondition;

/// Number of events a [`Timeline`] keeps. Later events are dropped and
/// [`Timeline::is_truncated`] turns `true`.
pub const CAPACITY: usize = 128;

const NS_PER_MS: u64 = 1_000_000;

/// Highest GPIO number of the RP2040 user bank
pub const RP2040_MAX_PIN: u8 = 29;

/// Something that happened on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Configured { pin: PinId, at_ns: u64 },
    Level { pin: PinId, level: Level, at_ns: u64 },
    Delay { ns: u64, at_ns: u64 },
}

/// Virtual clock plus the event log shared by [`SimPin`] and [`SimClock`].
#[derive(Debug, Default)]
pub struct Timeline {
    now_ns: Cell<u64>,
    events: RefCell<Vec<Event, CAPACITY>>,
    truncated: Cell<bool>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ns(&self) -> u64 {
        self.now_ns.get()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ns.get() / NS_PER_MS
    }

    /// Copy of the event log
    pub fn events(&self) -> Vec<Event, CAPACITY> {
        self.events.borrow().clone()
    }

    /// Every level written, with the virtual time in milliseconds
    pub fn levels(&self) -> Vec<(u64, Level), CAPACITY> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::Level { level, at_ns, .. } => Some((at_ns / NS_PER_MS, level)),
                _ => None,
            })
            .collect()
    }

    /// How many times `configure` was called
    pub fn configure_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::Configured { .. }))
            .count()
    }

    /// Whether the log ran out of capacity
    pub fn is_truncated(&self) -> bool {
        self.truncated.get()
    }

    fn record(&self, event: Event) {
        if self.events.borrow_mut().push(event).is_err() {
            self.truncated.set(true);
        }
    }

    fn advance(&self, ns: u64) {
        let at_ns = self.now_ns.get();
        self.record(Event::Delay { ns, at_ns });
        self.now_ns.set(at_ns.saturating_add(ns));
    }
}

/// Simulated output pin.
///
/// Accepts the RP2040 GPIO numbers by default. Faults can be injected for
/// `configure` or after a given number of level writes.
#[derive(Debug)]
pub struct SimPin<'a> {
    timeline: &'a Timeline,
    direction: Direction,
    max_pin: u8,
    configure_fault: bool,
    writes_before_fault: Option<u32>,
    writes: u32,
}

impl<'a> SimPin<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        SimPin {
            timeline,
            direction: Direction::Input,
            max_pin: RP2040_MAX_PIN,
            configure_fault: false,
            writes_before_fault: None,
            writes: 0,
        }
    }

    /// Pins above `max_pin` are rejected with [`HardwareFault::InvalidPin`]
    pub fn with_max_pin(mut self, max_pin: u8) -> Self {
        self.max_pin = max_pin;
        self
    }

    /// `configure` fails with [`HardwareFault::Unavailable`]
    pub fn failing_configure(mut self) -> Self {
        self.configure_fault = true;
        self
    }

    /// The write after `writes` successful ones, and every later one, fails
    /// with [`HardwareFault::Unavailable`]
    pub fn failing_after(mut self, writes: u32) -> Self {
        self.writes_before_fault = Some(writes);
        self
    }

    /// Pins come out of reset as inputs
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn check(&self, pin: PinId) -> Result<(), HardwareFault> {
        if pin.number() > self.max_pin {
            return Err(HardwareFault::InvalidPin(pin));
        }
        Ok(())
    }
}

impl PinController for SimPin<'_> {
    fn configure(&mut self, pin: PinId) -> Result<(), HardwareFault> {
        let at_ns = self.timeline.now_ns();
        self.timeline.record(Event::Configured { pin, at_ns });
        self.check(pin)?;
        if self.configure_fault {
            return Err(HardwareFault::Unavailable(pin));
        }
        self.direction = Direction::Output;
        Ok(())
    }

    fn set_level(&mut self, pin: PinId, level: Level) -> Result<(), HardwareFault> {
        self.check(pin)?;
        if self
            .writes_before_fault
            .is_some_and(|limit| self.writes >= limit)
        {
            return Err(HardwareFault::Unavailable(pin));
        }
        self.writes += 1;
        let at_ns = self.timeline.now_ns();
        self.timeline.record(Event::Level { pin, level, at_ns });
        Ok(())
    }
}

/// Delay source that advances the virtual clock instead of waiting.
#[derive(Debug, Clone, Copy)]
pub struct SimClock<'a> {
    timeline: &'a Timeline,
}

impl<'a> SimClock<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        SimClock { timeline }
    }
}

impl DelayNs for SimClock<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.timeline.advance(u64::from(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.timeline.advance(u64::from(us) * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.timeline.advance(u64::from(ms) * NS_PER_MS);
    }
}

/// Keeps running until the virtual clock reaches the deadline.
#[derive(Debug, Clone, Copy)]
pub struct Deadline<'a> {
    timeline: &'a Timeline,
    until_ns: u64,
}

impl<'a> Deadline<'a> {
    pub fn after_ms(timeline: &'a Timeline, ms: u64) -> Self {
        Deadline {
            timeline,
            until_ns: timeline.now_ns().saturating_add(ms * NS_PER_MS),
        }
    }
}

impl RunCondition for Deadline<'_> {
    fn keep_running(&mut self) -> bool {
        self.timeline.now_ns() < self.until_ns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn pin_records_configure_and_levels() {
        let timeline = Timeline::new();
        let mut pin = SimPin::new(&timeline);
        let led = PinId::new(25);

        assert_eq!(pin.direction(), Direction::Input);
        pin.configure(led).unwrap();
        assert_eq!(pin.direction(), Direction::Output);
        pin.set_level(led, Level::High).unwrap();

        assert_eq!(
            timeline.events().as_slice(),
            &[
                Event::Configured { pin: led, at_ns: 0 },
                Event::Level {
                    pin: led,
                    level: Level::High,
                    at_ns: 0
                },
            ]
        );
        assert_eq!(timeline.configure_count(), 1);
    }

    #[test]
    fn pin_rejects_out_of_range_ids() {
        let timeline = Timeline::new();
        let mut pin = SimPin::new(&timeline);

        assert_eq!(
            pin.configure(PinId::new(30)),
            Err(HardwareFault::InvalidPin(PinId::new(30)))
        );
        assert_eq!(
            pin.set_level(PinId::new(30), Level::High),
            Err(HardwareFault::InvalidPin(PinId::new(30)))
        );
        assert!(pin.configure(PinId::new(29)).is_ok());

        let mut small = SimPin::new(&timeline).with_max_pin(7);
        assert!(small.configure(PinId::new(8)).is_err());
    }

    #[test]
    fn pin_injects_faults() {
        let timeline = Timeline::new();
        let led = PinId::new(25);

        let mut broken = SimPin::new(&timeline).failing_configure();
        assert_eq!(broken.configure(led), Err(HardwareFault::Unavailable(led)));
        assert_eq!(broken.direction(), Direction::Input);

        let mut flaky = SimPin::new(&timeline).failing_after(2);
        assert!(flaky.set_level(led, Level::High).is_ok());
        assert!(flaky.set_level(led, Level::Low).is_ok());
        assert_eq!(
            flaky.set_level(led, Level::High),
            Err(HardwareFault::Unavailable(led))
        );
        assert_eq!(timeline.levels().len(), 2);
    }

    #[test]
    fn clock_advances_virtual_time() {
        let timeline = Timeline::new();
        let mut clock = SimClock::new(&timeline);

        block_on(clock.delay_ms(250));
        block_on(clock.delay_us(500));
        block_on(clock.delay_ns(500_000));

        assert_eq!(timeline.now_ms(), 251);
        assert_eq!(timeline.now_ns(), 251_000_000);
    }

    #[test]
    fn deadline_stops_at_the_given_time() {
        let timeline = Timeline::new();
        let mut clock = SimClock::new(&timeline);
        let mut deadline = Deadline::after_ms(&timeline, 500);

        assert!(deadline.keep_running());
        block_on(clock.delay_ms(499));
        assert!(deadline.keep_running());
        block_on(clock.delay_ms(1));
        assert!(!deadline.keep_running());
    }

    #[test]
    fn log_marks_truncation() {
        let timeline = Timeline::new();
        let mut clock = SimClock::new(&timeline);

        for _ in 0..CAPACITY {
            block_on(clock.delay_ms(1));
        }
        assert!(!timeline.is_truncated());

        block_on(clock.delay_ms(1));
        assert!(timeline.is_truncated());
        assert_eq!(timeline.events().len(), CAPACITY);
        assert_eq!(timeline.now_ms(), CAPACITY as u64 + 1);
    }
}
