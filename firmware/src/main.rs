//! Heartbeat firmware for the Raspberry Pi Pico.
//!
//! Blinks the on-board LED (GPIO 25): HIGH for one half period, LOW for one
//! half period, for as long as the board is powered.
#![no_std]
#![no_main]

mod board;

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::Flex;
use embassy_time::Delay;
use heartbeat::{BlinkConfig, Blinker, Forever};
use panic_probe as _;

use crate::board::{FlexPin, LED_PIN};

/// Set at build time through `HEARTBEAT_HALF_PERIOD_MS`
const HALF_PERIOD_MS: u32 = match u32::from_str_radix(env!("HEARTBEAT_HALF_PERIOD_MS"), 10) {
    Ok(ms) => ms,
    Err(_) => panic!("HEARTBEAT_HALF_PERIOD_MS must be a number of milliseconds"),
};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let peripherals = embassy_rp::init(Default::default());
    info!("Device started");

    let config = BlinkConfig::new(LED_PIN, HALF_PERIOD_MS);
    let led = FlexPin::new(Flex::new(peripherals.PIN_25), LED_PIN);

    // This is the only task, so awaiting the delay stalls the whole
    // program for the half period.
    let blinker = Blinker::new(led, Delay, config);
    info!("Blinking {} every {} ms", config.pin, config.half_period_ms);

    match blinker.run(Forever).await {
        Ok(()) => info!("Heartbeat stopped"),
        Err(fault) => error!("Heartbeat halted: {}", fault),
    }

    // Halt: the pin is never touched again. Returning from `main` would
    // let the executor reset the pins, so park this task instead.
    core::future::pending::<()>().await;
}
