//! Carillon - Clock Complications Firmware
//!
//! Main firmware binary for RP2040-based digit-tube clocks: countdown
//! timer, stopwatch, wall-clock alarm and melody playback, coordinated by
//! a single poll-driven console.
//!
//! Named after the carillon, a tower instrument of bells.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use {defmt_rtt as _, panic_probe as _};

use carillon_core::alarm::AlarmSettings;
use carillon_drivers::GpioBuzzer;

mod channels;
mod console;
mod tasks;
mod wall_clock;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Carillon firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Buzzer on GPIO15, driven active-high through a transistor stage
    let buzzer = GpioBuzzer::new_active_high(Output::new(p.PIN_15, Level::Low));

    // Alarm indicator LED on GPIO14
    let indicator_led = Output::new(p.PIN_14, Level::Low);

    // Front-panel buttons, active-low with internal pull-ups
    let mode = Input::new(p.PIN_10, Pull::Up);
    let set = Input::new(p.PIN_11, Pull::Up);
    let plus = Input::new(p.PIN_12, Pull::Up);
    let minus = Input::new(p.PIN_13, Pull::Up);

    info!("GPIO initialized");

    // Alarm settings start from defaults until a persistence layer lands.
    let settings = AlarmSettings::default();

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::input_task(mode, set, plus, minus)).unwrap();
    spawner.spawn(tasks::display_task(indicator_led)).unwrap();
    spawner.spawn(tasks::controller_task(buzzer, settings)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
