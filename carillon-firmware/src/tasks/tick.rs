//! Tick task for time-based updates
//!
//! Provides the 100ms time base that drives the stopwatch directly and,
//! divided by ten, the countdown timer and wall clock.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Signal to notify the controller of a tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;

        // Milliseconds since boot; wraps after ~49 days, which the
        // controller's wrapping arithmetic tolerates.
        let now_ms = Instant::now().as_millis() as u32;

        TICK_SIGNAL.signal(now_ms);
    }
}
