//! Main controller task
//!
//! Owns the console and feeds it tick timestamps and button presses.
//! Publishes a rendered frame after every update.

use defmt::*;
use embassy_futures::select::{select, Either};

use carillon_core::alarm::AlarmSettings;
use carillon_core::chrono::Millis;
use carillon_core::traits::ToneOutput;
use carillon_core::RunChange;
use carillon_drivers::GpioBuzzer;
use embassy_rp::gpio::Output;

use crate::channels::{Frame, BUTTON_CHANNEL, FRAME_SIGNAL};
use crate::console::Console;
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(buzzer: GpioBuzzer<Output<'static>>, settings: AlarmSettings) {
    info!("Controller task started");

    let mut console = Console::new(buzzer, settings);

    publish_frame(&mut console);

    loop {
        let change = match select(TICK_SIGNAL.wait(), BUTTON_CHANNEL.receive()).await {
            Either::First(now_ms) => console.on_tick(now_ms as Millis),
            Either::Second(button) => {
                debug!("Button: {:?}", button);
                let now_ms = embassy_time::Instant::now().as_millis() as Millis;
                console.on_button(now_ms, button)
            }
        };

        match change {
            Some(RunChange::Started) => debug!("Complication started"),
            Some(RunChange::Stopped) => debug!("Complication stopped"),
            None => {}
        }

        publish_frame(&mut console);
    }
}

fn publish_frame<O: ToneOutput>(console: &mut Console<O>) {
    let digits = *console.current_digits();
    let indicator = console.alarm_indicator();
    let panel = console.panel();
    FRAME_SIGNAL.signal(Frame {
        digits,
        blink_all: panel.blink_all(),
        blink_phase_reset: panel.take_phase_reset(),
        indicator,
    });
}
