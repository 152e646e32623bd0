//! Button input task
//!
//! Polls the four front-panel buttons and pushes debounced press events
//! onto the button channel.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use crate::channels::{Button, BUTTON_CHANNEL};

/// Button poll interval; doubles as the debounce window
const POLL_INTERVAL_MS: u64 = 20;

/// Input task - scans the buttons and reports falling edges
///
/// Buttons are wired active-low with internal pull-ups.
#[embassy_executor::task]
pub async fn input_task(
    mode: Input<'static>,
    set: Input<'static>,
    plus: Input<'static>,
    minus: Input<'static>,
) {
    info!("Input task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    let pins = [
        (mode, Button::Mode),
        (set, Button::Set),
        (plus, Button::Plus),
        (minus, Button::Minus),
    ];
    let mut was_pressed = [false; 4];

    loop {
        ticker.next().await;

        for (i, (pin, button)) in pins.iter().enumerate() {
            let pressed = pin.is_low();
            if pressed && !was_pressed[i] {
                debug!("Button pressed: {:?}", button);
                // Drop the press if the controller is backed up
                let _ = BUTTON_CHANNEL.try_send(*button);
            }
            was_pressed[i] = pressed;
        }
    }
}
