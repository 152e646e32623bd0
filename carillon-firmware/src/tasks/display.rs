//! Display task
//!
//! Consumes rendered frames from the controller and applies the panel
//! blink timing. Drives the alarm indicator LED directly; the digit values
//! are traced over RTT until the tube driver board is wired up.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use crate::channels::{Frame, FRAME_SIGNAL};

/// Blink half-period applied to blinking digits
const BLINK_INTERVAL_MS: u64 = 500;

/// Display task - applies frames and blink phase to the panel outputs
#[embassy_executor::task]
pub async fn display_task(mut indicator_led: Output<'static>) {
    info!("Display task started");

    let mut blink_ticker = Ticker::every(Duration::from_millis(BLINK_INTERVAL_MS));
    let mut frame: Option<Frame> = None;
    let mut blink_visible = true;

    loop {
        match select(FRAME_SIGNAL.wait(), blink_ticker.next()).await {
            Either::First(new_frame) => {
                if new_frame.blink_phase_reset {
                    blink_visible = true;
                    blink_ticker.reset();
                }

                if indicator_changed(&frame, &new_frame) {
                    if new_frame.indicator {
                        indicator_led.set_high();
                    } else {
                        indicator_led.set_low();
                    }
                }

                trace!(
                    "Frame: {:?} blink_all={}",
                    new_frame.digits,
                    new_frame.blink_all
                );
                frame = Some(new_frame);
            }
            Either::Second(()) => {
                blink_visible = !blink_visible;
                if let Some(frame) = &frame {
                    if frame.blink_all && !blink_visible {
                        trace!("Blink phase: panel dark");
                    }
                }
            }
        }
    }
}

fn indicator_changed(previous: &Option<Frame>, next: &Frame) -> bool {
    match previous {
        Some(frame) => frame.indicator != next.indicator,
        None => true,
    }
}
