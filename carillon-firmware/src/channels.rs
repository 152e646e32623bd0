//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use carillon_core::traits::DigitBuffer;

/// Channel capacity for button events
const BUTTON_CHANNEL_SIZE: usize = 8;

/// Front-panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Cycle the active view
    Mode,
    /// Start/stop/confirm within the active view
    Set,
    /// Increase the highlighted value
    Plus,
    /// Decrease the highlighted value
    Minus,
}

/// Debounced button presses from the input task
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, Button, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// One rendered panel state, pushed by the controller after every update.
#[derive(Clone, Copy)]
pub struct Frame {
    /// Digit records of the active view
    pub digits: DigitBuffer,
    /// Force-blink the whole panel (ringing/paused states)
    pub blink_all: bool,
    /// Restart the blink phase before applying this frame
    pub blink_phase_reset: bool,
    /// Alarm armed/snooze indicator lamp
    pub indicator: bool,
}

/// Latest frame for the display task (newer frames overwrite older ones)
pub static FRAME_SIGNAL: Signal<CriticalSectionRawMutex, Frame> = Signal::new();
