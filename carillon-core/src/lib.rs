//! Board-agnostic clock complications for the Carillon firmware
//!
//! This crate contains all feature logic that does not depend on
//! specific hardware implementations:
//!
//! - Time-value arithmetic shared by the timer components
//! - Melody playback over a binary tone output
//! - Countdown timer state machine
//! - Stopwatch state machine
//! - Wall-clock alarm with snooze and weekday filtering
//! - Collaborator traits (display sink, tone output)
//!
//! Everything here is polled cooperatively: a time base calls `tick()` on
//! the active timers, and a single poll loop calls each component's
//! `poll()` every cycle. No component blocks or spins.

#![no_std]
#![deny(unsafe_code)]

// Host tests link std (proptest).
#[cfg(test)]
extern crate std;

pub mod alarm;
pub mod chrono;
pub mod countdown;
pub mod melody;
pub mod stopwatch;
pub mod traits;

/// Run-state transition reported by a timer component.
///
/// Emitted exactly once per actual transition. The scheduler uses this to
/// attach or detach the component's tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunChange {
    /// The component began running.
    Started,
    /// The component stopped running.
    Stopped,
}
