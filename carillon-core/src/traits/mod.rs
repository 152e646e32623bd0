//! Collaborator traits
//!
//! These traits define the interface between the complications and the
//! hardware-specific display and actuator implementations.

pub mod buzzer;
pub mod display;

pub use buzzer::ToneOutput;
pub use display::{bcd_high, bcd_low, Digit, DigitBuffer, DisplaySink, NUM_DIGITS};
