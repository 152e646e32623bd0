//! Tone output trait
//!
//! The melody player drives a single binary actuator (piezo buzzer or
//! transistor-switched beeper) through this trait.

/// Binary actuator output.
///
/// Implementations keep their own notion of the logical state so that
/// `is_active` never requires a hardware read.
pub trait ToneOutput {
    /// Drive the output active (sounding) or idle.
    fn set_active(&mut self, active: bool);

    /// Current logical output state.
    fn is_active(&self) -> bool;
}
