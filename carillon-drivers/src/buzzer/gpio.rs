//! GPIO buzzer output
//!
//! Drives a piezo or magnetic buzzer from a GPIO pin (directly or via a
//! transistor stage).

use carillon_core::traits::ToneOutput;
use embedded_hal::digital::OutputPin;

/// GPIO buzzer output
///
/// The pin can be configured as active-high (default) or active-low for
/// transistor stages that invert the drive.
pub struct GpioBuzzer<P> {
    pin: P,
    /// If true, buzzer ON = pin LOW
    inverted: bool,
    /// Current logical state (true = sounding)
    active: bool,
}

impl<P: OutputPin> GpioBuzzer<P> {
    /// Create a new GPIO buzzer output
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the buzzer sounds when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut buzzer = Self {
            pin,
            inverted,
            active: false,
        };
        // Ensure the buzzer starts silent
        buzzer.set_active(false);
        buzzer
    }

    /// Create a new GPIO buzzer with active-high drive
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO buzzer with active-low drive
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> ToneOutput for GpioBuzzer<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;

        // Infallible on RP2040 pins; a failed write elsewhere leaves the
        // shadow state authoritative.
        if active != self.inverted {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
