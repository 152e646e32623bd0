//! Buzzer output drivers

pub mod gpio;

pub use gpio::GpioBuzzer;
