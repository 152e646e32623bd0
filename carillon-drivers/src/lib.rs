//! Hardware drivers for the Carillon clock
//!
//! Implementations of the `carillon-core` output traits on top of
//! `embedded-hal` 1.0 pins.

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;

pub use buzzer::GpioBuzzer;
