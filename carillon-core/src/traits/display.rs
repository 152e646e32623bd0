//! Display sink trait and per-digit projection records
//!
//! Each complication owns its own [`DigitBuffer`] projection; the
//! [`DisplaySink`] carries only the global operations that touch shared
//! display state (blink control). Multiplexing, brightness and blanking
//! timing belong to the display driver, not this layer.

use core::ops::{Index, IndexMut};

/// Number of digit positions on the panel.
pub const NUM_DIGITS: usize = 6;

/// One digit of a display projection, least significant position first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit {
    /// Digit value, 0-9.
    pub value: u8,
    /// Suppress the digit entirely.
    pub blank: bool,
    /// Blink this digit.
    pub blink: bool,
    /// Light the decimal-point symbol next to this digit.
    pub comma: bool,
}

/// Fixed buffer of digit records owned by a complication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitBuffer(pub [Digit; NUM_DIGITS]);

impl DigitBuffer {
    /// Clear every digit record back to its default.
    pub fn reset(&mut self) {
        self.0 = [Digit::default(); NUM_DIGITS];
    }

    /// Set the per-digit blink flag on every position.
    pub fn blink_all_digits(&mut self, blink: bool) {
        for digit in &mut self.0 {
            digit.blink = blink;
        }
    }
}

impl Index<usize> for DigitBuffer {
    type Output = Digit;

    fn index(&self, index: usize) -> &Digit {
        &self.0[index]
    }
}

impl IndexMut<usize> for DigitBuffer {
    fn index_mut(&mut self, index: usize) -> &mut Digit {
        &mut self.0[index]
    }
}

/// Global operations on the shared display driver.
pub trait DisplaySink {
    /// Force-blink every digit, disregarding per-digit blink flags.
    fn blink_all(&mut self, enable: bool);

    /// Restart the blink phase so a freshly started blink is immediately
    /// visible instead of joining mid-cycle.
    fn reset_blinking(&mut self);
}

/// Low BCD digit of a two-digit decimal value.
#[inline]
pub const fn bcd_low(value: u8) -> u8 {
    value % 10
}

/// High BCD digit of a two-digit decimal value.
#[inline]
pub const fn bcd_high(value: u8) -> u8 {
    value / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcd_split() {
        assert_eq!((bcd_high(59), bcd_low(59)), (5, 9));
        assert_eq!((bcd_high(7), bcd_low(7)), (0, 7));
        assert_eq!((bcd_high(0), bcd_low(0)), (0, 0));
    }

    #[test]
    fn buffer_reset_clears_flags() {
        let mut buffer = DigitBuffer::default();
        buffer[2].value = 5;
        buffer[2].comma = true;
        buffer.blink_all_digits(true);

        buffer.reset();
        assert_eq!(buffer, DigitBuffer::default());
    }
}
