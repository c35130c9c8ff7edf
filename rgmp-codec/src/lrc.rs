//! Longitudinal redundancy check (LRC) for the request envelope
//!
//! The checksum byte closing a frame is the running XOR of every body byte,
//! i.e. everything after the size prefix and before the checksum itself.

use rgmp_core::{RgmpError, RgmpResult};

/// Running XOR checksum
#[derive(Debug, Clone, Default)]
pub struct LrcCalc {
    lrc_value: u8,
}

impl LrcCalc {
    /// Create a new LRC calculator
    pub fn new() -> Self {
        Self { lrc_value: 0 }
    }

    /// Reset to the initial state
    pub fn reset(&mut self) {
        self.lrc_value = 0;
    }

    /// Update with a single byte
    pub fn update(&mut self, data: u8) {
        self.lrc_value ^= data;
    }

    /// Update with multiple bytes
    pub fn update_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.update(byte);
        }
    }

    /// Current checksum value
    pub fn value(&self) -> u8 {
        self.lrc_value
    }

    /// Compare against the checksum byte received with the frame
    pub fn validate(&self, expected: u8) -> RgmpResult<()> {
        if self.lrc_value != expected {
            Err(RgmpError::ChecksumFailed {
                computed: self.lrc_value,
                expected,
            })
        } else {
            Ok(())
        }
    }
}

/// Checksum of `data` in one call
pub fn lrc(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, b| acc ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lrc_calc() {
        let mut calc = LrcCalc::new();
        calc.update(0x01);
        calc.update(0x02);
        calc.update(0x03);
        assert_eq!(calc.value(), 0x00);
        calc.update_bytes(&[0x60, 0x0f]);
        assert_eq!(calc.value(), 0x6f);
        assert_eq!(calc.value(), lrc(&[0x01, 0x02, 0x03, 0x60, 0x0f]));
    }

    #[test]
    fn test_lrc_reset() {
        let mut calc = LrcCalc::new();
        calc.update(0x55);
        calc.reset();
        assert_eq!(calc.value(), 0);
    }

    #[test]
    fn test_validate() {
        let mut calc = LrcCalc::new();
        calc.update_bytes(b"abc");
        assert!(calc.validate(lrc(b"abc")).is_ok());
        assert_eq!(
            calc.validate(0x00),
            Err(RgmpError::ChecksumFailed {
                computed: lrc(b"abc"),
                expected: 0x00
            })
        );
    }
}
