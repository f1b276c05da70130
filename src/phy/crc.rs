// CRC16 over a bit sequence
// Polynomial: x^16 + x^12 + x^5 + 1 (0x1021), zero seed, no reflection, no final XOR

use super::bit::Bit;
use crate::utils::consts::{CRC_POLYNOMIAL, CRC_WIDTH};

/// Bitwise CRC-16 engine. The register width is fixed at [`CRC_WIDTH`];
/// the polynomial is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    polynomial: u16,
}

impl Crc16 {
    pub const CCITT: Crc16 = Crc16::new(CRC_POLYNOMIAL);

    pub const fn new(polynomial: u16) -> Self {
        Self { polynomial }
    }

    pub fn polynomial(&self) -> u16 {
        self.polynomial
    }

    /// Run every bit through the register once, in order.
    pub fn checksum(&self, bits: &[Bit]) -> u16 {
        let mut crc: u16 = 0x0000;

        for &bit in bits {
            let msb = (crc >> (CRC_WIDTH - 1)) & 1 == 1;
            crc <<= 1;
            if msb ^ bit.is_one() {
                crc ^= self.polynomial;
            }
        }

        crc
    }

    pub fn verify(&self, bits: &[Bit], expected_crc: u16) -> bool {
        self.checksum(bits) == expected_crc
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::CCITT
    }
}

/// Calculate the CRC-16 of `bits` with the 0x1021 polynomial
pub fn crc16(bits: &[Bit]) -> u16 {
    Crc16::CCITT.checksum(bits)
}
