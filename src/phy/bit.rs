// Bit domain type and conversions between bits, text and integers

use std::fmt;

use crate::error::BitParseError;

/// A single binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

/// Ordered bits, MSB first wherever a number is packed into them.
pub type BitSequence = Vec<Bit>;

impl Bit {
    pub fn flip(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub fn is_one(self) -> bool {
        self == Bit::One
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse operator input such as `"1011"` into bits.
pub fn parse_bits(text: &str) -> Result<BitSequence, BitParseError> {
    if text.is_empty() {
        return Err(BitParseError::Empty);
    }

    text.chars()
        .enumerate()
        .map(|(position, found)| {
            Bit::from_char(found).ok_or(BitParseError::InvalidCharacter {
                position,
                found,
            })
        })
        .collect()
}

pub fn bits_to_string(bits: &[Bit]) -> String {
    bits.iter()
        .map(|bit| bit.to_char())
        .collect()
}

/// Serialize bits for the wire: one ASCII `'0'`/`'1'` byte per bit.
pub fn bits_to_payload(bits: &[Bit]) -> Vec<u8> {
    bits.iter()
        .map(|bit| bit.to_char() as u8)
        .collect()
}

/// Strict wire parse. Returns the position and value of the first byte
/// that is not `'0'` or `'1'`.
pub fn payload_to_bits(payload: &[u8]) -> Result<BitSequence, (usize, u8)> {
    payload
        .iter()
        .enumerate()
        .map(|(position, &byte)| match byte {
            b'0' => Ok(Bit::Zero),
            b'1' => Ok(Bit::One),
            other => Err((position, other)),
        })
        .collect()
}

/// Convert a 16-bit value to bits (MSB first)
pub fn u16_to_bits(value: u16) -> [Bit; 16] {
    let mut bits = [Bit::Zero; 16];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = Bit::from((value >> (15 - i)) & 1 == 1);
    }
    bits
}

/// Pack up to 16 bits into a value (MSB first)
pub fn bits_to_u16(bits: &[Bit]) -> u16 {
    bits.iter()
        .take(16)
        .fold(0u16, |acc, &bit| (acc << 1) | bit as u16)
}
