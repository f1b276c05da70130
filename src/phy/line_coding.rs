// Manchester encoding: 0 -> [1, 0], 1 -> [0, 1]

use super::bit::{Bit, BitSequence};
use crate::error::DecodeError;
use crate::utils::consts::LINE_BITS_PER_BIT;

/// bits -> Manchester pairs, twice as long
pub fn manchester_encode(bits: &[Bit]) -> BitSequence {
    let mut encoded = Vec::with_capacity(encoded_len(bits.len()));

    for &bit in bits {
        match bit {
            // 0 -> high then low
            Bit::Zero => encoded.extend_from_slice(&[Bit::One, Bit::Zero]),
            // 1 -> low then high
            Bit::One => encoded.extend_from_slice(&[Bit::Zero, Bit::One]),
        }
    }

    encoded
}

/// Manchester pairs -> bits.
///
/// Stops at the first problem. A pair without a mid-bit transition is a
/// transmission error and no bit is guessed for it.
pub fn manchester_decode(encoded: &[Bit]) -> Result<BitSequence, DecodeError> {
    if encoded.len() % LINE_BITS_PER_BIT != 0 {
        return Err(DecodeError::OddLength { len: encoded.len() });
    }

    encoded
        .chunks_exact(LINE_BITS_PER_BIT)
        .enumerate()
        .map(|(i, pair)| match (pair[0], pair[1]) {
            (Bit::One, Bit::Zero) => Ok(Bit::Zero),
            (Bit::Zero, Bit::One) => Ok(Bit::One),
            observed => Err(DecodeError::InvalidPair {
                position: i * LINE_BITS_PER_BIT,
                observed,
            }),
        })
        .collect()
}

/// Number of line bits needed for `num_bits` data bits
pub fn encoded_len(num_bits: usize) -> usize {
    num_bits * LINE_BITS_PER_BIT
}
