//! Sender-side fault injection on frame bits.
//!
//! Every operation leaves its input untouched and returns the corrupted
//! copy. Random selection draws from a caller-supplied [`Rng`] so runs can
//! be replayed from a seed.

use std::fmt;

use rand::Rng;
use rand::seq::index;
use tracing::debug;

use crate::error::FaultError;
use crate::phy::{Bit, BitSequence};
use crate::utils::consts::{
    BURST_8, BURST_17, BURST_22, ISOLATED_FLIP_POS, MAX_FAULT_CHOICE,
    SINGLE_FLIP_POS,
};

/// Toggle the bit at `pos`. Out-of-range positions are ignored.
pub fn flip_bit(frame: &[Bit], pos: usize) -> BitSequence {
    let mut bits = frame.to_vec();
    if let Some(bit) = bits.get_mut(pos) {
        *bit = bit.flip();
    }
    bits
}

/// Toggle `len` consecutive bits from `pos`, clipped at the frame end.
pub fn flip_burst(frame: &[Bit], pos: usize, len: usize) -> BitSequence {
    let mut bits = frame.to_vec();
    if pos >= bits.len() {
        return bits;
    }
    let end = pos.saturating_add(len).min(bits.len());
    for bit in &mut bits[pos..end] {
        *bit = bit.flip();
    }
    bits
}

/// Pick `count` distinct positions in `0..frame_len`, uniformly, without
/// replacement. Returned in ascending order.
pub fn distinct_positions<R: Rng + ?Sized>(
    frame_len: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, FaultError> {
    if count < 1 || count > frame_len {
        return Err(FaultError::InvalidCount { count, frame_len });
    }
    let mut positions = index::sample(rng, frame_len, count).into_vec();
    positions.sort_unstable();
    Ok(positions)
}

/// Toggle `count` distinct, randomly chosen bits.
///
/// Odd counts are a caller convention and are not checked here.
pub fn flip_k_distinct_bits<R: Rng + ?Sized>(
    frame: &[Bit],
    count: usize,
    rng: &mut R,
) -> Result<BitSequence, FaultError> {
    let positions = distinct_positions(frame.len(), count, rng)?;
    debug!("Flipping positions {:?}", positions);

    let mut bits = frame.to_vec();
    for pos in positions {
        bits[pos] = bits[pos].flip();
    }
    Ok(bits)
}

/// The canned corruption cases offered to the operator (choice codes 0..=6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultScenario {
    None,
    SingleBit,
    TwoIsolated,
    OddCount(usize),
    Burst8,
    Burst17,
    Burst22,
}

impl FaultScenario {
    /// Menu labels, indexed by choice code
    pub const MENU: [&'static str; 7] = [
        "No error",
        "Single bit error",
        "Two isolated single-bit errors",
        "Odd number of errors (random distinct bits)",
        "Burst error length 8",
        "Burst error length 17",
        "Burst error length 22",
    ];

    /// Map an operator choice to a scenario. Choice 3 needs an odd `count`,
    /// every other choice must come without one.
    pub fn from_choice(
        choice: u8,
        count: Option<usize>,
    ) -> Result<Self, FaultError> {
        if count.is_some()
            && choice <= MAX_FAULT_CHOICE
            && !Self::needs_count(choice)
        {
            return Err(FaultError::UnexpectedCount { choice });
        }
        let scenario = match choice {
            0 => Self::None,
            1 => Self::SingleBit,
            2 => Self::TwoIsolated,
            3 => {
                let count = count.ok_or(FaultError::MissingCount)?;
                if count % 2 == 0 {
                    return Err(FaultError::EvenCount { count });
                }
                Self::OddCount(count)
            }
            4 => Self::Burst8,
            5 => Self::Burst17,
            6 => Self::Burst22,
            _ => {
                return Err(FaultError::UnknownChoice {
                    choice,
                    max: MAX_FAULT_CHOICE,
                });
            }
        };
        Ok(scenario)
    }

    pub fn choice(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::SingleBit => 1,
            Self::TwoIsolated => 2,
            Self::OddCount(_) => 3,
            Self::Burst8 => 4,
            Self::Burst17 => 5,
            Self::Burst22 => 6,
        }
    }

    pub fn needs_count(choice: u8) -> bool {
        choice == 3
    }

    /// Apply the scenario to the frame bits
    pub fn apply<R: Rng + ?Sized>(
        &self,
        frame: &[Bit],
        rng: &mut R,
    ) -> Result<BitSequence, FaultError> {
        let bits = match *self {
            Self::None => frame.to_vec(),
            Self::SingleBit => flip_bit(frame, SINGLE_FLIP_POS),
            Self::TwoIsolated => ISOLATED_FLIP_POS
                .iter()
                .fold(frame.to_vec(), |bits, &pos| flip_bit(&bits, pos)),
            Self::OddCount(count) => flip_k_distinct_bits(frame, count, rng)?,
            Self::Burst8 => flip_burst(frame, BURST_8.0, BURST_8.1),
            Self::Burst17 => flip_burst(frame, BURST_17.0, BURST_17.1),
            Self::Burst22 => flip_burst(frame, BURST_22.0, BURST_22.1),
        };
        Ok(bits)
    }
}

impl fmt::Display for FaultScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "no error"),
            Self::SingleBit => {
                write!(f, "single bit error at frame bit {SINGLE_FLIP_POS}")
            }
            Self::TwoIsolated => write!(
                f,
                "two isolated errors at frame bits {} and {}",
                ISOLATED_FLIP_POS[0], ISOLATED_FLIP_POS[1]
            ),
            Self::OddCount(count) => {
                write!(f, "{count} errors at random distinct frame bits")
            }
            Self::Burst8 | Self::Burst17 | Self::Burst22 => {
                let (pos, len) = match self {
                    Self::Burst8 => BURST_8,
                    Self::Burst17 => BURST_17,
                    _ => BURST_22,
                };
                write!(f, "burst error of length {len} starting at frame bit {pos}")
            }
        }
    }
}
