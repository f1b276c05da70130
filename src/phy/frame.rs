// Frame format: [Data: N >= 1 bits] [CRC16: 16 bits, MSB first]

use super::bit::{Bit, BitSequence, bits_to_u16, u16_to_bits};
use super::crc::crc16;
use crate::error::FrameError;
use crate::utils::consts::{CRC_WIDTH, MIN_FRAME_BITS};
use serde::Serialize;
use tracing::debug;

/// Data bits together with their checksum. Only [`Frame::new`] builds
/// one, so the data is never empty and the CRC always matches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: BitSequence,
    crc: u16,
}

impl Frame {
    pub fn new(data: BitSequence) -> Result<Self, FrameError> {
        if data.is_empty() {
            return Err(FrameError::EmptyData);
        }
        let crc = crc16(&data);
        Ok(Self { data, crc })
    }

    pub fn data(&self) -> &[Bit] {
        &self.data
    }

    pub fn crc(&self) -> u16 {
        self.crc
    }

    pub fn into_data(self) -> BitSequence {
        self.data
    }

    /// Serialize frame to bits: data followed by the CRC
    pub fn to_bits(&self) -> BitSequence {
        let mut bits = Vec::with_capacity(self.bit_len());
        bits.extend_from_slice(&self.data);
        bits.extend_from_slice(&u16_to_bits(self.crc));
        bits
    }

    pub fn bit_len(&self) -> usize {
        self.data.len() + CRC_WIDTH
    }
}

/// Outcome of comparing a frame's trailing CRC against its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerifyResult {
    Match,
    Mismatch,
}

/// Receive-side view of a frame after the split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCheck {
    pub data: BitSequence,
    pub received_crc: u16,
    pub calculated_crc: u16,
    pub result: VerifyResult,
}

impl FrameCheck {
    pub fn is_match(&self) -> bool {
        self.result == VerifyResult::Match
    }
}

/// Build the bits of a frame for `data`
pub fn build_frame(data: &[Bit]) -> Result<BitSequence, FrameError> {
    Frame::new(data.to_vec()).map(|frame| frame.to_bits())
}

/// Split `bits` into data and CRC and recompute the checksum.
/// A mismatch is a normal outcome, only a short frame is an error.
pub fn verify_frame(bits: &[Bit]) -> Result<FrameCheck, FrameError> {
    if bits.len() < MIN_FRAME_BITS {
        debug!("Frame too short: {} bits", bits.len());
        return Err(FrameError::TooShort {
            len: bits.len(),
            required: MIN_FRAME_BITS,
        });
    }

    let (data, crc_bits) = bits.split_at(bits.len() - CRC_WIDTH);
    let received_crc = bits_to_u16(crc_bits);
    let calculated_crc = crc16(data);

    let result = if received_crc == calculated_crc {
        VerifyResult::Match
    } else {
        debug!(
            "CRC check failed: received={:#06x}, calculated={:#06x}",
            received_crc, calculated_crc
        );
        VerifyResult::Mismatch
    };

    Ok(FrameCheck {
        data: data.to_vec(),
        received_crc,
        calculated_crc,
        result,
    })
}
