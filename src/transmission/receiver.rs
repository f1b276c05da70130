/// Receiver: payload -> bits -> Manchester decode -> frame -> CRC verdict
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::channel::Transport;
use crate::error::{DecodeError, FrameError, ReceiveError, Result};
use crate::phy::bit::{bits_to_string, payload_to_bits};
use crate::phy::{FrameCheck, VerifyResult, manchester_decode, verify_frame};
use crate::utils::consts::DEFAULT_RECEIVER_BIND;

/// Configuration for the receiver
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    pub bind: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_RECEIVER_BIND.to_string(),
        }
    }
}

/// Why the receiver flagged a transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Payload byte other than `'0'` / `'1'`
    InvalidSymbol { position: usize, found: u8 },
    Manchester(DecodeError),
    Frame(FrameError),
    CrcMismatch(FrameCheck),
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSymbol { position, found } => write!(
                f,
                "invalid char in payload (not 0/1): {:?} at byte {}",
                char::from(*found),
                position
            ),
            Self::Manchester(e) => write!(f, "Manchester decode failed: {}", e),
            Self::Frame(e) => write!(f, "{}", e),
            Self::CrcMismatch(check) => write!(
                f,
                "CRC mismatch: received {:#06x}, calculated {:#06x}",
                check.received_crc, check.calculated_crc
            ),
        }
    }
}

/// Final answer for one transmission. Both variants are successful runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    NoErrorDetected(FrameCheck),
    ErrorDetected(Detection),
}

impl Verdict {
    pub fn is_error_detected(&self) -> bool {
        matches!(self, Verdict::ErrorDetected(_))
    }

    /// The frame check, if decoding got that far
    pub fn frame_check(&self) -> Option<&FrameCheck> {
        match self {
            Verdict::NoErrorDetected(check)
            | Verdict::ErrorDetected(Detection::CrcMismatch(check)) => {
                Some(check)
            }
            Verdict::ErrorDetected(_) => None,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::NoErrorDetected(_) => "NO ERROR DETECTED",
            Verdict::ErrorDetected(_) => "ERROR DETECTED",
        }
    }
}

/// A verdict plus how far each stage got
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    pub payload_len: usize,
    pub encoded_bits: Option<usize>,
    pub decoded_bits: Option<usize>,
    pub verdict: Verdict,
}

impl Reception {
    fn detected(
        payload_len: usize,
        encoded_bits: Option<usize>,
        decoded_bits: Option<usize>,
        detection: Detection,
    ) -> Self {
        warn!("Receiver: {}", detection);
        Self {
            payload_len,
            encoded_bits,
            decoded_bits,
            verdict: Verdict::ErrorDetected(detection),
        }
    }

    pub fn report(&self) -> ReceptionReport {
        let check = self.verdict.frame_check();
        let reason = match &self.verdict {
            Verdict::ErrorDetected(detection) => Some(detection.to_string()),
            Verdict::NoErrorDetected(_) => None,
        };

        ReceptionReport {
            payload_bytes: self.payload_len,
            encoded_bits: self.encoded_bits,
            decoded_bits: self.decoded_bits,
            data_bits: check.map(|c| bits_to_string(&c.data)),
            received_crc: check.map(|c| format!("{:#06x}", c.received_crc)),
            calculated_crc: check
                .map(|c| format!("{:#06x}", c.calculated_crc)),
            crc_check: check.map(|c| c.result),
            verdict: self.verdict.headline(),
            reason,
        }
    }
}

/// Serializable summary of a reception
#[derive(Debug, Clone, Serialize)]
pub struct ReceptionReport {
    pub payload_bytes: usize,
    pub encoded_bits: Option<usize>,
    pub decoded_bits: Option<usize>,
    pub data_bits: Option<String>,
    pub received_crc: Option<String>,
    pub calculated_crc: Option<String>,
    pub crc_check: Option<VerifyResult>,
    pub verdict: &'static str,
    pub reason: Option<String>,
}

/// Judge a received payload.
///
/// Corruption of any kind comes back as `Ok` with
/// [`Verdict::ErrorDetected`]; only an empty payload is an `Err`.
pub fn decode_and_verify(
    payload: &[u8],
) -> std::result::Result<Reception, ReceiveError> {
    if payload.is_empty() {
        return Err(ReceiveError::EmptyPayload);
    }
    let payload_len = payload.len();

    let encoded = match payload_to_bits(payload) {
        Ok(bits) => bits,
        Err((position, found)) => {
            return Ok(Reception::detected(
                payload_len,
                None,
                None,
                Detection::InvalidSymbol { position, found },
            ));
        }
    };
    info!("Receiver: Encoded bits = {}", encoded.len());

    let frame_bits = match manchester_decode(&encoded) {
        Ok(bits) => bits,
        Err(e) => {
            return Ok(Reception::detected(
                payload_len,
                Some(encoded.len()),
                None,
                Detection::Manchester(e),
            ));
        }
    };
    info!("Receiver: Decoded bits (data + CRC) = {}", frame_bits.len());

    let encoded_bits = Some(encoded.len());
    let decoded_bits = Some(frame_bits.len());

    let check = match verify_frame(&frame_bits) {
        Ok(check) => check,
        Err(e) => {
            return Ok(Reception::detected(
                payload_len,
                encoded_bits,
                decoded_bits,
                Detection::Frame(e),
            ));
        }
    };
    info!("Receiver: Data bits length = {}", check.data.len());
    info!(
        "Receiver: Received CRC = {:#06x}, Calculated CRC = {:#06x}",
        check.received_crc, check.calculated_crc
    );

    if check.is_match() {
        return Ok(Reception {
            payload_len,
            encoded_bits,
            decoded_bits,
            verdict: Verdict::NoErrorDetected(check),
        });
    }

    Ok(Reception::detected(
        payload_len,
        encoded_bits,
        decoded_bits,
        Detection::CrcMismatch(check),
    ))
}

/// Reads one payload per transport connection and judges it
pub struct Receiver<T: Transport> {
    transport: T,
}

impl<T: Transport> Receiver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn receive(&mut self) -> Result<Reception> {
        let payload = self.transport.receive_until_close()?;
        info!("Receiver: Received {} bytes.", payload.len());
        Ok(decode_and_verify(&payload)?)
    }
}
