//! Error types for the link.
//!
//! Input and transport problems are returned as `Err`. Corruption found
//! on the wire is not an error here: the receiver reports it as a
//! [`Verdict`](crate::transmission::Verdict).

use thiserror::Error;

use crate::phy::Bit;

/// Top-level error for sender and receiver runs.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Operator supplied data bits that cannot be parsed
    #[error("invalid input: {0}")]
    Input(#[from] BitParseError),

    /// Frame could not be assembled
    #[error("framing error: {0}")]
    Frame(#[from] FrameError),

    /// Fault injection request was rejected
    #[error("fault injection error: {0}")]
    Fault(#[from] FaultError),

    /// Receiver had nothing to judge
    #[error("receive error: {0}")]
    Receive(#[from] ReceiveError),

    /// Socket or channel failure
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Interactive prompt failed
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A line read from piped stdin did not answer the question
    #[error("invalid answer to {question:?}: {answer:?}")]
    Answer {
        question: &'static str,
        answer: String,
    },

    /// Report could not be rendered
    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Errors parsing a textual `0`/`1` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitParseError {
    #[error("no data bits given")]
    Empty,

    #[error("invalid character {found:?} at position {position} (expected '0' or '1')")]
    InvalidCharacter { position: usize, found: char },
}

/// Manchester decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Encoded sequence cannot be split into pairs
    #[error("encoded length {len} is odd")]
    OddLength { len: usize },

    /// A pair other than `10` or `01`; `position` indexes the first bit
    #[error(
        "invalid Manchester pair ({}{}) at positions {position},{}",
        .observed.0,
        .observed.1,
        .position + 1
    )]
    InvalidPair {
        position: usize,
        observed: (Bit, Bit),
    },
}

/// Frame assembly and split failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame needs at least one data bit")]
    EmptyData,

    #[error("frame too short: need at least {required} bits, got {len}")]
    TooShort { len: usize, required: usize },
}

/// Fault injector failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FaultError {
    #[error("cannot flip {count} distinct bits in a {frame_len}-bit frame")]
    InvalidCount { count: usize, frame_len: usize },

    /// Only raised by callers that enforce the odd-count convention
    #[error("flip count {count} must be odd")]
    EvenCount { count: usize },

    #[error("unknown fault choice {choice} (expected 0..={max})")]
    UnknownChoice { choice: u8, max: u8 },

    #[error("choice 3 needs a flip count")]
    MissingCount,

    #[error("fault choice {choice} does not take a flip count")]
    UnexpectedCount { choice: u8 },
}

/// Structural receive failures. These end the run with a failure status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReceiveError {
    #[error("empty payload")]
    EmptyPayload,
}

pub type Result<T> = std::result::Result<T, LinkError>;
