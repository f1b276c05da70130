//! Error-detecting bit transmission: CRC-16 framing, Manchester line
//! coding, sender-side fault injection and a receiver that reports
//! whether corruption was detected.

pub mod channel;
pub mod error;
pub mod phy;
pub mod transmission;
pub mod ui;
pub mod utils;

pub use error::{LinkError, Result};
