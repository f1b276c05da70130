// Physical layer: bits, CRC16, Manchester line coding and framing

pub mod bit;
pub mod crc;
pub mod frame;
pub mod line_coding;

pub use bit::{Bit, BitSequence};
pub use crc::{Crc16, crc16};
pub use frame::{Frame, FrameCheck, VerifyResult, build_frame, verify_frame};
pub use line_coding::{manchester_decode, manchester_encode};
