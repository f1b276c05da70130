/// Log level (overridable with RUST_LOG)
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Link Parameters
// ============================================================================

/// Address the sender connects to
pub const DEFAULT_SENDER_ADDR: &str = "127.0.0.1:9000";

/// Address the receiver binds
pub const DEFAULT_RECEIVER_BIND: &str = "0.0.0.0:9000";

/// Read chunk size when draining a connection (bytes)
pub const RECV_BUFFER_SIZE: usize = 4096;

/// Initial capacity for the received payload (bytes)
pub const RECV_INITIAL_CAPACITY: usize = 8192;

// ============================================================================
// Frame Parameters
// ============================================================================

/// CRC-16/CCITT generator polynomial, x^16 + x^12 + x^5 + 1
pub const CRC_POLYNOMIAL: u16 = 0x1021;

/// CRC register width in bits
pub const CRC_WIDTH: usize = 16;

/// Smallest frame: one data bit plus the CRC
pub const MIN_FRAME_BITS: usize = 1 + CRC_WIDTH;

/// Manchester line bits per frame bit
pub const LINE_BITS_PER_BIT: usize = 2;

// ============================================================================
// Fault Injection Scenarios (frame bit positions)
// ============================================================================

pub const SINGLE_FLIP_POS: usize = 10;

pub const ISOLATED_FLIP_POS: [usize; 2] = [5, 20];

/// (start, length)
pub const BURST_8: (usize, usize) = (8, 8);
pub const BURST_17: (usize, usize) = (8, 17);
pub const BURST_22: (usize, usize) = (5, 22);

/// Highest fault-injection choice code
pub const MAX_FAULT_CHOICE: u8 = 6;
