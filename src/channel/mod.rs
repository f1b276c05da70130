// Channel: fault injection on the sender side and the byte transport

pub mod fault;
pub mod transport;

pub use fault::{FaultScenario, flip_bit, flip_burst, flip_k_distinct_bits};
pub use transport::{ChannelTransport, TcpTransport, Transport};
