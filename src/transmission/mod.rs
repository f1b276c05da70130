/// Transmission layer modules
pub mod receiver;
pub mod sender;

pub use receiver::*;
pub use sender::*;
