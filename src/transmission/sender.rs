/// Sender: data bits -> frame -> (fault) -> Manchester -> payload
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::channel::{FaultScenario, Transport};
use crate::error::Result;
use crate::phy::bit::{bits_to_payload, bits_to_string};
use crate::phy::{Bit, BitSequence, Frame, manchester_encode};
use crate::utils::consts::DEFAULT_SENDER_ADDR;

/// Configuration for the sender
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub addr: String,
    /// Seed for random fault positions; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_SENDER_ADDR.to_string(),
            seed: None,
        }
    }
}

impl SenderConfig {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Everything the sender produced for one run
#[derive(Debug, Clone)]
pub struct Transmission {
    pub data: BitSequence,
    pub crc: u16,
    /// data || crc before fault injection
    pub frame: BitSequence,
    /// frame bits actually encoded
    pub sent_frame: BitSequence,
    pub encoded: BitSequence,
    pub payload: Vec<u8>,
    pub scenario: FaultScenario,
}

impl Transmission {
    /// Frame positions that differ from the clean frame
    pub fn corrupted_positions(&self) -> Vec<usize> {
        self.frame
            .iter()
            .zip(&self.sent_frame)
            .enumerate()
            .filter(|(_, (clean, sent))| clean != sent)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Frame `data`, corrupt the frame per `scenario`, line-encode and
/// serialize it.
pub fn encode_for_transmission<R: Rng + ?Sized>(
    data: &[Bit],
    scenario: FaultScenario,
    rng: &mut R,
) -> Result<Transmission> {
    let frame = Frame::new(data.to_vec())?;
    let frame_bits = frame.to_bits();

    info!("Sender: Data bits = {}", bits_to_string(data));
    info!("Sender: CRC-16 = {:#06x}", frame.crc());
    info!("Sender: Frame bits (data + CRC) = {}", frame_bits.len());

    let sent_frame = scenario.apply(&frame_bits, rng)?;
    info!("Sender: {}", scenario);

    let encoded = manchester_encode(&sent_frame);
    info!("Sender: Manchester encoded bits = {}", encoded.len());

    let payload = bits_to_payload(&encoded);

    Ok(Transmission {
        crc: frame.crc(),
        data: frame.into_data(),
        frame: frame_bits,
        sent_frame,
        encoded,
        payload,
        scenario,
    })
}

/// Writes one transmission per transport connection
pub struct Sender<T: Transport> {
    transport: T,
}

impl<T: Transport> Sender<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send the payload and close the write side. Returns bytes sent.
    pub fn transmit(&mut self, transmission: &Transmission) -> Result<usize> {
        info!("Sender: Sending {} bytes...", transmission.payload.len());
        let sent = self.transport.send(&transmission.payload)?;
        self.transport.close_write()?;
        info!("Sender: Sent {} bytes.", sent);
        Ok(sent)
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}
