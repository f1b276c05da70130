/// Byte transports carrying one payload per connection.
/// The message boundary is the peer closing its write side.
use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use crate::utils::consts::{RECV_BUFFER_SIZE, RECV_INITIAL_CAPACITY};

/// Reliable, ordered byte stream between sender and receiver
pub trait Transport {
    /// Write all of `bytes`, retrying partial writes. Returns bytes sent.
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Signal end of message to the peer
    fn close_write(&mut self) -> io::Result<()>;

    /// Accumulate everything the peer sends until it closes
    fn receive_until_close(&mut self) -> io::Result<Vec<u8>>;
}

/// TCP connection
pub struct TcpTransport {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpTransport {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let peer = stream.peer_addr()?;
        info!("Connected to {}", peer);
        Ok(Self { stream, peer })
    }

    pub fn listen<A: ToSocketAddrs>(addr: A) -> io::Result<TcpListener> {
        let listener = TcpListener::bind(addr)?;
        info!("Listening on {}", listener.local_addr()?);
        Ok(listener)
    }

    /// Block until one peer connects
    pub fn accept_one(listener: &TcpListener) -> io::Result<Self> {
        let (stream, peer) = listener.accept()?;
        info!("Peer connected from {}", peer);
        Ok(Self { stream, peer })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut total = 0;
        while total < bytes.len() {
            match self.stream.write(&bytes[total..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::WriteZero,
                        format!("peer stopped accepting after {} bytes", total),
                    ));
                }
                Ok(n) => total += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.stream.flush()?;
        debug!("Wrote {} bytes to {}", total, self.peer);
        Ok(total)
    }

    fn close_write(&mut self) -> io::Result<()> {
        self.stream.shutdown(Shutdown::Write)
    }

    fn receive_until_close(&mut self) -> io::Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(RECV_INITIAL_CAPACITY);
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        loop {
            match self.stream.read(&mut buf) {
                // EOF, peer closed
                Ok(0) => break,
                Ok(n) => payload.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        debug!("Read {} bytes from {}", payload.len(), self.peer);
        Ok(payload)
    }
}

/// In-memory duplex endpoint. Dropping or closing the write half ends
/// the peer's `receive_until_close`.
pub struct ChannelTransport {
    tx: Option<Sender<Vec<u8>>>,
    rx: Receiver<Vec<u8>>,
}

impl ChannelTransport {
    /// Two connected endpoints
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        let (b_tx, a_rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        (
            Self {
                tx: Some(a_tx),
                rx: a_rx,
            },
            Self {
                tx: Some(b_tx),
                rx: b_rx,
            },
        )
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let tx = self.tx.as_ref().ok_or_else(|| {
            io::Error::new(ErrorKind::NotConnected, "write side already closed")
        })?;
        tx.send(bytes.to_vec())
            .map_err(|_| io::Error::new(ErrorKind::BrokenPipe, "peer dropped"))?;
        Ok(bytes.len())
    }

    fn close_write(&mut self) -> io::Result<()> {
        self.tx.take();
        Ok(())
    }

    fn receive_until_close(&mut self) -> io::Result<Vec<u8>> {
        let mut payload = Vec::new();
        while let Ok(chunk) = self.rx.recv() {
            payload.extend(chunk);
        }
        Ok(payload)
    }
}
