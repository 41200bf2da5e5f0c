//! Byte transports standing in for the serial link between two agents.

#[async_trait::async_trait]
pub trait Transport: Send {
    /// Write every byte of `bytes` to the peer.
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()>;

    /// Read at least one byte. Errors once the peer is gone.
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>>;
}

pub mod in_memory;
pub mod tcp;

pub use in_memory::InMemoryTransport;
pub use tcp::TcpTransport;
