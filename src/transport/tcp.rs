use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::transport::Transport;

/// Default timeout for a single read or write (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Bytes requested from the socket per read.
const READ_CHUNK: usize = 256;

/// Raw sentence bytes over a TCP stream.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        // Sentences are tiny; send them as soon as they are written.
        let _ = stream.set_nodelay(true);
        Self {
            stream,
            timeout_duration,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::ConnectionReset
        | std::io::ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let send_op = async {
            self.stream.write_all(bytes).await.map_err(io_error)?;
            self.stream.flush().await.map_err(io_error)
        };
        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut buf = vec![0u8; READ_CHUNK];
        let n = timeout(self.timeout_duration, self.stream.read(&mut buf))
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))?
            .map_err(io_error)?;
        if n == 0 {
            return Err(anyhow::anyhow!("Connection closed by peer"));
        }
        buf.truncate(n);
        Ok(buf)
    }
}
