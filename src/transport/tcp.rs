use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration, Instant};

use crate::protocol::Message;
use crate::transport::{Disconnected, Transport};

/// Default timeout for a single send or receive.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on an encoded frame.
pub const DEFAULT_MAX_FRAME: u32 = 1 << 20;

/// Default time a connection may sit without traffic before it is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Limits applied to one TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpLimits {
    pub io_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_frame: u32,
}

impl Default for TcpLimits {
    fn default() -> Self {
        TcpLimits {
            io_timeout: DEFAULT_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_frame: DEFAULT_MAX_FRAME,
        }
    }
}

/// Frames are a 4-byte big-endian length followed by a bincode payload.
pub struct TcpTransport {
    stream: TcpStream,
    limits: TcpLimits,
    last_activity: Instant,
}

fn io_error(e: std::io::Error, action: &str) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => anyhow::Error::new(Disconnected("Connection closed by peer")),
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            anyhow::Error::new(Disconnected("Connection reset by peer"))
        }
        _ => anyhow::anyhow!("{} error: {}", action, e),
    }
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_limits(stream, TcpLimits::default())
    }

    pub fn with_limits(stream: TcpStream, limits: TcpLimits) -> Self {
        Self {
            stream,
            limits,
            last_activity: Instant::now(),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    pub fn limits(&self) -> TcpLimits {
        self.limits
    }

    /// Whether the connection has been quiet for longer than the idle limit.
    pub fn is_idle_timeout(&self) -> bool {
        self.last_activity.elapsed() > self.limits.idle_timeout
    }

    fn mark_activity(&mut self) {
        self.last_activity = Instant::now();
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        if self.is_idle_timeout() {
            return Err(anyhow::anyhow!("Connection idle timeout exceeded"));
        }

        let data =
            bincode::serialize(&msg).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        if data.len() > self.limits.max_frame as usize {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.limits.max_frame
            ));
        }

        let io_timeout = self.limits.io_timeout;
        let stream = &mut self.stream;
        let send_op = async {
            let len = (data.len() as u32).to_be_bytes();
            stream.write_all(&len).await.map_err(|e| io_error(e, "Write"))?;
            stream.write_all(&data).await.map_err(|e| io_error(e, "Write"))?;
            stream.flush().await.map_err(|e| io_error(e, "Write"))?;
            anyhow::Ok(())
        };
        timeout(io_timeout, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", io_timeout))??;

        self.mark_activity();
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        if self.is_idle_timeout() {
            return Err(anyhow::anyhow!("Connection idle timeout exceeded"));
        }

        let TcpLimits {
            io_timeout,
            idle_timeout,
            max_frame,
        } = self.limits;
        let stream = &mut self.stream;

        // The length prefix may legitimately take as long as the idle limit
        // to arrive; the body must follow within the I/O timeout.
        let mut len_buf = [0u8; 4];
        timeout(idle_timeout, stream.read_exact(&mut len_buf))
            .await
            .map_err(|_| anyhow::anyhow!("Connection idle timeout exceeded"))?
            .map_err(|e| io_error(e, "Read"))?;

        let len = u32::from_be_bytes(len_buf);
        if len > max_frame {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                len,
                max_frame
            ));
        }
        if len == 0 {
            return Err(anyhow::anyhow!("Invalid message length: 0"));
        }

        let mut buf = vec![0u8; len as usize];
        timeout(io_timeout, stream.read_exact(&mut buf))
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", io_timeout))?
            .map_err(|e| io_error(e, "Read"))?;

        let msg = bincode::deserialize(&buf)
            .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
        self.mark_activity();
        Ok(msg)
    }
}
