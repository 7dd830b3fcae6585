use core::fmt;

use crate::protocol::Message;

/// The peer closed or reset the connection. Carried inside the
/// `anyhow::Error` returned by `Transport::recv` and `Transport::send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected(pub &'static str);

impl fmt::Display for Disconnected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Disconnected {}

/// Whether `err` reports the peer going away rather than a broken frame,
/// a timeout or an I/O failure.
pub fn is_disconnect(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Disconnected>().is_some()
}

/// Bidirectional, ordered delivery of protocol frames.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;
