//! Bidirectional relay engine
//!
//! Two self-healing loops own one connection each: the tcp loop dials the
//! remote peer, the pipe loop serves the local client. They never call each
//! other; bytes cross sides only through the two shared channels:
//!
//! ```text
//! remote peer --> tcp reader --> [tcp->pipe channel] --> pipe writer --> client
//! client --> pipe reader --> [pipe->tcp channel] --> tcp writer --> remote peer
//! ```
//!
//! Each loop recovers from every transport failure by itself, so an outage
//! on one side never disturbs the other.

pub mod channel;
pub mod pipe;
pub mod tcp;
pub mod transport;

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::common::{Error, RelayConfig, Result};

use channel::ByteChannel;

/// Read chunk size for both transports
const READ_CHUNK: usize = 4096;

/// Run the relay until either loop exits.
///
/// Both loops recover from transport failures internally and never return in
/// normal operation; this wait exists to give the process a well-defined
/// top-level lifetime, not to implement a restart policy.
pub async fn run(config: RelayConfig) -> Result<()> {
    let to_pipe = Arc::new(ByteChannel::new());
    let to_tcp = Arc::new(ByteChannel::new());

    let tcp_task = tokio::spawn(tcp::run(
        config.clone(),
        Arc::clone(&to_pipe),
        Arc::clone(&to_tcp),
    ));
    let pipe_task = tokio::spawn(pipe::run(config, to_tcp, to_pipe));

    tokio::select! {
        result = tcp_task => match result {
            Ok(()) => Ok(()),
            Err(e) => Err(Error::TaskFailed(e.to_string())),
        },
        result = pipe_task => match result {
            Ok(outcome) => outcome,
            Err(e) => Err(Error::TaskFailed(e.to_string())),
        },
    }
}

/// Forward bytes from a transport into a channel until the transport fails.
///
/// A zero-byte read means the peer closed the connection and is reported as
/// an error so the owning loop tears the session down.
pub(crate) async fn pump_reads<R>(reader: &mut R, chan: &ByteChannel) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "peer closed the connection",
            ));
        }
        chan.append(&buf[..n]);
    }
}

/// Forward drained channel bytes into a transport until the transport fails.
pub(crate) async fn pump_writes<W>(writer: &mut W, chan: &ByteChannel) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let chunk = chan.drain().await;
        writer.write_all(&chunk).await?;
        writer.flush().await?;
    }
}
