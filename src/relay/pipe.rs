//! Pipe-side loop
//!
//! Owns the local pipe server. The listener is created once and kept for
//! the process lifetime; only the accepted client session is discarded on
//! error. One client is serviced at a time.

use std::sync::Arc;

use interprocess::local_socket::traits::tokio::Listener as ListenerTrait;

use crate::common::{Error, RelayConfig, Result};

use super::channel::ByteChannel;
use super::transport;
use super::{pump_reads, pump_writes};

/// Run the pipe-side loop forever.
///
/// Bytes read from the pipe client go into `to_tcp`; bytes drained from
/// `to_pipe` are written to the pipe client. The only error that escapes is
/// listener creation failing at startup, when there is no endpoint to serve.
pub async fn run(
    config: RelayConfig,
    to_tcp: Arc<ByteChannel>,
    to_pipe: Arc<ByteChannel>,
) -> Result<()> {
    let listener = transport::create_listener(&config.pipe_name)
        .await
        .map_err(|e| Error::pipe_listen(&config.pipe_name, e))?;
    tracing::info!("Pipe server '{}' waiting for a client", config.pipe_name);

    loop {
        let stream = match listener.accept().await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Accept on pipe '{}' failed: {}", config.pipe_name, e);
                continue;
            }
        };
        tracing::info!("Got a connection");

        let (mut reader, mut writer) = tokio::io::split(stream);
        let result = tokio::select! {
            outcome = pump_reads(&mut reader, &to_tcp) => outcome,
            outcome = pump_writes(&mut writer, &to_pipe) => outcome,
        };

        // The session stream is dropped here; the listener stays up and the
        // loop goes straight back to waiting for the next client.
        if let Err(e) = result {
            tracing::info!("Pipe client disconnected: {}", e);
        }
    }
}
