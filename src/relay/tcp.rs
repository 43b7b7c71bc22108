//! Network-side loop
//!
//! Owns the outbound TCP connection. Dials the configured remote forever,
//! and on every failure drops the socket and dials again immediately; there
//! is no backoff and no attempt limit.

use std::sync::Arc;

use tokio::net::TcpStream;

use crate::common::RelayConfig;

use super::channel::ByteChannel;
use super::{pump_reads, pump_writes};

/// Run the network-side loop forever.
///
/// Bytes read from the remote peer go into `to_pipe`; bytes drained from
/// `to_tcp` are written to the remote peer.
pub async fn run(config: RelayConfig, to_pipe: Arc<ByteChannel>, to_tcp: Arc<ByteChannel>) {
    loop {
        let stream = match TcpStream::connect((config.host.as_str(), config.port)).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Connecting to {}:{} failed: {}", config.host, config.port, e);
                continue;
            }
        };
        tracing::info!("Connected to {}:{}", config.host, config.port);

        let (mut reader, mut writer) = stream.into_split();
        let result = tokio::select! {
            outcome = pump_reads(&mut reader, &to_pipe) => outcome,
            outcome = pump_writes(&mut writer, &to_tcp) => outcome,
        };

        // Either half failing tears down the whole connection; both halves
        // are dropped here and a fresh connect is attempted. A write in
        // flight on the surviving half is abandoned (best-effort relay).
        if let Err(e) = result {
            tracing::warn!("Connection to {}:{} lost: {}", config.host, config.port, e);
        }
    }
}
