//! pipe2tcp - named pipe to TCP relay
//!
//! Bridges a local named pipe server (Unix domain socket on Unix) and a
//! remote TCP server, relaying raw bytes in both directions so a local pipe
//! client can talk to the remote peer as though the pipe were the socket.
//! Both sides reconnect independently, so the relay survives transient
//! disconnects without restarting.

pub mod common;
pub mod relay;

// Re-export commonly used types for tests
pub use common::{Error, RelayConfig, Result};
