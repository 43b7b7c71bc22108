//! Common utilities shared between the CLI entry point and the relay engine

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::RelayConfig;
pub use error::{Error, Result};
