//! Cross-platform pipe endpoint layer
//!
//! Abstracts Unix domain sockets (Unix/macOS) and named pipes (Windows)
//! using the interprocess crate. The pipe name from the configuration maps
//! to a socket path on Unix and a namespaced pipe name on Windows.

use std::io;

use crate::common::paths;

// Platform-specific imports and type aliases
#[cfg(unix)]
pub mod platform {
    pub use interprocess::local_socket::tokio::{prelude::*, Listener, Stream};
    pub use interprocess::local_socket::{GenericFilePath, ListenerOptions};
}

#[cfg(windows)]
pub mod platform {
    pub use interprocess::local_socket::tokio::{prelude::*, Listener, Stream};
    pub use interprocess::local_socket::{GenericNamespaced, ListenerOptions};
}

use platform::*;

/// Re-export Stream for use in other modules
pub use platform::Stream;

/// Create the pipe server endpoint for the given pipe name
pub async fn create_listener(pipe_name: &str) -> io::Result<Listener> {
    // Ensure the socket directory exists (Unix) and clean up a stale socket
    // left by a previous run
    paths::ensure_endpoint_dir()?;
    paths::remove_stale_endpoint(pipe_name)?;

    let name = paths::endpoint_name(pipe_name);

    #[cfg(unix)]
    let listener = {
        let name = name.to_fs_name::<GenericFilePath>()?;
        ListenerOptions::new().name(name).create_tokio()?
    };

    #[cfg(windows)]
    let listener = {
        let name = name.to_ns_name::<GenericNamespaced>()?;
        ListenerOptions::new().name(name).create_tokio()?
    };

    // Keep the endpoint private to the owning user on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let path = paths::endpoint_path(pipe_name);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(listener)
}

/// Connect to a relay pipe endpoint as a client
///
/// The relay itself never dials its own pipe; this exists for pipe clients
/// hosted in the same process, most notably the integration tests.
pub async fn connect(pipe_name: &str) -> io::Result<Stream> {
    let name = paths::endpoint_name(pipe_name);

    #[cfg(unix)]
    let stream = {
        let name = name.to_fs_name::<GenericFilePath>()?;
        Stream::connect(name).await?
    };

    #[cfg(windows)]
    let stream = {
        let name = name.to_ns_name::<GenericNamespaced>()?;
        Stream::connect(name).await?
    };

    Ok(stream)
}
