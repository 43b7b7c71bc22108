//! Cross-platform endpoint and configuration paths
//!
//! Unix/macOS: pipe names map to Unix domain sockets under $XDG_RUNTIME_DIR
//! or /tmp. Windows: pipe names are used directly as named pipe names.

use std::io;
use std::path::PathBuf;

/// Directory name used for sockets and configuration
const APP_NAME: &str = "pipe2tcp";

/// Get the directory holding relay socket files (Unix only)
///
/// `$XDG_RUNTIME_DIR/pipe2tcp/` when available, `/tmp/pipe2tcp-<uid>/`
/// otherwise.
#[cfg(unix)]
pub fn endpoint_dir() -> PathBuf {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return PathBuf::from(runtime_dir).join(APP_NAME);
    }

    // Fallback to /tmp with uid for security
    let uid = unsafe { libc::getuid() };
    PathBuf::from(format!("/tmp/{}-{}", APP_NAME, uid))
}

/// Get the socket path backing the given pipe name
#[cfg(unix)]
pub fn endpoint_path(pipe_name: &str) -> PathBuf {
    endpoint_dir().join(format!("{}.sock", pipe_name))
}

/// Get the endpoint name for the interprocess local socket API
#[cfg(unix)]
pub fn endpoint_name(pipe_name: &str) -> String {
    endpoint_path(pipe_name).to_string_lossy().into_owned()
}

#[cfg(windows)]
pub fn endpoint_name(pipe_name: &str) -> String {
    // The interprocess crate handles the \\.\pipe\ prefix
    pipe_name.to_string()
}

/// Ensure the socket directory exists with owner-only permissions
#[cfg(unix)]
pub fn ensure_endpoint_dir() -> io::Result<PathBuf> {
    let dir = endpoint_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))?;
    }

    Ok(dir)
}

#[cfg(windows)]
pub fn ensure_endpoint_dir() -> io::Result<PathBuf> {
    // Named pipes don't need a directory on Windows
    Ok(PathBuf::new())
}

/// Remove a stale socket file left by a previous run
#[cfg(unix)]
pub fn remove_stale_endpoint(pipe_name: &str) -> io::Result<()> {
    let path = endpoint_path(pipe_name);
    if path.exists() {
        std::fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(windows)]
pub fn remove_stale_endpoint(_pipe_name: &str) -> io::Result<()> {
    // Named pipes are automatically cleaned up on Windows
    Ok(())
}

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/pipe2tcp/`
/// - macOS: `~/Library/Application Support/pipe2tcp/`
/// - Windows: `%APPDATA%\pipe2tcp\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
