//! Configuration resolution
//!
//! The relay configuration is resolved once at startup and immutable for the
//! process lifetime. Precedence: command-line flag, then `config.toml` in the
//! platform config directory, then built-in defaults. Malformed input never
//! aborts startup; it degrades to the defaults with a warning.

use serde::Deserialize;

use super::paths::config_path;

/// Default remote host when none is given
pub const DEFAULT_HOST: &str = "localhost";

/// Default remote port when none is given
pub const DEFAULT_PORT: u16 = 3333;

/// Default pipe server name
pub const DEFAULT_PIPE: &str = "windbg";

/// Resolved relay configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Remote TCP host
    pub host: String,
    /// Remote TCP port
    pub port: u16,
    /// Local pipe server name
    pub pipe_name: String,
}

/// Optional settings read from `config.toml`
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Default remote TCP server ("host:port")
    pub remote: Option<String>,
    /// Default pipe server name
    pub pipe: Option<String>,
}

impl FileConfig {
    /// Load the config file, degrading to empty settings if it is missing
    /// or unreadable
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

impl RelayConfig {
    /// Resolve the final configuration from CLI arguments and the config file
    pub fn resolve(cli_remote: Option<String>, cli_pipe: Option<String>) -> Self {
        let file = FileConfig::load();

        let remote = cli_remote.or(file.remote).unwrap_or_default();
        let (host, port) = parse_remote(&remote);
        let pipe_name = cli_pipe
            .or(file.pipe)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PIPE.to_string());

        Self {
            host,
            port,
            pipe_name,
        }
    }
}

/// Split a "host:port" string into its parts, filling in defaults.
///
/// The port is taken from after the last colon; if that suffix does not
/// parse as a port number, the whole string is treated as host-only and the
/// port defaults. An empty host part (input like ":9999") also defaults.
pub fn parse_remote(remote: &str) -> (String, u16) {
    if remote.is_empty() {
        return (DEFAULT_HOST.to_string(), DEFAULT_PORT);
    }

    if let Some(colon) = remote.rfind(':') {
        if let Ok(port) = remote[colon + 1..].parse::<u16>() {
            let host = &remote[..colon];
            let host = if host.is_empty() { DEFAULT_HOST } else { host };
            return (host.to_string(), port);
        }
    }

    (remote.to_string(), DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_remote_uses_all_defaults() {
        assert_eq!(parse_remote(""), ("localhost".to_string(), 3333));
    }

    #[test]
    fn host_and_port_are_split() {
        assert_eq!(parse_remote("myhost:9999"), ("myhost".to_string(), 9999));
    }

    #[test]
    fn host_without_port_keeps_default_port() {
        assert_eq!(parse_remote("myhost"), ("myhost".to_string(), 3333));
    }

    #[test]
    fn port_without_host_defaults_the_host() {
        assert_eq!(parse_remote(":9999"), ("localhost".to_string(), 9999));
    }

    #[test]
    fn unparseable_port_treats_whole_string_as_host() {
        assert_eq!(
            parse_remote("myhost:notaport"),
            ("myhost:notaport".to_string(), 3333)
        );
        // Out of range for a port
        assert_eq!(
            parse_remote("myhost:70000"),
            ("myhost:70000".to_string(), 3333)
        );
    }

    #[test]
    fn last_colon_wins() {
        assert_eq!(
            parse_remote("fe80::1:9999"),
            ("fe80::1".to_string(), 9999)
        );
    }
}
