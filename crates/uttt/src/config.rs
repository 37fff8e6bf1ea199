//! Server configuration.

use std::time::Duration;

use crate::UtttError;

/// Tunables for one server instance.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to.
    ///
    /// Default: `0.0.0.0:8080`.
    pub bind_addr: String,

    /// Capacity of each room actor's command channel.
    ///
    /// Default: 64.
    pub room_channel_size: usize,

    /// Drop a connection that sends nothing for this long. `None` (the
    /// default) never times out; players may think as long as they like.
    pub idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            room_channel_size: 64,
            idle_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Reads overrides from the environment.
    ///
    /// - `UTTT_BIND`: full bind address, e.g. `127.0.0.1:9000`
    /// - `PORT`: port on all interfaces; ignored when `UTTT_BIND` is set
    ///
    /// # Errors
    /// Returns [`UtttError::Config`] if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, UtttError> {
        Self::from_vars(
            std::env::var("UTTT_BIND").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_vars(bind: Option<String>, port: Option<String>) -> Result<Self, UtttError> {
        let mut config = Self::default();

        if let Some(bind) = bind {
            config.bind_addr = bind;
        } else if let Some(port) = port {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| UtttError::Config(format!("PORT is not a port number: {port:?}")))?;
            config.bind_addr = format!("0.0.0.0:{port}");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces_on_8080() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.room_channel_size, 64);
        assert_eq!(config.idle_timeout, None);
    }

    #[test]
    fn test_from_vars_port_sets_bind_addr() {
        let config = ServerConfig::from_vars(None, Some("3000".into())).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_from_vars_bind_wins_over_port() {
        let config =
            ServerConfig::from_vars(Some("127.0.0.1:9000".into()), Some("3000".into())).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_from_vars_nothing_set_keeps_default() {
        let config = ServerConfig::from_vars(None, None).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_from_vars_bad_port_errors() {
        let result = ServerConfig::from_vars(None, Some("eighty".into()));
        assert!(matches!(result, Err(UtttError::Config(_))));
    }
}
