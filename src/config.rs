use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Reads `HOST` and `PORT`, falling back to `0.0.0.0:8080` for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_values(env::var("HOST").ok().as_deref(), env::var("PORT").ok().as_deref())
    }

    pub fn from_values(host: Option<&str>, port: Option<&str>) -> Self {
        let ip = host
            .and_then(|value| value.trim().parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = port
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            addr: SocketAddr::new(ip, port),
        }
    }
}

/// Filter from `RUST_LOG`, or `info` when it is unset, blank, or unparsable.
pub fn log_filter_from_env() -> EnvFilter {
    log_filter(env::var("RUST_LOG").ok().as_deref())
}

pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
