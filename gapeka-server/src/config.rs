//! Configuration for the precompute pass and the server.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono_tz::Tz;

/// Error returned when an environment override cannot be parsed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid GAPEKA_ADDR: {0}")]
    InvalidAddr(String),

    #[error("invalid GAPEKA_TZ: {0}")]
    InvalidTimezone(String),
}

/// Configuration for the route precomputation pass.
#[derive(Debug, Clone)]
pub struct PrecomputeConfig {
    /// Maximum distance in meters for snapping a station to a rail node.
    /// Stations whose nearest node is at or beyond this are treated as
    /// unreachable from the rail graph.
    pub snap_threshold_m: f64,
}

impl Default for PrecomputeConfig {
    fn default() -> Self {
        Self {
            snap_threshold_m: 2000.0,
        }
    }
}

/// Configuration for the position server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,

    /// Directory holding the timetable, station, and precomputed route
    /// files.
    pub data_dir: PathBuf,

    /// Directory of static frontend assets.
    pub static_dir: PathBuf,

    /// Timezone the timetable is written in. GAPEKA times are WIB
    /// (Asia/Jakarta); the current time-of-day is evaluated in this zone.
    pub timezone: Tz,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("public"),
            timezone: chrono_tz::Asia::Jakarta,
        }
    }
}

impl ServerConfig {
    /// Build a configuration from `GAPEKA_*` environment variables,
    /// falling back to defaults for unset ones.
    ///
    /// Recognized: `GAPEKA_ADDR`, `GAPEKA_DATA_DIR`, `GAPEKA_STATIC_DIR`,
    /// `GAPEKA_TZ`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("GAPEKA_ADDR") {
            config.addr = addr.parse().map_err(|_| ConfigError::InvalidAddr(addr))?;
        }
        if let Ok(dir) = std::env::var("GAPEKA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("GAPEKA_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Ok(tz) = std::env::var("GAPEKA_TZ") {
            config.timezone = tz.parse().map_err(|_| ConfigError::InvalidTimezone(tz))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precompute_defaults() {
        let config = PrecomputeConfig::default();
        assert_eq!(config.snap_threshold_m, 2000.0);
    }

    #[test]
    fn server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.timezone, chrono_tz::Asia::Jakarta);
    }
}
