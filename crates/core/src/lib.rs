//! Weather Briefing Core Library
//!
//! Shared pieces for the briefing server and the upstream source clients:
//! - Configuration loading (XDG-compliant)
//! - Service defaults

mod config;

pub use config::{find_config_file, load_config, ConfigSource};

/// Application name used for XDG paths
pub const APP_NAME: &str = "wx-briefing";

/// Default briefing server port
pub const DEFAULT_BRIEFING_PORT: u16 = 5000;

/// Default timeout for every upstream weather request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 5;

/// Default User-Agent; api.weather.gov rejects requests without one
pub const DEFAULT_USER_AGENT: &str = "wx-briefing/0.1 (preflight weather briefing)";
