use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};
use wx_briefing_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_BRIEFING_PORT, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_USER_AGENT,
};
use wx_sources::{Endpoints, AVIATION_WEATHER_URL, NDFD_URL, NWS_API_URL, OPEN_METEO_URL};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "wx-briefing - Preflight weather briefing for a departure and up to three destinations"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $WX_BRIEFING_CONFIG, ./briefing.toml,
    /// $XDG_CONFIG_HOME/wx-briefing/briefing.toml, /etc/wx-briefing/briefing.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "WX_BRIEFING_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(long, env = "WX_BRIEFING_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WX_BRIEFING_PORT")]
    pub port: Option<String>,

    /// Public URL for the UI
    #[arg(short, long, env = "WX_BRIEFING_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Directory containing UI static files
    #[arg(short, long, env = "WX_BRIEFING_UI_DIR")]
    pub ui_dir: Option<String>,

    /// HTTP User-Agent header sent upstream (api.weather.gov requires one)
    #[arg(long, env = "WX_BRIEFING_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Timeout in seconds for each upstream request
    #[arg(short = 't', long, env = "WX_BRIEFING_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    /// AviationWeather.gov data server endpoint (METAR/TAF)
    #[arg(long, env = "WX_BRIEFING_AVIATION_WEATHER_URL")]
    pub aviation_weather_url: Option<String>,

    /// NWS API base URL (station lookup)
    #[arg(long, env = "WX_BRIEFING_NWS_API_URL")]
    pub nws_api_url: Option<String>,

    /// Open-Meteo forecast endpoint
    #[arg(long, env = "WX_BRIEFING_OPEN_METEO_URL")]
    pub open_meteo_url: Option<String>,

    /// NDFD XML client endpoint
    #[arg(long, env = "WX_BRIEFING_NDFD_URL")]
    pub ndfd_url: Option<String>,

    /// Estimate destination winds aloft at each arrival time instead of the takeoff time
    #[arg(long, env = "WX_BRIEFING_WINDS_ALOFT_AT_ARRIVAL")]
    pub winds_aloft_at_arrival: Option<bool>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_BRIEFING_PORT.to_string())
    }

    pub fn remote_url(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host(), self.port()))
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    pub fn request_timeout(&self) -> u64 {
        self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn winds_aloft_at_arrival(&self) -> bool {
        self.winds_aloft_at_arrival.unwrap_or(false)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            aviation_weather: self
                .aviation_weather_url
                .clone()
                .unwrap_or_else(|| AVIATION_WEATHER_URL.to_string()),
            nws_api: self
                .nws_api_url
                .clone()
                .unwrap_or_else(|| NWS_API_URL.to_string()),
            open_meteo: self
                .open_meteo_url
                .clone()
                .unwrap_or_else(|| OPEN_METEO_URL.to_string()),
            ndfd: self.ndfd_url.clone().unwrap_or_else(|| NDFD_URL.to_string()),
        }
    }

    /// CLI args (and env vars, handled by clap) override file config
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            host: self.host.or(file_config.host),
            port: self.port.or(file_config.port),
            remote_url: self.remote_url.or(file_config.remote_url),
            ui_dir: self.ui_dir.or(file_config.ui_dir),
            user_agent: self.user_agent.or(file_config.user_agent),
            request_timeout: self.request_timeout.or(file_config.request_timeout),
            aviation_weather_url: self
                .aviation_weather_url
                .or(file_config.aviation_weather_url),
            nws_api_url: self.nws_api_url.or(file_config.nws_api_url),
            open_meteo_url: self.open_meteo_url.or(file_config.open_meteo_url),
            ndfd_url: self.ndfd_url.or(file_config.ndfd_url),
            winds_aloft_at_arrival: self
                .winds_aloft_at_arrival
                .or(file_config.winds_aloft_at_arrival),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("WX_BRIEFING_CONFIG", "briefing.toml")
    };

    if let Some(path) = source.path() {
        log::info!("Loading config from: {}", path.display());
    }

    let file_config: Cli = load_config(&source).unwrap_or_default();

    cli_args.merge(file_config)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
