use anyhow::anyhow;
use axum::serve;
use log::{error, info};
use std::{net::SocketAddr, str::FromStr, time::Duration};
use tokio::{net::TcpListener, signal};
use wx_briefing::{app, build_app_state, get_config_info, get_log_level, setup_logger, AssembleOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = get_config_info();
    let log_level = get_log_level(&cli);

    setup_logger()
        .level(log_level)
        .level_for("wx_briefing", log_level)
        .level_for("wx_sources", log_level)
        .level_for("http_response", log_level)
        .level_for("http_request", log_level)
        .apply()?;

    let static_dir = cli.static_dir();
    let remote_url = cli.remote_url();
    let host = cli.host();
    let port = cli.port();
    let options = AssembleOptions {
        winds_aloft_at_arrival: cli.winds_aloft_at_arrival(),
    };

    let socket_addr = SocketAddr::from_str(&format!("{}:{}", host, port))
        .map_err(|e| anyhow!("invalid address: {}", e))?;

    let listener = TcpListener::bind(socket_addr)
        .await
        .map_err(|e| anyhow!("error binding to socket: {}", e))?;

    info!("wx-briefing starting...");
    info!("  Listen: http://{}", socket_addr);
    info!("  Docs:   http://{}/docs", socket_addr);
    info!("  Static: {}", static_dir);
    info!("  Upstream timeout: {}s", cli.request_timeout());
    if options.winds_aloft_at_arrival {
        info!("  Destination winds aloft use arrival times");
    }

    let app_state = build_app_state(
        remote_url,
        static_dir,
        cli.user_agent(),
        Duration::from_secs(cli.request_timeout()),
        cli.endpoints(),
        options,
    )
    .map_err(|e| {
        error!("error building app: {}", e);
        e
    })?;

    let app = app(app_state);

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
