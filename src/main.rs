use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hrdesk::gateway::RecordGateway;
use hrdesk::{routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-help" || arg == "--help") {
        println!("Usage: hrdesk [OPTIONS]");
        println!("Options:");
        println!("  -config <path>  Path to configuration file (default: ./etc/hrdesk.toml)");
        println!("  -help, --help   Print this help message");
        println!();
        println!("Environment:");
        println!("  {}  Overrides backend.project_id", hrdesk::config::ENV_PROJECT_ID);
        println!("  {}  Overrides backend.public_key", hrdesk::config::ENV_PUBLIC_KEY);
        return Ok(());
    }

    let config_path = args
        .iter()
        .skip_while(|arg| arg.as_str() != "-config")
        .nth(1)
        .map(|s| s.to_string())
        .unwrap_or_else(|| "./etc/hrdesk.toml".to_string());

    // Load configuration first (before logging init)
    let mut config = Config::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Could not load config file: {}, using defaults", e);
        Config::default()
    });
    config.apply_env();

    // Initialize logging
    // Priority: RUST_LOG env var > config file > default "info"
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting Hrdesk server...");
    info!("Loading configuration from: {}", config_path);

    let gateway = RecordGateway::from_config(&config.backend).map_err(|e| {
        tracing::error!("Record backend initialization failed: {}", e);
        e
    })?;
    info!("Record backend: {:?}", config.backend.kind);

    let addr: SocketAddr = match config.addr.parse() {
        Ok(addr) => addr,
        Err(_) => {
            tracing::warn!("Invalid address '{}', using default 0.0.0.0:8080", config.addr);
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
        }
    };

    let state = AppState::new(config, gateway);
    let app = routes::create_router(state);

    info!("Server listening on {}", addr);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
