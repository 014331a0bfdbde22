use anyhow::Context;
use clap::Parser;
use plaza_core::{IceServerConfig, RoomConfig};
use plaza_server::{SignalingService, router};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plaza-server", about = "Shared-room position sync and signaling relay")]
struct Args {
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Clamp bound applied to x and z.
    #[arg(long, default_value_t = plaza_core::DEFAULT_HALF_EXTENT)]
    half_extent: f64,

    #[arg(long, default_value_t = plaza_core::DEFAULT_AREA_SIZE)]
    area_size: f64,

    #[arg(long, default_value_t = plaza_core::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Per-tick smoothing factor handed to clients.
    #[arg(long, default_value_t = plaza_core::DEFAULT_INTERPOLATION_FACTOR)]
    interpolation: f64,

    /// STUN/TURN url forwarded to clients; repeat for several.
    #[arg(long = "stun", default_value = "stun:stun.l.google.com:19302")]
    stun: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = RoomConfig {
        half_extent: args.half_extent,
        area_size: args.area_size,
        capacity: args.capacity,
        interpolation_factor: args.interpolation,
        ..RoomConfig::default()
    };

    let ice_servers = args.stun.into_iter().map(IceServerConfig::stun).collect();

    let service =
        SignalingService::start(config, ice_servers).context("invalid room configuration")?;
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("Room server listening on ws://{}/ws", args.bind);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
