use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use livekit_rooms::{create_router, mint_join_token, AppState, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "livekit-rooms")]
#[command(about = "Create, share and record LiveKit video rooms")]
struct Args {
    /// Config file (extension optional; missing file falls back to defaults)
    #[arg(short, long, default_value = "config/livekit-rooms")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web app (default)
    Serve,

    /// Mint a join token and print it
    MintToken {
        /// Room to join (a random room when omitted)
        #[arg(short, long)]
        room: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::MintToken { room } => mint_token(&cfg, room),
    }
}

async fn serve(cfg: Config) -> Result<()> {
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Share links based on {:?}", cfg.base_url());
    if cfg.livekit.api_key.is_none() || cfg.livekit.api_secret.is_none() {
        info!("LiveKit credentials not configured; joining and recording will fail");
    }

    let app = create_router(AppState::new(&cfg));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}

fn mint_token(cfg: &Config, room: Option<String>) -> Result<()> {
    let room = room.unwrap_or_else(|| Uuid::new_v4().to_string());
    let creds = mint_join_token(&cfg.livekit, &room)?;

    println!("Room Name: {}", room);
    println!("Identity: {}", creds.identity);
    println!("Token: {}", creds.token);
    println!("WS URL: {}", creds.ws_url.as_deref().unwrap_or_default());

    Ok(())
}
