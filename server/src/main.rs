use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::{build_engine, router, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};
use typeahead_core::{EngineConfig, PrefixRanking};

#[derive(Parser)]
struct Args {
    /// Catalog file or directory of .json/.jsonl records
    #[arg(long, default_value = "./catalog")]
    catalog: PathBuf,
    /// Directory of the sled snapshot cache
    #[arg(long, default_value = "./cache")]
    cache: PathBuf,
    /// Cache key the snapshot is stored under
    #[arg(long, default_value = typeahead_core::engine::DEFAULT_CACHE_KEY)]
    cache_key: String,
    /// Snapshot time-to-live in seconds
    #[arg(long, default_value_t = 3600)]
    cache_ttl: u64,
    /// Break prefix score ties by each result's own node frequency
    #[arg(long, default_value_t = false)]
    result_node_ranking: bool,
    /// Build the index before accepting requests
    #[arg(long, default_value_t = false)]
    warm: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut engine = EngineConfig {
        cache_key: args.cache_key,
        cache_ttl: Duration::from_secs(args.cache_ttl),
        ..EngineConfig::default()
    };
    if args.result_node_ranking {
        engine.ranking.prefix_ranking = PrefixRanking::ResultNode;
    }
    let config = ServerConfig {
        catalog: args.catalog,
        cache_dir: args.cache,
        engine,
        admin_token: std::env::var("ADMIN_TOKEN").ok(),
    };
    let engine = build_engine(&config)?;
    if args.warm {
        let warm = engine.clone();
        let outcome = tokio::task::spawn_blocking(move || warm.build_index(false)).await??;
        tracing::info!(?outcome, "search index warmed");
    }
    let app: Router = router(engine.clone(), config.admin_token);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    engine.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
