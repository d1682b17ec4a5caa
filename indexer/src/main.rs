use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, EnvFilter};
use typeahead_core::{BuildOutcome, EngineConfig, JsonCatalog, SearchEngine, SledCache};

#[derive(Parser)]
#[command(name = "typeahead-indexer")]
#[command(about = "Build and manage the cached type-ahead search index", long_about = None)]
struct Cli {
    /// Catalog file or directory of .json/.jsonl records
    #[arg(long, global = true, default_value = "./catalog")]
    catalog: PathBuf,
    /// Directory of the sled snapshot cache (must not be open by a running server)
    #[arg(long, global = true, default_value = "./cache")]
    cache: PathBuf,
    /// Cache key the snapshot is stored under
    #[arg(long, global = true, default_value = typeahead_core::engine::DEFAULT_CACHE_KEY)]
    cache_key: String,
    /// Snapshot time-to-live in seconds
    #[arg(long, global = true, default_value_t = 3600)]
    cache_ttl: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and store it in the cache
    Build {
        /// Rebuild even if a cached snapshot exists
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Delete the cached snapshot
    Clear,
    /// Print index statistics as JSON
    Stats,
    /// Write the encoded snapshot to a file, building it first if needed
    Export {
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let config = EngineConfig {
        cache_key: cli.cache_key,
        cache_ttl: Duration::from_secs(cli.cache_ttl),
        ..EngineConfig::default()
    };
    let cache = Arc::new(SledCache::open(&cli.cache)?);
    let engine = SearchEngine::new(Arc::new(JsonCatalog::new(&cli.catalog)), cache, config);

    match cli.command {
        Commands::Build { force } => build(&engine, force)?,
        Commands::Clear => {
            engine.clear_cache()?;
            println!("cleared search index cache");
        }
        Commands::Stats => println!("{}", serde_json::to_string_pretty(&engine.stats())?),
        Commands::Export { output } => {
            let bytes = engine.export_snapshot()?;
            std::fs::write(&output, &bytes)?;
            println!("wrote {} bytes to {}", bytes.len(), output.display());
        }
    }
    engine.shutdown();
    Ok(())
}

fn build(engine: &SearchEngine, force: bool) -> Result<()> {
    let start = Instant::now();
    let outcome = engine.build_index(force)?;
    let stats = engine.stats();
    match outcome {
        BuildOutcome::AlreadyLoaded | BuildOutcome::FromCache => {
            println!("search index already cached; pass --force to rebuild");
        }
        BuildOutcome::Built(report) => {
            println!(
                "built search index in {:.2}s: {} items, {} parts, {} entries",
                start.elapsed().as_secs_f64(),
                report.items,
                report.parts,
                report.entries
            );
        }
    }
    println!("  total nodes: {}", stats.total_nodes);
    println!("  terminal nodes: {}", stats.terminal_nodes);
    println!("  loaded: {}", stats.loaded);
    tracing::info!(cache_key = %stats.cache_key, "index build complete");
    Ok(())
}
