use clap::Parser;
use newsintel::application::engine::IntelligenceEngine;
use newsintel::application::noise::NoiseFilterConfig;
use newsintel::config::Config;
use newsintel::infrastructure::publisher::IndicatorPublisher;
use newsintel::infrastructure::JsonArticleStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Build intelligence indicators from the enriched article store.
#[derive(Parser, Debug)]
#[command(name = "newsintel", version, about)]
struct Cli {
    /// Path to the article store snapshot (overrides NEWSINTEL_STORE).
    #[arg(long)]
    store: Option<PathBuf>,

    /// Directory to publish indicator artifacts into (overrides NEWSINTEL_OUT).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(out) = cli.out {
        config.output_dir = out;
    }

    info!(
        store = %config.store_path.display(),
        out = %config.output_dir.display(),
        "starting indicator build"
    );

    let store = Arc::new(JsonArticleStore::new(&config.store_path));
    let filter_config = NoiseFilterConfig {
        min_topic_len: config.min_topic_len,
        ..NoiseFilterConfig::default()
    };
    let engine = IntelligenceEngine::with_filter_config(store, filter_config)?;
    let publisher = IndicatorPublisher::new(&config.output_dir);

    let run = engine.run_and_publish(&publisher).await?;

    info!(
        articles = run.national.total_articles,
        overall_sentiment = run.national.overall_sentiment,
        trend = %run.trends.trend,
        "indicator build complete"
    );
    Ok(())
}
