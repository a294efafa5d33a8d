use std::{path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::Parser;
use tracing::{Level, Metadata, info, warn};
use tracing_subscriber::{
    filter::FilterFn,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

mod checks;
mod http;
mod service;
mod theme;

use common::{
    config::read_config,
    server::LogConfig,
    theme::load_table,
};
use service::{SFMRegistry, StorefrontService};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "/etc/storefront/config.toml")]
    config: String,
}

fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let level = Level::from_str(&config.level)
        .with_context(|| format!("invalid log level {}", config.level))?;

    // hyper and h2 are chatty at debug, and nothing we log lives there
    let crate_filter = FilterFn::new(move |metadata: &Metadata<'_>| {
        metadata.level() <= &level
            && !metadata.target().starts_with("h2")
            && !metadata.target().starts_with("hyper")
    })
    .with_max_level_hint(level);

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(crate_filter))
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = read_config(PathBuf::from(args.config)).await?;

    init_logging(&config.log)?;

    info!("storefront server starting up");

    info!("performing theme sanity checks");

    let table = load_table(&config.theme)
        .await
        .context("theme table failed validation")?;

    checks::doc_root_exists(&config.http.doc_root)?;

    for url in checks::missing_theme_assets(&config.http.doc_root, &table) {
        warn!({ asset = %url }, "theme asset missing from doc_root");
    }

    for url in checks::stray_theme_assets(&table) {
        warn!({ asset = %url }, "theme asset outside of the asset path");
    }

    info!("starting core services");

    let registry = SFMRegistry::new();

    let theme_svc = theme::svc::ThemeService::create(config.clone(), &registry)?;
    let http_svc = http::svc::HttpService::create(config.clone(), &registry)?;

    theme_svc.start(&registry).await?;
    http_svc.start(&registry).await?;

    info!("startup complete!");

    tokio::signal::ctrl_c().await?;

    info!("shutting down");
    Ok(())
}
