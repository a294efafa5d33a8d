use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, instrument};

use crate::server::{HttpConfig, LogConfig, ThemeConfig};

// storefront configuration
//
// this struct contains all of the configuration options used by the server and cli tools
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SFConfig {
    // core services
    pub http: HttpConfig,
    pub theme: ThemeConfig,

    // ambient
    #[serde(default)]
    pub log: LogConfig,
}

// where "today" comes from when resolving the current season
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum ClockSource {
    // server local time, which is what the storefront has always used
    #[default]
    Local,
    Utc,
}

// in order to extract the config table from a larger document, we need to specify it
// as a subtable of the root node, i.e. a substruct
#[derive(Debug, Deserialize, Serialize)]
struct TomlConfigFile {
    config: SFConfig,
}

pub fn parse_config(doc: &str) -> Result<SFConfig> {
    let data: TomlConfigFile = toml::from_str(doc).context("failed to parse config file")?;

    Ok(data.config)
}

#[instrument(level=Level::DEBUG)]
pub async fn read_config(filename: PathBuf) -> Result<Arc<SFConfig>> {
    debug!("reading config file");

    let doc = tokio::fs::read_to_string(&filename)
        .await
        .with_context(|| format!("failed to read config file {filename:?}"))?;

    let config = parse_config(&doc)?;

    debug!("successfully parsed config file");
    Ok(Arc::new(config))
}
