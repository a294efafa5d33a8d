use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ClockSource;

// storefront server configuration subtables
//
// split out of config.rs to keep the top level struct readable
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HttpConfig {
    // ip and port for http server
    pub socket: String,

    // static files served alongside the api, including the theme
    // assets under /assets
    pub doc_root: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub clock: ClockSource,

    // toml file with a [[themes]] array, replacing the built-in table
    #[serde(default)]
    pub table: Option<PathBuf>,

    // resolve every request as if it were this day, which is handy for
    // previewing a season on a staging storefront
    #[serde(default)]
    pub pin_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LogConfig {
    // one of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: String::from("info"),
        }
    }
}
