use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{Level, debug, info, instrument};

use api::theme::{ActivePeriod, AssetPaths, MonthDay, Palette, Presentation, SeasonId, Theme};

use crate::server::ThemeConfig;

// theme table
//
// the ordered list of themes used for resolution.  order matters: the first
// non-default theme whose period contains a date wins, so overlapping periods
// are legal and resolved by declaration order.  the default theme is only
// ever a fallback and its period is never tested.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeTable {
    themes: Vec<Theme>,
    default: usize,
}

impl ThemeTable {
    // validate and wrap a list of themes
    //
    // any error here is a configuration defect and should stop startup
    pub fn new(themes: Vec<Theme>) -> Result<Self> {
        let mut default = None;
        let mut seen = HashSet::new();

        for (idx, theme) in themes.iter().enumerate() {
            for date in [theme.period.start, theme.period.end] {
                if !date.is_valid() {
                    return Err(anyhow::Error::msg(format!(
                        "theme {} has invalid date {date}",
                        theme.id
                    )));
                }
            }

            if theme.id == SeasonId::Default {
                if default.is_some() {
                    return Err(anyhow::Error::msg("theme table has more than one default theme"));
                }

                if theme.period != ActivePeriod::full_year() {
                    return Err(anyhow::Error::msg(format!(
                        "default theme must span the whole year, not {}",
                        theme.period
                    )));
                }

                default = Some(idx);
                continue;
            }

            if !seen.insert(theme.id) {
                return Err(anyhow::Error::msg(format!(
                    "theme {} is declared more than once",
                    theme.id
                )));
            }

            // same-month periods never wrap, so an inverted one could never match
            if !theme.period.wraps() && theme.period.start > theme.period.end {
                return Err(anyhow::Error::msg(format!(
                    "theme {} has an empty period {}",
                    theme.id, theme.period
                )));
            }
        }

        let default =
            default.ok_or_else(|| anyhow::Error::msg("theme table has no default theme"))?;

        Ok(ThemeTable { themes, default })
    }

    // the storefront's own seasons
    pub fn builtin() -> Self {
        let themes = builtin_themes();
        let default = themes.len() - 1;

        ThemeTable { themes, default }
    }

    pub fn from_toml_str(doc: &str) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        struct TomlThemes {
            themes: Vec<Theme>,
        }

        let data: TomlThemes = toml::from_str(doc).context("failed to parse theme table")?;

        ThemeTable::new(data.themes)
    }

    #[instrument(level=Level::DEBUG)]
    pub async fn from_toml_file(filename: &Path) -> Result<Self> {
        debug!("reading theme table");

        let doc = tokio::fs::read_to_string(filename)
            .await
            .with_context(|| format!("failed to read theme table {filename:?}"))?;

        ThemeTable::from_toml_str(&doc)
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    // every theme that takes part in period matching, in declaration order
    pub fn seasonal(&self) -> impl Iterator<Item = &Theme> {
        self.themes
            .iter()
            .filter(|theme| theme.id != SeasonId::Default)
    }

    pub fn get(&self, id: SeasonId) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.id == id)
    }

    pub fn default_theme(&self) -> &Theme {
        &self.themes[self.default]
    }

    pub fn season_on(&self, date: MonthDay) -> SeasonId {
        self.seasonal()
            .find(|theme| theme.period.contains(date))
            .map(|theme| theme.id)
            .unwrap_or(SeasonId::Default)
    }
}

// pick the table named by the config, or the built-in one
pub async fn load_table(config: &ThemeConfig) -> Result<ThemeTable> {
    let table = match &config.table {
        Some(filename) => ThemeTable::from_toml_file(filename).await?,
        None => ThemeTable::builtin(),
    };

    info!({ themes = table.themes().len() }, "theme table loaded");

    Ok(table)
}

fn seasonal_assets(id: SeasonId) -> AssetPaths {
    AssetPaths {
        header_logo: format!("/assets/{id}/logo-{id}.svg"),
        footer_logo: format!("/assets/{id}/footer-logo-{id}.svg"),
        background_image: format!("/assets/{id}/background-{id}.jpg"),
        hero_image: format!("/assets/{id}/hero-{id}.jpg"),
    }
}

fn palette(primary: &str, secondary: &str, accent: &str, background: &str) -> Palette {
    Palette {
        primary: primary.to_owned(),
        secondary: secondary.to_owned(),
        accent: accent.to_owned(),
        background: background.to_owned(),
    }
}

fn seasonal_theme(
    id: SeasonId,
    display_name: &str,
    period: ActivePeriod,
    palette: Palette,
    font_family: &str,
) -> Theme {
    Theme {
        id,
        display_name: display_name.to_owned(),
        period,
        palette,
        assets: seasonal_assets(id),
        presentation: Presentation {
            class_name: format!("theme-{id}"),
            font_family: Some(font_family.to_owned()),
        },
    }
}

pub fn builtin_themes() -> Vec<Theme> {
    vec![
        seasonal_theme(
            SeasonId::Halloween,
            "Halloween",
            ActivePeriod::new(MonthDay::new(10, 1), MonthDay::new(11, 2)),
            palette("#FF6B35", "#6B46C1", "#F59E0B", "#1F2937"),
            "Creepster, cursive",
        ),
        seasonal_theme(
            SeasonId::Christmas,
            "Christmas",
            ActivePeriod::new(MonthDay::new(12, 1), MonthDay::new(12, 31)),
            palette("#DC2626", "#059669", "#D97706", "#F9FAFB"),
            "Mountains of Christmas, cursive",
        ),
        seasonal_theme(
            SeasonId::Valentine,
            "Valentine's Day",
            ActivePeriod::new(MonthDay::new(2, 1), MonthDay::new(2, 18)),
            palette("#EC4899", "#DC2626", "#7C3AED", "#FFFFFF"),
            "Dancing Script, cursive",
        ),
        seasonal_theme(
            SeasonId::Easter,
            "Easter",
            ActivePeriod::new(MonthDay::new(3, 15), MonthDay::new(4, 15)),
            palette("#F9A8D4", "#93C5FD", "#FDE68A", "#F9FAFB"),
            "Quicksand, sans-serif",
        ),
        Theme {
            id: SeasonId::Default,
            display_name: String::from("Default"),
            period: ActivePeriod::full_year(),
            palette: palette("#000000", "#6B7280", "#3B82F6", "#FFFFFF"),
            assets: AssetPaths {
                header_logo: String::from("/assets/default/logo.svg"),
                footer_logo: String::from("/assets/default/footer-logo.svg"),
                background_image: String::from("/assets/default/background.jpg"),
                hero_image: String::from("/assets/default/hero.jpg"),
            },
            presentation: Presentation {
                class_name: String::from("theme-default"),
                font_family: None,
            },
        },
    ]
}
