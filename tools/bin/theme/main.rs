use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use api::theme::SeasonId;
use common::{
    config::read_config,
    server::ThemeConfig,
    theme::{ThemeResolver, clock::month_day, clock_for, css_variables, load_table, season_calendar},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// config file (the built-in theme table and local clock are used without one)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// show the season for a date
    Season {
        /// date to resolve, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// print a theme
    Show {
        /// season to print (defaults to the current one)
        #[arg()]
        season: Option<SeasonId>,

        /// print css custom properties instead of json
        #[arg(long)]
        css: bool,
    },

    /// list which season applies across a year
    Calendar {
        /// year to walk (defaults to this year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// validate the theme table
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let theme_config = match &cli.config {
        Some(filename) => read_config(PathBuf::from(filename)).await?.theme.clone(),
        None => ThemeConfig::default(),
    };

    let table = Arc::new(load_table(&theme_config).await?);
    let resolver = ThemeResolver::new(table.clone(), clock_for(&theme_config));

    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Season { date } => {
                let season = match date {
                    Some(date) => table.season_on(month_day(date)),
                    None => resolver.current_season(),
                };

                println!("{season}");
            }
            Commands::Show { season, css } => {
                let theme = resolver.theme(*season);

                if *css {
                    print!("{}", css_variables(theme));
                } else {
                    println!("{}", serde_json::to_string_pretty(theme)?);
                }
            }
            Commands::Calendar { year } => {
                let year = year.unwrap_or_else(|| Local::now().year());

                for span in season_calendar(&table, year)? {
                    println!("{} - {}  {}", span.first, span.last, span.season);
                }
            }
            Commands::Check => {
                for theme in table.themes() {
                    let period = if theme.id == SeasonId::Default {
                        String::from("fallback")
                    } else {
                        theme.period.to_string()
                    };

                    println!("{:<10} {:<16} {}", theme.id.as_str(), theme.display_name, period);
                }

                println!("theme table ok ({} themes)", table.themes().len());
            }
        }
    }

    Ok(())
}
