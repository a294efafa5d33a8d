use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use api::theme::SeasonId;

use crate::theme::{ThemeTable, clock::month_day};

// a run of consecutive days that resolve to the same season
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub season: SeasonId,
}

// walk every day of the year and collapse it into spans
//
// spans are contiguous, cover the whole year, and neighbours always differ
pub fn season_calendar(table: &ThemeTable, year: i32) -> Result<Vec<SeasonSpan>> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| anyhow::Error::msg(format!("year {year} is out of range")))?;

    let mut spans: Vec<SeasonSpan> = Vec::new();

    for date in first.iter_days().take_while(|date| date.year() == year) {
        let season = table.season_on(month_day(&date));

        match spans.last_mut() {
            Some(span) if span.season == season => span.last = date,
            _ => spans.push(SeasonSpan {
                first: date,
                last: date,
                season,
            }),
        }
    }

    Ok(spans)
}
