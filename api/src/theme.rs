use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

// structs and types

// the closed set of storefront themes
//
// new seasons need a variant here, which keeps every lookup exhaustive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonId {
    Halloween,
    Christmas,
    Valentine,
    Easter,
    Default,
}

impl SeasonId {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Halloween,
            Self::Christmas,
            Self::Valentine,
            Self::Easter,
            Self::Default,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Halloween => "halloween",
            Self::Christmas => "christmas",
            Self::Valentine => "valentine",
            Self::Easter => "easter",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeasonId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeasonId::all()
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::Error::msg(format!("unknown season: {s}")))
    }
}

// a calendar day that is not tied to any particular year
//
// the derived ordering compares month first and then day, which is exactly
// the lexicographic order used by period membership
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        MonthDay { month, day }
    }

    // february is allowed its leap day since periods have no year
    pub fn is_valid(&self) -> bool {
        let last = match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return false,
        };

        (1..=last).contains(&self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

// inclusive activation period of a theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePeriod {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl ActivePeriod {
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        ActivePeriod { start, end }
    }

    pub const fn full_year() -> Self {
        ActivePeriod {
            start: MonthDay::new(1, 1),
            end: MonthDay::new(12, 31),
        }
    }

    // a period wraps when it starts in a later month than it ends, i.e.
    // it runs across new year
    pub fn wraps(&self) -> bool {
        self.start.month > self.end.month
    }

    // wrapping periods are the union of [start, dec 31] and [jan 1, end],
    // everything else is the plain intersection of both bounds
    pub fn contains(&self, date: MonthDay) -> bool {
        if self.wraps() {
            date >= self.start || date <= self.end
        } else {
            date >= self.start && date <= self.end
        }
    }
}

impl fmt::Display for ActivePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPaths {
    pub header_logo: String,
    pub footer_logo: String,
    pub background_image: String,
    pub hero_image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

// the core theme record
//
// themes are static configuration, built once at startup and shared
// read-only for the lifetime of the process
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: SeasonId,
    pub display_name: String,
    pub period: ActivePeriod,
    pub palette: Palette,
    pub assets: AssetPaths,
    pub presentation: Presentation,
}

// the parts of a theme that can be requested on their own
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePart {
    Assets,
    Colors,
    Presentation,
}

// messages

// what season is it now
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentSeasonReq {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentSeasonResp {
    pub season: SeasonId,
}

// fetch a theme, defaulting to the current season
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GetThemeReq {
    #[serde(default)]
    pub season: Option<SeasonId>,
    #[serde(default)]
    pub part: Option<ThemePart>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetThemeResp {
    pub theme: Theme,
}

// a single projection of a theme, used when GetThemeReq names a part
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GetThemePartResp {
    Assets(AssetPaths),
    Colors(Palette),
    Presentation(Presentation),
}

// list every configured theme in declaration order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListThemesResp {
    pub themes: Vec<Theme>,
}
