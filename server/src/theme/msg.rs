use api::theme::{GetThemePartResp, SeasonId, Theme, ThemePart};

use crate::service::{SFM, SFMResp};

#[derive(Debug)]
pub enum ThemeMsg {
    CurrentSeason {
        resp: SFMResp<SeasonId>,
    },
    GetTheme {
        resp: SFMResp<Theme>,
        season: Option<SeasonId>,
    },
    GetThemePart {
        resp: SFMResp<GetThemePartResp>,
        season: Option<SeasonId>,
        part: ThemePart,
    },
    ListThemes {
        resp: SFMResp<Vec<Theme>>,
    },
}

impl From<ThemeMsg> for SFM {
    fn from(value: ThemeMsg) -> Self {
        SFM::Theme(value)
    }
}
