use anyhow::Result;
use async_trait::async_trait;

use api::theme::{GetThemePartResp, SeasonId, Theme, ThemePart};

use crate::service::SFInner;

pub mod check;
pub mod msg;
pub mod svc;

// the theme service owns the seasonal resolver and answers questions about
// which theme applies, so that nothing else needs to know about clocks
#[async_trait]
pub trait SFThemeService: SFInner {
    async fn current_season(&self) -> Result<SeasonId>;

    async fn get_theme(&self, season: Option<SeasonId>) -> Result<Theme>;

    async fn get_theme_part(
        &self,
        season: Option<SeasonId>,
        part: ThemePart,
    ) -> Result<GetThemePartResp>;

    async fn list_themes(&self) -> Result<Vec<Theme>>;
}
