use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{Level, instrument};

use crate::service::{SFInner, ServiceType};
use crate::theme::msg::ThemeMsg;
use api::theme::{GetThemePartResp, SeasonId, Theme, ThemePart};

// theme lookups for other services
//
// wraps the message round trip to the theme service, so that callers only
// need a registry
#[async_trait]
pub trait ThemeCheck: SFInner + Debug {
    #[instrument(level=Level::DEBUG)]
    async fn season_now(&self) -> Result<SeasonId> {
        let theme_svc_sender = self.registry().get(&ServiceType::Theme)?;
        let (tx, rx) = tokio::sync::oneshot::channel();

        theme_svc_sender
            .send(ThemeMsg::CurrentSeason { resp: tx }.into())
            .await?;

        rx.await?
    }

    #[instrument(level=Level::DEBUG)]
    async fn fetch_theme(&self, season: Option<SeasonId>) -> Result<Theme> {
        let theme_svc_sender = self.registry().get(&ServiceType::Theme)?;
        let (tx, rx) = tokio::sync::oneshot::channel();

        theme_svc_sender
            .send(ThemeMsg::GetTheme { resp: tx, season }.into())
            .await?;

        rx.await?
    }

    #[instrument(level=Level::DEBUG)]
    async fn fetch_theme_part(
        &self,
        season: Option<SeasonId>,
        part: ThemePart,
    ) -> Result<GetThemePartResp> {
        let theme_svc_sender = self.registry().get(&ServiceType::Theme)?;
        let (tx, rx) = tokio::sync::oneshot::channel();

        theme_svc_sender
            .send(
                ThemeMsg::GetThemePart {
                    resp: tx,
                    season,
                    part,
                }
                .into(),
            )
            .await?;

        rx.await?
    }

    #[instrument(level=Level::DEBUG)]
    async fn fetch_themes(&self) -> Result<Vec<Theme>> {
        let theme_svc_sender = self.registry().get(&ServiceType::Theme)?;
        let (tx, rx) = tokio::sync::oneshot::channel();

        theme_svc_sender
            .send(ThemeMsg::ListThemes { resp: tx }.into())
            .await?;

        rx.await?
    }
}
