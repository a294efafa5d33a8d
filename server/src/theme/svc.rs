use std::sync::Arc;

use anyhow::Result;
use async_cell::sync::AsyncCell;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{Level, debug, error, info, instrument};

use crate::service::{SFInner, SFM, SFMReceiver, SFMRegistry, ServiceType, StorefrontService};
use crate::theme::{SFThemeService, msg::ThemeMsg};
use api::theme::{GetThemePartResp, SeasonId, Theme, ThemePart};
use common::{
    config::SFConfig,
    theme::{ThemeResolver, clock_for, load_table},
};

pub struct ThemeService {
    config: Arc<SFConfig>,
    receiver: Arc<Mutex<SFMReceiver>>,
    handle: AsyncCell<tokio::task::JoinHandle<Result<()>>>,
}

#[async_trait]
impl StorefrontService for ThemeService {
    type Inner = ThemeRunner;

    fn create(config: Arc<SFConfig>, registry: &SFMRegistry) -> Result<Self> {
        let (tx, rx) = tokio::sync::mpsc::channel::<SFM>(1024);

        registry.insert(ServiceType::Theme, tx)?;

        Ok(ThemeService {
            config: config.clone(),
            receiver: Arc::new(Mutex::new(rx)),
            handle: AsyncCell::new(),
        })
    }

    #[instrument(level=Level::DEBUG, skip(self, registry))]
    async fn start(&self, registry: &SFMRegistry) -> Result<()> {
        info!("starting");

        let receiver = Arc::clone(&self.receiver);
        let state = Arc::new(ThemeRunner::new(self.config.clone(), registry.clone()).await?);

        let serve = {
            async move {
                let mut receiver = receiver.lock().await;

                while let Some(msg) = receiver.recv().await {
                    let state = Arc::clone(&state);
                    tokio::task::spawn(async move {
                        match state.message_handler(msg).await {
                            Ok(()) => (),
                            Err(err) => {
                                error!({service = "theme", channel = "sfm", error = %err})
                            }
                        }
                    });
                }

                Err(anyhow::Error::msg("theme service sfm channel disconnected"))
            }
        };

        self.handle.set(tokio::task::spawn(serve));

        debug!("started");
        Ok(())
    }
}

#[derive(Debug)]
pub struct ThemeRunner {
    registry: SFMRegistry,
    resolver: ThemeResolver,
}

#[async_trait]
impl SFThemeService for ThemeRunner {
    #[instrument(level=Level::DEBUG, skip(self))]
    async fn current_season(&self) -> Result<SeasonId> {
        Ok(self.resolver.current_season())
    }

    #[instrument(level=Level::DEBUG, skip(self))]
    async fn get_theme(&self, season: Option<SeasonId>) -> Result<Theme> {
        Ok(self.resolver.theme(season).clone())
    }

    #[instrument(level=Level::DEBUG, skip(self))]
    async fn get_theme_part(
        &self,
        season: Option<SeasonId>,
        part: ThemePart,
    ) -> Result<GetThemePartResp> {
        Ok(match part {
            ThemePart::Assets => GetThemePartResp::Assets(self.resolver.assets(season).clone()),
            ThemePart::Colors => GetThemePartResp::Colors(self.resolver.colors(season).clone()),
            ThemePart::Presentation => {
                GetThemePartResp::Presentation(self.resolver.presentation(season).clone())
            }
        })
    }

    #[instrument(level=Level::DEBUG, skip(self))]
    async fn list_themes(&self) -> Result<Vec<Theme>> {
        Ok(self.resolver.table().themes().to_vec())
    }
}

#[async_trait]
impl SFInner for ThemeRunner {
    // the table is validated here, so a bad table stops the service from starting
    async fn new(config: Arc<SFConfig>, registry: SFMRegistry) -> Result<Self> {
        let table = load_table(&config.theme).await?;
        let clock = clock_for(&config.theme);

        debug!({ clock = ?clock }, "theme clock selected");

        Ok(ThemeRunner {
            registry,
            resolver: ThemeResolver::new(Arc::new(table), clock),
        })
    }

    fn registry(&self) -> SFMRegistry {
        self.registry.clone()
    }

    async fn message_handler(&self, sfm: SFM) -> Result<()> {
        match sfm {
            SFM::Theme(message) => match message {
                ThemeMsg::CurrentSeason { resp } => {
                    self.respond(resp, self.current_season()).await
                }
                ThemeMsg::GetTheme { resp, season } => {
                    self.respond(resp, self.get_theme(season)).await
                }
                ThemeMsg::GetThemePart { resp, season, part } => {
                    self.respond(resp, self.get_theme_part(season, part)).await
                }
                ThemeMsg::ListThemes { resp } => self.respond(resp, self.list_themes()).await,
            },
        }
    }
}
