use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use async_cell::sync::AsyncCell;
use async_trait::async_trait;
use axum::{
    Router,
    extract::Request,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::Service;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{Level, debug, error, info, instrument};

use crate::http::api::{get_named_theme, get_season, get_theme, list_themes, theme_css};
use crate::service::{SFInner, SFM, SFMRegistry, StorefrontService};
use crate::theme::check::ThemeCheck;
use api::{SEASON_ENDPOINT, THEME_CSS_ENDPOINT, THEME_ENDPOINT, THEMES_ENDPOINT};
use common::config::SFConfig;

pub struct HttpService {
    config: Arc<SFConfig>,
    hyper_handle: AsyncCell<tokio::task::JoinHandle<Result<()>>>,
}

#[async_trait]
impl StorefrontService for HttpService {
    type Inner = HttpEndpoint;

    fn create(config: Arc<SFConfig>, _registry: &SFMRegistry) -> Result<Self> {
        Ok(HttpService {
            config: config.clone(),
            hyper_handle: AsyncCell::new(),
        })
    }

    #[instrument(level=Level::DEBUG, skip(self, registry))]
    async fn start(&self, registry: &SFMRegistry) -> Result<()> {
        info!("starting");

        let state = Arc::new(HttpEndpoint::new(self.config.clone(), registry.clone()).await?);

        let socket: SocketAddr = self
            .config
            .http
            .socket
            .parse()
            .with_context(|| format!("invalid http socket {}", self.config.http.socket))?;

        // for the moment, we just fail if the socket is in use
        let listener = TcpListener::bind(socket)
            .await
            .with_context(|| format!("failed to bind http socket {socket}"))?;

        info!({ socket = %socket }, "listening");

        self.hyper_handle
            .set(tokio::task::spawn(serve_http(listener, router(state))));

        debug!("started");
        Ok(())
    }
}

#[derive(Debug)]
pub struct HttpEndpoint {
    registry: SFMRegistry,
    doc_root: PathBuf,
}

#[async_trait]
impl SFInner for HttpEndpoint {
    async fn new(config: Arc<SFConfig>, registry: SFMRegistry) -> Result<Self> {
        Ok(HttpEndpoint {
            registry,
            doc_root: config.http.doc_root.clone(),
        })
    }

    fn registry(&self) -> SFMRegistry {
        self.registry.clone()
    }

    async fn message_handler(&self, _sfm: SFM) -> Result<()> {
        Err(anyhow::Error::msg("not implemented"))
    }
}

impl ThemeCheck for HttpEndpoint {}

// the storefront api, with everything else falling through to the static
// document root (which is where theme assets live)
pub fn router(state: Arc<HttpEndpoint>) -> Router {
    let static_files = ServeDir::new(&state.doc_root);

    Router::new()
        .route(SEASON_ENDPOINT, get(get_season))
        .route(THEME_ENDPOINT, post(get_theme))
        .route(&format!("{THEME_ENDPOINT}/{{season}}"), get(get_named_theme))
        .route(THEMES_ENDPOINT, get(list_themes))
        .route(THEME_CSS_ENDPOINT, get(theme_css))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_http(listener: TcpListener, router: Router) -> Result<()> {
    let service = hyper::service::service_fn(move |request: Request<hyper::body::Incoming>| {
        router.clone().call(request)
    });

    // the main http server loop
    loop {
        let (stream, _) = listener.accept().await?;

        let service = service.clone();

        let io = hyper_util::rt::TokioIo::new(stream);

        tokio::task::spawn(async move {
            match hyper_util::server::conn::auto::Builder::new(hyper_util::rt::TokioExecutor::new())
                .serve_connection(io, service)
                .await
            {
                Ok(()) => (),
                Err(err) => error!({service = "http", channel = "hyper", error = %err}),
            }
        });
    }
}
