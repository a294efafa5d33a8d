use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    http::{AppError, client_error, svc::HttpEndpoint},
    theme::check::ThemeCheck,
};
use api::theme::*;
use common::theme::css_variables;

// http api endpoints
//
// the endpoints map onto theme service messages; layout rendering calls one
// of them once per request and threads the result through to styling

#[instrument(skip_all)]
pub(super) async fn get_season(
    State(state): State<Arc<HttpEndpoint>>,
) -> Result<Response, AppError> {
    let season = state.season_now().await?;

    Ok(Json(CurrentSeasonResp { season }).into_response())
}

#[instrument(skip_all)]
pub(super) async fn get_theme(
    State(state): State<Arc<HttpEndpoint>>,
    Json(message): Json<GetThemeReq>,
) -> Result<Response, AppError> {
    match message.part {
        Some(part) => {
            let result = state.fetch_theme_part(message.season, part).await?;

            Ok(Json(result).into_response())
        }
        None => {
            let theme = state.fetch_theme(message.season).await?;

            Ok(Json(GetThemeResp { theme }).into_response())
        }
    }
}

#[instrument(skip_all)]
pub(super) async fn get_named_theme(
    State(state): State<Arc<HttpEndpoint>>,
    Path(season): Path<String>,
) -> Result<Response, AppError> {
    let season = match season.parse::<SeasonId>() {
        Ok(season) => season,
        Err(err) => return Ok(client_error(StatusCode::NOT_FOUND, err.to_string())),
    };

    let theme = state.fetch_theme(Some(season)).await?;

    Ok(Json(GetThemeResp { theme }).into_response())
}

#[instrument(skip_all)]
pub(super) async fn list_themes(
    State(state): State<Arc<HttpEndpoint>>,
) -> Result<Response, AppError> {
    let themes = state.fetch_themes().await?;

    Ok(Json(ListThemesResp { themes }).into_response())
}

#[derive(Debug, Deserialize)]
pub(super) struct ThemeCssQuery {
    season: Option<String>,
}

#[instrument(skip_all)]
pub(super) async fn theme_css(
    State(state): State<Arc<HttpEndpoint>>,
    Query(query): Query<ThemeCssQuery>,
) -> Result<Response, AppError> {
    let season = match query.season.as_deref().map(str::parse::<SeasonId>) {
        None => None,
        Some(Ok(season)) => Some(season),
        Some(Err(err)) => return Ok(client_error(StatusCode::NOT_FOUND, err.to_string())),
    };

    let theme = state.fetch_theme(season).await?;

    Ok(([(CONTENT_TYPE, "text/css; charset=utf-8")], css_variables(&theme)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::{
        http::svc::router,
        service::{SFInner, SFMRegistry, StorefrontService},
        theme::svc::ThemeService,
    };
    use common::config::parse_config;

    use super::*;

    async fn test_router(pin_date: &str, doc_root: &str) -> Router {
        let doc = format!(
            r#"
            [config.http]
            socket = "127.0.0.1:0"
            doc_root = "{doc_root}"

            [config.theme]
            pin_date = "{pin_date}"
            "#
        );
        let config = Arc::new(parse_config(&doc).unwrap());
        let registry = SFMRegistry::new();

        let theme_svc = ThemeService::create(config.clone(), &registry).unwrap();
        theme_svc.start(&registry).await.unwrap();

        let state = Arc::new(HttpEndpoint::new(config, registry).await.unwrap());

        router(state)
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(router: Router, uri: &str, body: &str) -> Response {
        router
            .oneshot(
                Request::post(uri)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn season_follows_the_clock() {
        let router = test_router("2024-02-10", "/nonexistent").await;

        let response = get(router, "/api/season").await;
        assert_eq!(response.status(), StatusCode::OK);

        let resp: CurrentSeasonResp = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(resp.season, SeasonId::Valentine);
    }

    #[tokio::test]
    async fn theme_defaults_to_current_season() {
        let router = test_router("2024-06-15", "/nonexistent").await;

        let response = post_json(router, "/api/theme", "{}").await;
        assert_eq!(response.status(), StatusCode::OK);

        let resp: GetThemeResp = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(resp.theme.id, SeasonId::Default);
        assert_eq!(resp.theme.presentation.class_name, "theme-default");
    }

    #[tokio::test]
    async fn theme_part_projection() {
        let router = test_router("2024-06-15", "/nonexistent").await;

        let response = post_json(
            router,
            "/api/theme",
            r#"{"season": "halloween", "part": "assets"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let resp: GetThemePartResp = serde_json::from_slice(&body_bytes(response).await).unwrap();
        match resp {
            GetThemePartResp::Assets(assets) => assert_eq!(
                assets.footer_logo,
                "/assets/halloween/footer-logo-halloween.svg"
            ),
            other => panic!("unexpected part {other:?}"),
        }
    }

    #[tokio::test]
    async fn named_theme_lookup() {
        let router = test_router("2024-06-15", "/nonexistent").await;

        let response = get(router.clone(), "/api/theme/easter").await;
        assert_eq!(response.status(), StatusCode::OK);

        let resp: GetThemeResp = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(resp.theme.id, SeasonId::Easter);

        let response = get(router, "/api/theme/summer").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_themes_in_order() {
        let router = test_router("2024-06-15", "/nonexistent").await;

        let response = get(router, "/api/themes").await;
        let resp: ListThemesResp = serde_json::from_slice(&body_bytes(response).await).unwrap();

        let ids: Vec<SeasonId> = resp.themes.iter().map(|theme| theme.id).collect();
        assert_eq!(ids, SeasonId::all());
    }

    #[tokio::test]
    async fn css_for_current_and_named_season() {
        let router = test_router("2024-12-15", "/nonexistent").await;

        let response = get(router.clone(), "/theme.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/css")
        );

        let css = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(css.starts_with(".theme-christmas {"));
        assert!(css.contains("--theme-primary: #DC2626;"));

        let response = get(router.clone(), "/theme.css?season=easter").await;
        let css = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(css.starts_with(".theme-easter {"));

        let response = get(router, "/theme.css?season=summer").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_theme_assets_from_doc_root() {
        let doc_root = std::env::temp_dir().join(format!("sf-doc-root-{}", std::process::id()));
        let asset_dir = doc_root.join("assets/default");
        std::fs::create_dir_all(&asset_dir).unwrap();
        std::fs::write(asset_dir.join("logo.svg"), "<svg/>").unwrap();

        let router = test_router("2024-06-15", doc_root.to_str().unwrap()).await;

        let response = get(router.clone(), "/assets/default/logo.svg").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"<svg/>".to_vec());

        let response = get(router, "/assets/default/missing.svg").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        std::fs::remove_dir_all(&doc_root).unwrap();
    }
}
