use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use color_eyre::eyre::{Context, eyre};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::http_server::{
    http_routes::fan_page,
    middleware::{modern_browser_required, require_fan_release_page},
    state::AppState,
};

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: Arc<AppState>) -> Router {
    let release_pages = Router::new()
        .route(
            "/{fan_page_handle}/r/{release_id}",
            get(fan_page::release_fan_page),
        )
        .route(
            "/{fan_page_handle}/r/{release_handle}/{release_id}",
            get(fan_page::canonical_release_fan_page),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_fan_release_page,
        ));

    let browser_pages = Router::new()
        .route("/{fan_page_handle}", get(fan_page::fan_page))
        .merge(release_pages)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            modern_browser_required,
        ));

    let mut app = Router::new()
        .route("/_health", get(health))
        .route(
            "/{fan_page_handle}/s/{sweeps_name}",
            get(fan_page::fan_page_winner),
        )
        .route(
            "/{fan_page_handle}/t/{terms_name}",
            get(fan_page::fan_page_terms),
        )
        .merge(browser_pages);

    if let Some(static_directory) = state.config.static_directory_path() {
        tracing::info!("Serving static files from {}", static_directory.display());
        app = app.nest_service("/static", ServeDir::new(static_directory));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

pub async fn start(port: u16, state: Arc<AppState>) -> color_eyre::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", port))?;
    tracing::info!("Listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        return;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ports::{
        delivery::MockDeliveryClient, smartlink::MockSmartlinkClient,
        warehouse::MockWarehouseClient,
    };
    use crate::test_utils::test_db;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let state = AppState::new(
            test_db().await,
            Config::default(),
            Arc::new(MockSmartlinkClient::new()),
            Arc::new(MockDeliveryClient::new()),
            Arc::new(MockWarehouseClient::new()),
        );

        let response = router(Arc::new(state))
            .oneshot(Request::builder().uri("/_health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ok");
    }
}
