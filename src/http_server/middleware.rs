use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::http_server::{error::PageError, render::PageFormat, state::AppState};
use crate::services::feature_flags::Feature;

const UNSUPPORTED_BROWSER_COMPONENT: &str = "UnsupportedBrowserApp";

fn is_internet_explorer(user_agent: &str) -> bool {
    user_agent.contains("MSIE ") || user_agent.contains("Trident/")
}

/// Internet Explorer gets a static "unsupported browser" page instead of the
/// route.
pub async fn modern_browser_required(
    State(state): State<Arc<AppState>>,
    format: PageFormat,
    request: Request,
    next: Next,
) -> Response {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !is_internet_explorer(user_agent) {
        return next.run(request).await;
    }

    tracing::debug!("Unsupported browser: {user_agent}");
    let rendered = state
        .renderer
        .page("Unsupported Browser", UNSUPPORTED_BROWSER_COMPONENT, &json!({}))
        .and_then(|page| state.renderer.render(&page, format));
    match rendered {
        Ok(response) => response,
        Err(err) => PageError::from(err).into_response(),
    }
}

/// Hide the release pages entirely while the feature is switched off.
pub async fn require_fan_release_page(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.features.is_active(Feature::FanReleasePageEnabled) {
        return PageError::NotFound.into_response();
    }
    next.run(request).await
}

/// Account id set by the upstream auth layer, `None` for anonymous visitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedInUser(pub Option<String>);

impl FromRequestParts<Arc<AppState>> for LoggedInUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(state.config.session_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(LoggedInUser(user_id))
    }
}
