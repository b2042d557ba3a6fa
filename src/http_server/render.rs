use std::convert::Infallible;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::{Html, IntoResponse, Response},
};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use serde_json::Value;

use crate::services::og_tags::OgTags;

/// Everything the frontend needs to mount a page component.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub analytics_key: String,
    pub title: String,
    pub component: &'static str,
    pub props: Value,
    pub responsive: bool,
    pub og_tags: Option<OgTags>,
}

impl RenderedPage {
    pub fn with_og_tags(mut self, og_tags: OgTags) -> Self {
        self.og_tags = Some(og_tags);
        self
    }
}

/// How the client asked for the page: the HTML shell, or the raw payload
/// with `Accept: application/json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Html,
    Json,
}

impl PageFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| {
                accept
                    .split(',')
                    .any(|media| media.trim().starts_with("application/json"))
            });

        if wants_json {
            PageFormat::Json
        } else {
            PageFormat::Html
        }
    }
}

impl<S> FromRequestParts<S> for PageFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Render helper shared by every page route.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    analytics_key: String,
    static_url: String,
}

impl PageRenderer {
    pub fn new(analytics_key: impl Into<String>, static_url: impl Into<String>) -> Self {
        Self {
            analytics_key: analytics_key.into(),
            static_url: static_url.into(),
        }
    }

    /// A responsive page without Open Graph tags.
    pub fn page<P: Serialize>(
        &self,
        title: impl Into<String>,
        component: &'static str,
        props: &P,
    ) -> Result<RenderedPage> {
        let props = serde_json::to_value(props)
            .wrap_err_with(|| format!("Failed to serialize props for {component}"))?;

        Ok(RenderedPage {
            analytics_key: self.analytics_key.clone(),
            title: title.into(),
            component,
            props,
            responsive: true,
            og_tags: None,
        })
    }

    pub fn render(&self, page: &RenderedPage, format: PageFormat) -> Result<Response> {
        match format {
            PageFormat::Json => Ok(Json(page).into_response()),
            PageFormat::Html => Ok(Html(self.html(page)?).into_response()),
        }
    }

    fn html(&self, page: &RenderedPage) -> Result<String> {
        let payload = serde_json::to_string(page).wrap_err("Failed to serialize page")?;

        let mut head = String::new();
        head.push_str("<meta charset=\"utf-8\">\n");
        if page.responsive {
            head.push_str(
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            );
        }
        head.push_str(&format!("<title>{}</title>\n", escape_html(&page.title)));
        if let Some(og_tags) = &page.og_tags {
            for (key, value) in og_tags.iter() {
                // Twitter cards are read from `name`, Open Graph from `property`
                let attribute = if key.starts_with("twitter:") {
                    "name"
                } else {
                    "property"
                };
                head.push_str(&format!(
                    "<meta {attribute}=\"{}\" content=\"{}\">\n",
                    escape_html(key),
                    escape_html(value)
                ));
            }
        }

        let static_url = self.static_url.trim_end_matches('/');
        Ok(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{head}</head>\n<body>\n\
             <div id=\"root\"></div>\n\
             <script id=\"page-data\" type=\"application/json\">{}</script>\n\
             <script src=\"{}/{}.js\" defer></script>\n\
             </body>\n</html>\n",
            escape_script_json(&payload),
            escape_html(static_url),
            page.component,
        ))
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// JSON embedded in a script element must not be able to close it.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
