use color_eyre::eyre::{Result, WrapErr};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::FeatureFmConfig;
use crate::ports::smartlink::{SmartlinkClient, SmartlinkRequest};

#[derive(Debug, Clone, Deserialize)]
struct SmartlinkListResponse {
    #[serde(default)]
    smartlinks: Vec<Smartlink>,
}

#[derive(Debug, Clone, Deserialize)]
struct Smartlink {
    url: Option<String>,
}

/// Smartlink adapter for the Feature.fm API. Without credentials every
/// lookup returns `None`.
pub struct FeatureFmClient {
    client: Client,
    config: Option<FeatureFmConfig>,
}

impl FeatureFmClient {
    pub fn new(config: Option<FeatureFmConfig>) -> Self {
        if config.is_none() {
            tracing::info!("Feature.fm is not configured, smartlinks are disabled");
        }
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl SmartlinkClient for FeatureFmClient {
    async fn get_smartlink(&self, release: &SmartlinkRequest) -> Result<Option<String>> {
        let Some(config) = &self.config else {
            return Ok(None);
        };
        let Some(upc) = &release.upc else {
            tracing::debug!("Release {} has no UPC, skipping smartlink", release.release_id);
            return Ok(None);
        };

        let mut url = Url::parse(&config.base_url)
            .wrap_err("Invalid Feature.fm base url")?
            .join("v1/smartlinks")?;
        url.query_pairs_mut().append_pair("upc", upc);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("x-api-key", &config.api_key)
            .send()
            .await
            .wrap_err("Failed to reach Feature.fm")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .error_for_status()?
            .json::<SmartlinkListResponse>()
            .await
            .wrap_err("Failed to deserialize Feature.fm smartlinks response")?;

        Ok(body.smartlinks.into_iter().find_map(|link| link.url))
    }
}
