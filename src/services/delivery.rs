use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::DeliveryConfig;
use crate::ports::delivery::DeliveryClient;

#[derive(Debug, Clone, Deserialize)]
struct PreviewResponse {
    url: String,
}

pub struct DeliveryHttpAdapter {
    client: Client,
    config: DeliveryConfig,
}

impl DeliveryHttpAdapter {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn preview_url(&self, asset_id: &str, generate: bool) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url).wrap_err("Invalid delivery base url")?;
        url.path_segments_mut()
            .map_err(|_| color_eyre::eyre::eyre!("Delivery base url cannot be a base"))?
            .pop_if_empty()
            .extend(["assets", asset_id, "preview"]);
        url.query_pairs_mut()
            .append_pair("generate", if generate { "true" } else { "false" });
        Ok(url)
    }
}

#[async_trait::async_trait]
impl DeliveryClient for DeliveryHttpAdapter {
    async fn get_preview_track_url(&self, asset_id: &str, generate: bool) -> Result<String> {
        let url = self.preview_url(asset_id, generate)?;

        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let preview = request
            .send()
            .await
            .wrap_err("Failed to reach delivery service")?
            .error_for_status()?
            .json::<PreviewResponse>()
            .await
            .wrap_err("Failed to deserialize preview response")?;

        Ok(preview.url)
    }
}
