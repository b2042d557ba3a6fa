use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::entities::{self, fan_page::MODULE_ORDER_KEY, json_types::JsonMap};
use crate::services::artist::PlatformSummary;
use crate::services::fan_page_modules::ModuleView;
use crate::services::release::{ReleaseInfo, ReleaseWithRelations, TrackWithAssets};

/// Public URL of a fan page.
pub fn fan_page_url(config: &Config, url_handle: &str) -> String {
    format!(
        "{}/{}",
        config.base_url.trim_end_matches('/'),
        urlencoding::encode(url_handle)
    )
}

/// Public URL of a stored asset.
pub fn asset_url(config: &Config, asset_id: &str) -> String {
    format!(
        "{}/{}",
        config.asset_base_url.trim_end_matches('/'),
        urlencoding::encode(asset_id)
    )
}

/// Artist as the frontend reads it: `{id, profile: {name, ...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistView {
    pub id: String,
    pub profile: JsonMap,
}

impl From<&entities::artist::Model> for ArtistView {
    fn from(artist: &entities::artist::Model) -> Self {
        Self {
            id: artist.id.clone(),
            profile: artist.profile.clone(),
        }
    }
}

/// The fan page's configuration as one flat object: everything stored in
/// `data` (texts, `module_order`, ...) plus the page's own columns.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FanPageView(JsonMap);

impl FanPageView {
    pub fn new(config: &Config, fan_page: &entities::fan_page::Model) -> Self {
        let mut data = fan_page.data.clone();
        let columns = [
            ("url_handle", Some(fan_page.url_handle.clone())),
            ("url", Some(fan_page_url(config, &fan_page.url_handle))),
            ("artist_image_id", fan_page.artist_image_id.clone()),
            ("artist_image_url", artist_image_url(config, fan_page)),
            ("message", fan_page.message.clone()),
        ];
        for (key, value) in columns {
            data.0.insert(key.to_string(), Value::from(value));
        }
        Self(data)
    }

    /// Reflect a freshly initialised module order without re-reading the row.
    pub fn with_module_order(mut self, module_order: &[i64]) -> Self {
        self.0.0.insert(
            MODULE_ORDER_KEY.to_string(),
            Value::from(module_order.to_vec()),
        );
        self
    }
}

/// Public URL of the fan page's artist image, if it has one.
pub fn artist_image_url(config: &Config, fan_page: &entities::fan_page::Model) -> Option<String> {
    fan_page
        .artist_image_id
        .as_deref()
        .map(|id| asset_url(config, id))
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetView {
    pub id: String,
    pub track_id: Option<String>,
    pub kind: String,
    pub mime_type: Option<String>,
    pub url: String,
}

impl AssetView {
    pub fn new(config: &Config, asset: &entities::asset::Model) -> Self {
        Self {
            id: asset.id.clone(),
            track_id: asset.track_id.clone(),
            kind: asset.kind.clone(),
            mime_type: asset.mime_type.clone(),
            url: asset_url(config, &asset.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackView {
    pub id: String,
    pub release_id: String,
    pub title: String,
    pub track_number: Option<i32>,
    pub duration: Option<i32>,
    pub isrc: Option<String>,
    pub assets: Vec<AssetView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl TrackView {
    pub fn new(track: &entities::track::Model) -> Self {
        Self {
            id: track.id.clone(),
            release_id: track.release_id.clone(),
            title: track.title.clone(),
            track_number: track.track_number,
            duration: track.duration,
            isrc: track.isrc.clone(),
            assets: Vec::new(),
            preview_url: None,
        }
    }

    pub fn with_assets(config: &Config, entry: &TrackWithAssets, preview_url: Option<String>) -> Self {
        Self {
            assets: entry
                .assets
                .iter()
                .map(|asset| AssetView::new(config, asset))
                .collect(),
            preview_url,
            ..Self::new(&entry.track)
        }
    }
}

/// Release with the entity's own keys, `cover_art` populated.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseView {
    pub id: String,
    pub artist_id: String,
    pub title: Option<String>,
    pub upc: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub takedown_date: Option<DateTime<Utc>>,
    pub cover_art_id: Option<String>,
    pub cover_art: Option<AssetView>,
    pub track_order: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<TrackView>>,
}

impl ReleaseView {
    pub fn new(
        config: &Config,
        release: &entities::release::Model,
        cover_art: Option<&entities::asset::Model>,
    ) -> Self {
        Self {
            id: release.id.clone(),
            artist_id: release.artist_id.clone(),
            title: release.title.clone(),
            upc: release.upc.clone(),
            release_date: release.release_date,
            delivery_date: release.delivery_date,
            takedown_date: release.takedown_date,
            cover_art_id: release.cover_art_id.clone(),
            cover_art: cover_art.map(|asset| AssetView::new(config, asset)),
            track_order: release.track_order.0.clone(),
            tracks: None,
        }
    }

    pub fn listed(config: &Config, entry: &ReleaseWithRelations) -> Self {
        Self {
            tracks: Some(entry.tracks.iter().map(TrackView::new).collect()),
            ..Self::new(config, &entry.release, entry.cover_art.as_ref())
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPageProps {
    pub artist: ArtistView,
    pub artist_img_asset_id: Option<String>,
    pub fan_page: FanPageView,
    pub logged_in_artist: Option<ArtistView>,
    pub releases: Vec<ReleaseView>,
    pub release_info: BTreeMap<String, ReleaseInfo>,
    pub social_summary: BTreeMap<String, PlatformSummary>,
    pub modules: Vec<ModuleView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerPageProps {
    pub artist: ArtistView,
    pub artist_img_asset_id: Option<String>,
    pub fan_page: FanPageView,
    pub sweeps_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermsPageProps {
    pub artist: ArtistView,
    pub artist_img_asset_id: Option<String>,
    pub fan_page: FanPageView,
    pub terms_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasePageProps {
    pub artist: ArtistView,
    pub artist_img_asset_id: Option<String>,
    pub fan_page: FanPageView,
    pub logged_in_artist: Option<ArtistView>,
    pub release: ReleaseView,
    #[serde(rename = "releaseExternalURLs")]
    pub release_external_urls: BTreeMap<String, String>,
    pub release_is_live: bool,
    pub tracks: Vec<TrackView>,
    pub apple_track_id: String,
}
