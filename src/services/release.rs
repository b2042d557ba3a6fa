use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Context, Result};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::instrument;

use crate::database::Database;
use crate::entities;
use crate::ports::smartlink::{SmartlinkClient, SmartlinkRequest};
use crate::services::release_format::ReleaseFormat;

/// Legacy releases that were converted to videos and must not be listed.
pub const HIDDEN_RELEASE_IDS: [&str; 5] = [
    "AtRQTic4EEXE",
    "ASACjR2iM3cf",
    "AKa9LAidB4Xn",
    "AU9ZnP6Q5vDx",
    "AYcaW2bLziSQ",
];

#[derive(Debug, Clone)]
pub struct ReleaseWithRelations {
    pub release: entities::release::Model,
    pub cover_art: Option<entities::asset::Model>,
    pub tracks: Vec<entities::track::Model>,
}

#[derive(Debug, Clone)]
pub struct TrackWithAssets {
    pub track: entities::track::Model,
    pub assets: Vec<entities::asset::Model>,
}

/// Per-release extras shown on the artist page for live releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseInfo {
    pub release_format: ReleaseFormat,
    pub masterlink: Option<String>,
}

/// Delivered to stores and not taken down.
pub fn is_distribution_live(release: &entities::release::Model) -> bool {
    release.delivery_date.is_some() && release.takedown_date.is_none()
}

/// Live for distribution and already out, as opposed to a pre-release.
pub fn is_release_live(release: &entities::release::Model, now: DateTime<Utc>) -> bool {
    is_distribution_live(release) && release.release_date.is_some_and(|date| date <= now)
}

/// Newest first. Releases without a date sort after every dated release.
pub fn sort_releases(releases: &mut [entities::release::Model]) {
    releases.sort_by(|a, b| b.release_date.cmp(&a.release_date));
}

pub struct ReleaseService {
    db: Arc<Database>,
}

impl ReleaseService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The artist's visible releases, newest first, with cover art and
    /// tracks loaded in bulk.
    #[instrument(skip(self))]
    pub async fn list_artist_releases(&self, artist_id: &str) -> Result<Vec<ReleaseWithRelations>> {
        let mut releases: Vec<entities::release::Model> = entities::release::Entity::find()
            .filter(entities::release::Column::ArtistId.eq(artist_id))
            .filter(entities::release::Column::Id.is_not_in(HIDDEN_RELEASE_IDS))
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch artist releases")?;
        sort_releases(&mut releases);

        let cover_ids: Vec<String> = releases
            .iter()
            .filter_map(|release| release.cover_art_id.clone())
            .collect();
        let covers: HashMap<String, entities::asset::Model> = if cover_ids.is_empty() {
            HashMap::new()
        } else {
            entities::asset::Entity::find()
                .filter(entities::asset::Column::Id.is_in(cover_ids))
                .all(&self.db.conn)
                .await
                .wrap_err("Failed to fetch cover art")?
                .into_iter()
                .map(|asset| (asset.id.clone(), asset))
                .collect()
        };

        let release_ids: Vec<String> = releases.iter().map(|release| release.id.clone()).collect();
        let mut tracks_by_release: HashMap<String, Vec<entities::track::Model>> = HashMap::new();
        if !release_ids.is_empty() {
            let tracks = entities::track::Entity::find()
                .filter(entities::track::Column::ReleaseId.is_in(release_ids))
                .order_by_asc(entities::track::Column::TrackNumber)
                .order_by_asc(entities::track::Column::Id)
                .all(&self.db.conn)
                .await
                .wrap_err("Failed to fetch release tracks")?;
            for track in tracks {
                tracks_by_release
                    .entry(track.release_id.clone())
                    .or_default()
                    .push(track);
            }
        }

        tracing::debug!("Loaded {} releases", releases.len());

        Ok(releases
            .into_iter()
            .map(|release| {
                // A cover shared by several releases is cloned for each
                let cover_art = release
                    .cover_art_id
                    .as_ref()
                    .and_then(|id| covers.get(id).cloned());
                let tracks = tracks_by_release.remove(&release.id).unwrap_or_default();
                ReleaseWithRelations {
                    release,
                    cover_art,
                    tracks,
                }
            })
            .collect())
    }

    pub async fn get_release_for_artist(
        &self,
        release_id: &str,
        artist_id: &str,
    ) -> Result<Option<entities::release::Model>> {
        entities::release::Entity::find_by_id(release_id.to_string())
            .filter(entities::release::Column::ArtistId.eq(artist_id))
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to fetch release")
    }

    pub async fn get_cover_art(
        &self,
        release: &entities::release::Model,
    ) -> Result<Option<entities::asset::Model>> {
        let Some(cover_art_id) = &release.cover_art_id else {
            return Ok(None);
        };

        entities::asset::Entity::find_by_id(cover_art_id.clone())
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to fetch cover art")
    }

    /// Tracks in track-number order, each with its assets oldest first.
    pub async fn get_tracks_with_assets(&self, release_id: &str) -> Result<Vec<TrackWithAssets>> {
        let tracks = entities::track::Entity::find()
            .filter(entities::track::Column::ReleaseId.eq(release_id))
            .order_by_asc(entities::track::Column::TrackNumber)
            .order_by_asc(entities::track::Column::Id)
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch release tracks")?;

        let track_ids: Vec<String> = tracks.iter().map(|track| track.id.clone()).collect();
        let mut assets_by_track: HashMap<String, Vec<entities::asset::Model>> = HashMap::new();
        if !track_ids.is_empty() {
            let assets = entities::asset::Entity::find()
                .filter(entities::asset::Column::TrackId.is_in(track_ids))
                .order_by_asc(entities::asset::Column::CreatedAt)
                .order_by_asc(entities::asset::Column::Id)
                .all(&self.db.conn)
                .await
                .wrap_err("Failed to fetch track assets")?;
            for asset in assets {
                if let Some(track_id) = asset.track_id.clone() {
                    assets_by_track.entry(track_id).or_default().push(asset);
                }
            }
        }

        Ok(tracks
            .into_iter()
            .map(|track| {
                let assets = assets_by_track.remove(&track.id).unwrap_or_default();
                TrackWithAssets { track, assets }
            })
            .collect())
    }

    /// Store links for a release keyed by platform.
    pub async fn get_external_urls(&self, release_id: &str) -> Result<BTreeMap<String, String>> {
        let urls = entities::release_external_url::Entity::find()
            .filter(entities::release_external_url::Column::ReleaseId.eq(release_id))
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch release external urls")?;

        Ok(urls
            .into_iter()
            .map(|external_url| (external_url.platform, external_url.url))
            .collect())
    }
}

/// Format and smartlink for every release that is live for distribution.
pub async fn build_release_info(
    releases: &[ReleaseWithRelations],
    smartlinks: &dyn SmartlinkClient,
) -> Result<BTreeMap<String, ReleaseInfo>> {
    let mut info = BTreeMap::new();
    for entry in releases {
        let release = &entry.release;
        if !is_distribution_live(release) {
            continue;
        }

        let masterlink = smartlinks
            .get_smartlink(&SmartlinkRequest {
                release_id: release.id.clone(),
                title: release.title.clone(),
                upc: release.upc.clone(),
            })
            .await
            .wrap_err_with(|| format!("Failed to get smartlink for release {}", release.id))?;
        let release_format =
            ReleaseFormat::classify(entry.tracks.iter().map(|track| track.duration));

        info.insert(
            release.id.clone(),
            ReleaseInfo {
                release_format,
                masterlink,
            },
        );
    }
    Ok(info)
}
