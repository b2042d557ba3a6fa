use std::collections::BTreeMap;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::database::Database;
use crate::entities;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSummary {
    pub profile_url: Option<String>,
    pub follower_count: Option<i64>,
}

pub struct ArtistService {
    db: Arc<Database>,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The artist managed by a logged-in account, if any.
    pub async fn find_linked_artist(
        &self,
        user_id: &str,
    ) -> Result<Option<entities::artist::Model>> {
        entities::artist::Entity::find()
            .filter(entities::artist::Column::UserId.eq(user_id))
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to query artist linked to user")
    }

    /// Social platform stats keyed by platform name.
    pub async fn fetch_platform_summaries(
        &self,
        artist_id: &str,
    ) -> Result<BTreeMap<String, PlatformSummary>> {
        let summaries = entities::artist_platform_summary::Entity::find()
            .filter(entities::artist_platform_summary::Column::ArtistId.eq(artist_id))
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch platform summaries")?;

        Ok(summaries
            .into_iter()
            .map(|summary| {
                (
                    summary.platform,
                    PlatformSummary {
                        profile_url: summary.profile_url,
                        follower_count: summary.follower_count,
                    },
                )
            })
            .collect())
    }
}
