use std::sync::Arc;

use color_eyre::eyre::{Context, OptionExt, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde_json::json;
use tracing::instrument;

use crate::database::Database;
use crate::entities::{self, fan_page::MODULE_ORDER_KEY};
use crate::services::fan_page_modules::{self, MUSIC_MODULE};

/// A fan page together with the artist it belongs to.
#[derive(Debug, Clone)]
pub struct ArtistFanPage {
    pub artist: entities::artist::Model,
    pub fan_page: entities::fan_page::Model,
}

pub struct FanPageService {
    db: Arc<Database>,
}

impl FanPageService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Resolve a URL handle. `None` when there is no such page or the page's
    /// artist no longer exists.
    #[instrument(skip(self))]
    pub async fn get_artist_fan_page(&self, url_handle: &str) -> Result<Option<ArtistFanPage>> {
        let Some(fan_page) = entities::fan_page::Entity::find()
            .filter(entities::fan_page::Column::UrlHandle.eq(url_handle))
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to query fan page by handle")?
        else {
            tracing::debug!("No fan page for handle");
            return Ok(None);
        };

        let artist = entities::artist::Entity::find_by_id(fan_page.artist_id.clone())
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to fetch fan page artist")?;

        match artist {
            Some(artist) => Ok(Some(ArtistFanPage { artist, fan_page })),
            None => {
                tracing::warn!(
                    "Fan page {} points at missing artist {}",
                    fan_page.id,
                    fan_page.artist_id
                );
                Ok(None)
            }
        }
    }

    /// The page's module order, creating a music module and persisting
    /// `[its id]` as the order when the page has none yet.
    #[instrument(skip(self, fan_page), fields(fan_page_id = fan_page.id))]
    pub async fn ensure_module_order(
        &self,
        fan_page: &entities::fan_page::Model,
    ) -> Result<Vec<i64>> {
        let existing = fan_page.module_order();
        if !existing.is_empty() {
            return Ok(existing);
        }

        let txn = self
            .db
            .conn
            .begin()
            .await
            .wrap_err("Failed to start transaction")?;

        // Take the write lock before reading. A deferred transaction that
        // reads first cannot wait for a concurrent writer and fails busy.
        txn.execute_unprepared(&format!(
            "UPDATE fan_pages SET updated_at = updated_at WHERE id = {}",
            fan_page.id
        ))
        .await
        .wrap_err("Failed to lock fan page")?;

        // Another request may have initialised the order since we read it
        let current = entities::fan_page::Entity::find_by_id(fan_page.id)
            .one(&txn)
            .await
            .wrap_err("Failed to reload fan page")?
            .ok_or_eyre("Fan page not found")?;
        let current_order = current.module_order();
        if !current_order.is_empty() {
            txn.commit().await.wrap_err("Failed to commit transaction")?;
            return Ok(current_order);
        }

        let music_module =
            fan_page_modules::create_module(&txn, &current.artist_id, MUSIC_MODULE).await?;
        let module_order = vec![music_module.id];

        let mut data = current.data.clone();
        data.0
            .insert(MODULE_ORDER_KEY.to_string(), json!(module_order));
        let mut active: entities::fan_page::ActiveModel = current.into();
        active.data = Set(data);
        active
            .update(&txn)
            .await
            .wrap_err("Failed to save module order")?;

        txn.commit().await.wrap_err("Failed to commit transaction")?;

        tracing::info!("Initialised module order {:?}", module_order);
        Ok(module_order)
    }
}
