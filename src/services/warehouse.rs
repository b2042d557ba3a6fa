use color_eyre::eyre::{Result, WrapErr};
use sea_orm::{ColumnTrait, Database as SeaDatabase, DatabaseConnection, EntityTrait, QueryFilter};

use crate::config::WarehouseConfig;
use crate::entities;
use crate::ports::warehouse::WarehouseClient;

/// Warehouse adapter over a sea-orm connection. Without a configured
/// warehouse every lookup returns `None`.
pub struct SqlWarehouse {
    conn: Option<DatabaseConnection>,
}

impl SqlWarehouse {
    pub async fn connect(config: Option<&WarehouseConfig>) -> Result<Self> {
        let Some(config) = config else {
            tracing::info!("No analytics warehouse configured");
            return Ok(Self { conn: None });
        };

        let conn = SeaDatabase::connect(config.url.as_str())
            .await
            .wrap_err("Failed to connect to analytics warehouse")?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn: Some(conn) }
    }
}

#[async_trait::async_trait]
impl WarehouseClient for SqlWarehouse {
    async fn find_apple_track_id(&self, upc: &str) -> Result<Option<String>> {
        let Some(conn) = &self.conn else {
            return Ok(None);
        };

        let row = entities::dim_track::Entity::find()
            .filter(entities::dim_track::Column::Upc.eq(upc))
            .filter(entities::dim_track::Column::AppleTrackId.is_not_null())
            .one(conn)
            .await
            .wrap_err("Failed to query dim_track")?;

        Ok(row.and_then(|track| track.apple_track_id))
    }
}
