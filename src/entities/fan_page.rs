use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue::Set};

use super::json_types::JsonMap;

/// Key inside `data` holding the ordered list of module ids.
pub const MODULE_ORDER_KEY: &str = "module_order";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "fan_pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub artist_id: String,
    #[sea_orm(unique)]
    pub url_handle: String,
    pub artist_image_id: Option<String>,
    pub message: Option<String>,
    pub data: JsonMap,
    pub created_at: i64,
    pub updated_at: i64,

    #[sea_orm(belongs_to, from = "artist_id", to = "id")]
    pub artist: HasOne<super::artist::Entity>,
}

impl Model {
    /// The stored module order. Entries that are not integers are ignored.
    pub fn module_order(&self) -> Vec<i64> {
        self.data
            .0
            .get(MODULE_ORDER_KEY)
            .and_then(|v| v.as_array())
            .map(|ids| ids.iter().filter_map(|id| id.as_i64()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, sea_orm::DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(chrono::Utc::now().timestamp());
        }
        Ok(self)
    }
}
