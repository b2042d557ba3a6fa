use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue::Set};

use super::json_types::JsonMap;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "fan_page_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub artist_id: String,
    /// Section discriminator: "bio", "music", ...
    pub module_type: String,
    pub data: JsonMap,
    pub created_at: i64,
    pub updated_at: i64,

    #[sea_orm(belongs_to, from = "artist_id", to = "id")]
    pub artist: HasOne<super::artist::Entity>,
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            created_at: Set(now),
            updated_at: Set(now),
            data: Set(JsonMap::default()),
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
