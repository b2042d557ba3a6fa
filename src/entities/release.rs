use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue::Set};

use super::json_types::StringVec;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "releases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub artist_id: String,
    pub title: Option<String>,
    pub upc: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    /// Set once the distribution partner has delivered the release to stores.
    pub delivery_date: Option<DateTime<Utc>>,
    /// Set once the release has been pulled from stores.
    pub takedown_date: Option<DateTime<Utc>>,
    pub cover_art_id: Option<String>,
    pub track_order: StringVec,
    pub created_at: i64,
    pub updated_at: i64,

    #[sea_orm(belongs_to, from = "artist_id", to = "id")]
    pub artist: HasOne<super::artist::Entity>,

    #[sea_orm(belongs_to, from = "cover_art_id", to = "id")]
    pub cover_art: HasOne<super::asset::Entity>,

    #[sea_orm(has_many)]
    pub tracks: HasMany<super::track::Entity>,

    #[sea_orm(has_many)]
    pub external_urls: HasMany<super::release_external_url::Entity>,
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            created_at: Set(now),
            updated_at: Set(now),
            track_order: Set(StringVec::default()),
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
