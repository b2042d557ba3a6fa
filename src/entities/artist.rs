use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue::Set};

use super::json_types::JsonMap;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Account that manages this artist, if any.
    #[sea_orm(unique)]
    pub user_id: Option<String>,
    pub profile: JsonMap,
    pub created_at: i64,
    pub updated_at: i64,

    #[sea_orm(has_many)]
    pub releases: HasMany<super::release::Entity>,

    #[sea_orm(has_many)]
    pub fan_pages: HasMany<super::fan_page::Entity>,
}

impl Model {
    pub fn name(&self) -> Option<&str> {
        self.profile.get_str("name")
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
