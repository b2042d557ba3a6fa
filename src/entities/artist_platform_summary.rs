use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "artist_platform_summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub artist_id: String,
    pub platform: String,
    pub profile_url: Option<String>,
    pub follower_count: Option<i64>,
    pub updated_at: i64,

    #[sea_orm(belongs_to, from = "artist_id", to = "id")]
    pub artist: HasOne<super::artist::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
