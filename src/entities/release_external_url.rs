use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "release_external_urls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub release_id: String,
    pub platform: String,
    pub url: String,

    #[sea_orm(belongs_to, from = "release_id", to = "id")]
    pub release: HasOne<super::release::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
