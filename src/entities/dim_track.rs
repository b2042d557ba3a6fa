use sea_orm::entity::prelude::*;

/// Track dimension of the analytics warehouse. Read-only from this service.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "dim_track")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub upc: Option<String>,
    pub isrc: Option<String>,
    pub apple_track_id: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
