use std::collections::HashMap;

use color_eyre::eyre::{Context, Result};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, Set,
};
use serde::Serialize;

use crate::entities::{self, json_types::JsonMap};

pub const MUSIC_MODULE: &str = "music";
pub const BIO_MODULE: &str = "bio";

/// A page section as the frontend sees it: `{id, type, ...data}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleView {
    pub id: i64,
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(flatten)]
    pub data: JsonMap,
}

impl From<entities::fan_page_module::Model> for ModuleView {
    fn from(model: entities::fan_page_module::Model) -> Self {
        // `id` and `type` always come from the row, never from free-form data
        let mut data = model.data;
        data.0.remove("id");
        data.0.remove("type");
        Self {
            id: model.id,
            module_type: model.module_type,
            data,
        }
    }
}

impl ModuleView {
    pub fn is_bio(&self) -> bool {
        self.module_type == BIO_MODULE
    }
}

pub async fn create_module<C: ConnectionTrait>(
    conn: &C,
    artist_id: &str,
    module_type: &str,
) -> Result<entities::fan_page_module::Model> {
    let module = entities::fan_page_module::ActiveModel {
        artist_id: Set(artist_id.to_string()),
        module_type: Set(module_type.to_string()),
        ..entities::fan_page_module::ActiveModel::new()
    };

    let model = module
        .insert(conn)
        .await
        .wrap_err_with(|| format!("Failed to create {module_type} module"))?;

    tracing::info!(
        "Created {} module {} for artist {}",
        module_type,
        model.id,
        artist_id
    );
    Ok(model)
}

/// The artist's modules in `order`. Ids that do not resolve to one of the
/// artist's modules are skipped.
pub async fn get_sorted_modules_by_id<C: ConnectionTrait>(
    conn: &C,
    artist_id: &str,
    order: &[i64],
) -> Result<Vec<ModuleView>> {
    if order.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_id: HashMap<i64, entities::fan_page_module::Model> =
        entities::fan_page_module::Entity::find()
            .filter(entities::fan_page_module::Column::ArtistId.eq(artist_id))
            .filter(entities::fan_page_module::Column::Id.is_in(order.iter().copied()))
            .all(conn)
            .await
            .wrap_err("Failed to fetch fan page modules")?
            .into_iter()
            .map(|module| (module.id, module))
            .collect();

    Ok(order
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(ModuleView::from)
        .collect())
}
