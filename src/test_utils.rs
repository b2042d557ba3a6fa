use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Database as SeaDatabase, Set};
use serde_json::json;

use crate::database::Database;
use crate::entities::{self, json_types::JsonMap};

pub async fn test_db() -> Arc<Database> {
    let conn = SeaDatabase::connect("sqlite::memory:?mode=rwc")
        .await
        .unwrap();

    Arc::new(Database::from_connection(conn).await.unwrap())
}

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub async fn insert_artist(
    db: &Database,
    id: &str,
    name: &str,
    user_id: Option<&str>,
) -> entities::artist::Model {
    let artist = entities::artist::ActiveModel {
        id: Set(id.into()),
        user_id: Set(user_id.map(Into::into)),
        profile: Set(json!({ "name": name }).into()),
        ..entities::artist::ActiveModel::new()
    };
    artist.insert(&db.conn).await.unwrap()
}

pub async fn insert_fan_page(
    db: &Database,
    artist_id: &str,
    handle: &str,
    data: serde_json::Value,
) -> entities::fan_page::Model {
    let fan_page = entities::fan_page::ActiveModel {
        artist_id: Set(artist_id.into()),
        url_handle: Set(handle.into()),
        artist_image_id: Set(Some("img-1".into())),
        message: Set(Some("Welcome to my page".into())),
        data: Set(JsonMap::from(data)),
        ..entities::fan_page::ActiveModel::new()
    };
    fan_page.insert(&db.conn).await.unwrap()
}

/// A release that is delivered, not taken down, and titled.
pub fn live_release(id: &str, artist_id: &str, title: &str) -> entities::release::ActiveModel {
    entities::release::ActiveModel {
        id: Set(id.into()),
        artist_id: Set(artist_id.into()),
        title: Set(Some(title.into())),
        upc: Set(Some(format!("upc-{id}"))),
        release_date: Set(Some(date(2019, 5, 1))),
        delivery_date: Set(Some(date(2019, 4, 1))),
        takedown_date: Set(None),
        cover_art_id: Set(None),
        ..entities::release::ActiveModel::new()
    }
}

pub async fn insert_release(
    db: &Database,
    release: entities::release::ActiveModel,
) -> entities::release::Model {
    release.insert(&db.conn).await.unwrap()
}

pub async fn insert_track(
    db: &Database,
    id: &str,
    release_id: &str,
    track_number: i32,
    duration: Option<i32>,
) -> entities::track::Model {
    let track = entities::track::ActiveModel {
        id: Set(id.into()),
        release_id: Set(release_id.into()),
        title: Set(format!("Track {track_number}")),
        track_number: Set(Some(track_number)),
        duration: Set(duration),
        isrc: Set(None),
        ..entities::track::ActiveModel::new()
    };
    track.insert(&db.conn).await.unwrap()
}

pub async fn insert_asset(
    db: &Database,
    id: &str,
    track_id: Option<&str>,
    kind: &str,
) -> entities::asset::Model {
    let asset = entities::asset::ActiveModel {
        id: Set(id.into()),
        track_id: Set(track_id.map(Into::into)),
        kind: Set(kind.into()),
        mime_type: Set(None),
        ..entities::asset::ActiveModel::new()
    };
    asset.insert(&db.conn).await.unwrap()
}

pub async fn insert_module(
    db: &Database,
    artist_id: &str,
    module_type: &str,
    data: serde_json::Value,
) -> entities::fan_page_module::Model {
    let module = entities::fan_page_module::ActiveModel {
        artist_id: Set(artist_id.into()),
        module_type: Set(module_type.into()),
        data: Set(JsonMap::from(data)),
        ..entities::fan_page_module::ActiveModel::new()
    };
    module.insert(&db.conn).await.unwrap()
}
