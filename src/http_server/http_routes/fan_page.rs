use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::instrument;

use crate::http_server::{
    error::PageError,
    middleware::LoggedInUser,
    render::PageFormat,
    state::AppState,
    views::{
        ArtistPageProps, ArtistView, FanPageView, ReleasePageProps, ReleaseView, TermsPageProps,
        TrackView, WinnerPageProps, artist_image_url, fan_page_url,
    },
};
use crate::ports::warehouse::WarehouseClient;
use crate::services::{
    artist::ArtistService,
    fan_page::{ArtistFanPage, FanPageService},
    fan_page_modules::{ModuleView, get_sorted_modules_by_id},
    og_tags::OgTags,
    release::{ReleaseService, build_release_info, is_distribution_live, is_release_live},
    slug::slugify,
};

const ARTIST_PAGE_COMPONENT: &str = "ArtistPageApp";
const WINNER_PAGE_COMPONENT: &str = "FanPageWinnerApp";
const TERMS_PAGE_COMPONENT: &str = "FanPageTermsApp";
const RELEASE_PAGE_COMPONENT: &str = "FanPageReleaseApp";

const RELEASE_PAGE_DESCRIPTION: &str =
    "Get early access to new music, merch, tickets, and more. Login with Spotify to join me.";

async fn resolve_fan_page(state: &AppState, fan_page_handle: &str) -> Result<ArtistFanPage, PageError> {
    FanPageService::new(state.db.clone())
        .get_artist_fan_page(fan_page_handle)
        .await?
        .ok_or(PageError::NotFound)
}

async fn logged_in_artist(
    state: &AppState,
    user: &LoggedInUser,
) -> Result<Option<ArtistView>, PageError> {
    let Some(user_id) = &user.0 else {
        return Ok(None);
    };

    let artist = ArtistService::new(state.db.clone())
        .find_linked_artist(user_id)
        .await?;
    Ok(artist.as_ref().map(ArtistView::from))
}

/// Best effort: no UPC, no match, or a failing warehouse all yield "".
async fn lookup_apple_track_id(warehouse: &dyn WarehouseClient, upc: Option<&str>) -> String {
    let Some(upc) = upc else {
        return String::new();
    };

    match warehouse.find_apple_track_id(upc).await {
        Ok(apple_track_id) => apple_track_id.unwrap_or_default(),
        Err(err) => {
            tracing::warn!("Failed to look up Apple track id for UPC {upc}: {err:?}");
            String::new()
        }
    }
}

/// Tags point at the fan page itself, whichever route renders them.
fn fan_page_og_tags(
    state: &AppState,
    page: &ArtistFanPage,
    title: &str,
    modules: &[ModuleView],
) -> OgTags {
    OgTags::for_page(
        title,
        &fan_page_url(&state.config, &page.fan_page.url_handle),
        artist_image_url(&state.config, &page.fan_page).as_deref(),
        modules,
        page.fan_page.message.as_deref(),
    )
}

fn artist_name(page: &ArtistFanPage) -> &str {
    page.artist.name().unwrap_or_default()
}

#[instrument(skip_all, fields(fan_page_handle = %fan_page_handle))]
pub async fn fan_page(
    State(state): State<Arc<AppState>>,
    Path(fan_page_handle): Path<String>,
    user: LoggedInUser,
    format: PageFormat,
) -> Result<Response, PageError> {
    let page = resolve_fan_page(&state, &fan_page_handle).await?;
    let artist = &page.artist;
    let logged_in_artist = logged_in_artist(&state, &user).await?;

    let title = format!(
        "{} | Official Website, Listen, Merch, Tours",
        artist_name(&page)
    );

    let module_order = FanPageService::new(state.db.clone())
        .ensure_module_order(&page.fan_page)
        .await?;

    let releases = ReleaseService::new(state.db.clone())
        .list_artist_releases(&artist.id)
        .await?;
    let release_info = build_release_info(&releases, state.smartlinks.as_ref()).await?;
    let social_summary = ArtistService::new(state.db.clone())
        .fetch_platform_summaries(&artist.id)
        .await?;
    let modules = get_sorted_modules_by_id(&state.db.conn, &artist.id, &module_order).await?;

    let fan_page = FanPageView::new(&state.config, &page.fan_page).with_module_order(&module_order);
    let og_tags = fan_page_og_tags(state.as_ref(), &page, &title, &modules);

    let props = ArtistPageProps {
        artist: ArtistView::from(artist),
        artist_img_asset_id: page.fan_page.artist_image_id.clone(),
        fan_page,
        logged_in_artist,
        releases: releases
            .iter()
            .map(|entry| ReleaseView::listed(&state.config, entry))
            .collect(),
        release_info,
        social_summary,
        modules,
    };

    let rendered = state
        .renderer
        .page(title, ARTIST_PAGE_COMPONENT, &props)?
        .with_og_tags(og_tags);
    Ok(state.renderer.render(&rendered, format)?)
}

#[instrument(skip_all, fields(fan_page_handle = %fan_page_handle, sweeps_name = %sweeps_name))]
pub async fn fan_page_winner(
    State(state): State<Arc<AppState>>,
    Path((fan_page_handle, sweeps_name)): Path<(String, String)>,
    format: PageFormat,
) -> Result<Response, PageError> {
    let page = resolve_fan_page(&state, &fan_page_handle).await?;

    let props = WinnerPageProps {
        artist: ArtistView::from(&page.artist),
        artist_img_asset_id: page.fan_page.artist_image_id.clone(),
        fan_page: FanPageView::new(&state.config, &page.fan_page),
        sweeps_name,
    };

    let rendered = state.renderer.page("Results", WINNER_PAGE_COMPONENT, &props)?;
    Ok(state.renderer.render(&rendered, format)?)
}

#[instrument(skip_all, fields(fan_page_handle = %fan_page_handle, terms_name = %terms_name))]
pub async fn fan_page_terms(
    State(state): State<Arc<AppState>>,
    Path((fan_page_handle, terms_name)): Path<(String, String)>,
    format: PageFormat,
) -> Result<Response, PageError> {
    let page = resolve_fan_page(&state, &fan_page_handle).await?;

    let props = TermsPageProps {
        artist: ArtistView::from(&page.artist),
        artist_img_asset_id: page.fan_page.artist_image_id.clone(),
        fan_page: FanPageView::new(&state.config, &page.fan_page),
        terms_name,
    };

    let rendered = state
        .renderer
        .page("Terms and Conditions", TERMS_PAGE_COMPONENT, &props)?;
    Ok(state.renderer.render(&rendered, format)?)
}

/// `/{handle}/r/{release_id}`: always redirects to the canonical URL once
/// the release is known to be live.
pub async fn release_fan_page(
    State(state): State<Arc<AppState>>,
    Path((fan_page_handle, release_id)): Path<(String, String)>,
    user: LoggedInUser,
    format: PageFormat,
) -> Result<Response, PageError> {
    render_release_page(&state, &fan_page_handle, None, &release_id, &user, format).await
}

/// `/{handle}/r/{release_handle}/{release_id}`
pub async fn canonical_release_fan_page(
    State(state): State<Arc<AppState>>,
    Path((fan_page_handle, release_handle, release_id)): Path<(String, String, String)>,
    user: LoggedInUser,
    format: PageFormat,
) -> Result<Response, PageError> {
    render_release_page(
        &state,
        &fan_page_handle,
        Some(&release_handle),
        &release_id,
        &user,
        format,
    )
    .await
}

#[instrument(skip(state, user, format))]
async fn render_release_page(
    state: &AppState,
    fan_page_handle: &str,
    release_handle: Option<&str>,
    release_id: &str,
    user: &LoggedInUser,
    format: PageFormat,
) -> Result<Response, PageError> {
    let page = resolve_fan_page(state, fan_page_handle).await?;
    let releases = ReleaseService::new(state.db.clone());

    let release = releases
        .get_release_for_artist(release_id, &page.artist.id)
        .await?
        .ok_or(PageError::NotFound)?;
    let Some(release_title) = release.title.clone() else {
        tracing::debug!("Release has no title");
        return Err(PageError::NotFound);
    };
    if !is_distribution_live(&release) {
        tracing::debug!("Release is not live for distribution");
        return Err(PageError::NotFound);
    }

    let external_urls = releases.get_external_urls(&release.id).await?;
    let cover_art = releases.get_cover_art(&release).await?;
    let tracks = releases.get_tracks_with_assets(&release.id).await?;

    // Previews are generated on demand by the delivery service, so every
    // track's preview must exist before the page is handed out.
    let mut track_views = Vec::with_capacity(tracks.len());
    for entry in &tracks {
        let preview_url = match entry.assets.first() {
            Some(asset) => Some(state.delivery.get_preview_track_url(&asset.id, true).await?),
            None => {
                tracing::warn!("Track {} has no assets, skipping preview", entry.track.id);
                None
            }
        };
        track_views.push(TrackView::with_assets(&state.config, entry, preview_url));
    }

    let release_slug = slugify(&release_title)?;
    let canonical_path = format!(
        "/{}/r/{}/{}",
        urlencoding::encode(fan_page_handle),
        release_slug,
        urlencoding::encode(&release.id)
    );
    if release_handle != Some(release_slug.as_str()) {
        tracing::debug!("Redirecting to canonical release URL {canonical_path}");
        return Ok((
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, canonical_path)],
        )
            .into_response());
    }

    let logged_in_artist = logged_in_artist(state, user).await?;
    let apple_track_id =
        lookup_apple_track_id(state.warehouse.as_ref(), release.upc.as_deref()).await;

    let title = format!("{} - {}", artist_name(&page), release_title);
    let fan_page = FanPageView::new(&state.config, &page.fan_page);
    let og_tags =
        fan_page_og_tags(state, &page, &title, &[]).with_description(RELEASE_PAGE_DESCRIPTION);

    let props = ReleasePageProps {
        artist: ArtistView::from(&page.artist),
        artist_img_asset_id: page.fan_page.artist_image_id.clone(),
        fan_page,
        logged_in_artist,
        release: ReleaseView::new(&state.config, &release, cover_art.as_ref()),
        release_external_urls: external_urls,
        release_is_live: is_release_live(&release, Utc::now()),
        tracks: track_views,
        apple_track_id,
    };

    let rendered = state
        .renderer
        .page(title, RELEASE_PAGE_COMPONENT, &props)?
        .with_og_tags(og_tags);
    Ok(state.renderer.render(&rendered, format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::Database;
    use crate::entities::{self, json_types::StringVec};
    use crate::http_server::app::router;
    use crate::ports::delivery::MockDeliveryClient;
    use crate::ports::smartlink::MockSmartlinkClient;
    use crate::ports::warehouse::MockWarehouseClient;
    use crate::test_utils::{
        date, insert_artist, insert_asset, insert_fan_page, insert_module, insert_release,
        insert_track, live_release, test_db,
    };
    use axum::{Router, body::Body, http::Request};
    use color_eyre::eyre::eyre;
    use sea_orm::{EntityTrait, PaginatorTrait, Set};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct Mocks {
        smartlinks: MockSmartlinkClient,
        delivery: MockDeliveryClient,
        warehouse: MockWarehouseClient,
    }

    impl Mocks {
        fn new() -> Self {
            let mut smartlinks = MockSmartlinkClient::new();
            smartlinks
                .expect_get_smartlink()
                .returning(|release| Ok(Some(format!("https://ffm.to/{}", release.release_id))));

            let mut delivery = MockDeliveryClient::new();
            delivery
                .expect_get_preview_track_url()
                .returning(|asset_id, _| Ok(format!("https://cdn.example.com/{asset_id}.mp3")));

            let mut warehouse = MockWarehouseClient::new();
            warehouse
                .expect_find_apple_track_id()
                .returning(|_| Ok(Some("1440833098".into())));

            Self {
                smartlinks,
                delivery,
                warehouse,
            }
        }
    }

    fn app(db: Arc<Database>, config: Config, mocks: Mocks) -> Router {
        router(Arc::new(AppState::new(
            db,
            config,
            Arc::new(mocks.smartlinks),
            Arc::new(mocks.delivery),
            Arc::new(mocks.warehouse),
        )))
    }

    async fn get(app: &Router, uri: &str, headers: &[(&str, &str)]) -> Response {
        let mut request = Request::builder()
            .uri(uri)
            .header(header::ACCEPT, "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        app.clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = get(app, uri, &[]).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    async fn band_with_page() -> Arc<Database> {
        let db = test_db().await;
        insert_artist(&db, "AR1", "The Band", Some("user-1")).await;
        insert_fan_page(&db, "AR1", "theband", json!({})).await;
        db
    }

    #[tokio::test]
    async fn test_unknown_handle_is_not_found_on_every_route() {
        let app = app(band_with_page().await, Config::default(), Mocks::new());

        for uri in [
            "/nobody",
            "/nobody/s/summer",
            "/nobody/t/summer",
            "/nobody/r/R1",
            "/nobody/r/some-slug/R1",
        ] {
            let response = get(&app, uri, &[]).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_artist_page_lists_releases() {
        let db = band_with_page().await;

        let mut older = live_release("R-OLD", "AR1", "Older");
        older.release_date = Set(Some(date(2018, 1, 1)));
        insert_release(&db, older).await;
        let mut undated = live_release("R-UNDATED", "AR1", "Undated");
        undated.release_date = Set(None);
        insert_release(&db, undated).await;
        let mut unreleased = live_release("R-PENDING", "AR1", "Pending");
        unreleased.delivery_date = Set(None);
        unreleased.release_date = Set(Some(date(2021, 1, 1)));
        insert_release(&db, unreleased).await;
        insert_release(&db, live_release("R-NEW", "AR1", "Newer")).await;
        insert_release(&db, live_release("AtRQTic4EEXE", "AR1", "Legacy video")).await;
        insert_track(&db, "T1", "R-NEW", 1, Some(200)).await;

        let app = app(db, Config::default(), Mocks::new());
        let (status, body) = get_json(&app, "/theband").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["component"], "ArtistPageApp");
        assert_eq!(
            body["title"],
            "The Band | Official Website, Listen, Merch, Tours"
        );

        let ids: Vec<&str> = body["props"]["releases"]
            .as_array()
            .unwrap()
            .iter()
            .map(|release| release["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["R-PENDING", "R-NEW", "R-OLD", "R-UNDATED"]);

        let release_info = body["props"]["releaseInfo"].as_object().unwrap();
        let mut live: Vec<&str> = release_info.keys().map(String::as_str).collect();
        live.sort();
        assert_eq!(live, vec!["R-NEW", "R-OLD", "R-UNDATED"]);
        assert_eq!(
            body["props"]["releaseInfo"]["R-NEW"],
            json!({"release_format": "Single", "masterlink": "https://ffm.to/R-NEW"})
        );

        assert_eq!(body["og_tags"]["og:description"], "Welcome to my page");
        assert!(body["props"]["loggedInArtist"].is_null());
    }

    #[tokio::test]
    async fn test_artist_page_initialises_module_order_once() {
        let db = band_with_page().await;
        let app = app(db.clone(), Config::default(), Mocks::new());

        let (_, first) = get_json(&app, "/theband").await;
        let (_, second) = get_json(&app, "/theband").await;

        let module_count = entities::fan_page_module::Entity::find()
            .count(&db.conn)
            .await
            .unwrap();
        assert_eq!(module_count, 1);

        let order = first["props"]["fanPage"]["module_order"].clone();
        assert_eq!(order.as_array().unwrap().len(), 1);
        assert_eq!(second["props"]["fanPage"]["module_order"], order);
        assert_eq!(first["props"]["modules"][0]["type"], "music");
    }

    #[tokio::test]
    async fn test_artist_page_uses_bio_for_description() {
        let db = test_db().await;
        insert_artist(&db, "AR1", "The Band", None).await;
        let bio = insert_module(&db, "AR1", "bio", json!({"description_text": "Loud and proud"})).await;
        insert_fan_page(&db, "AR1", "theband", json!({"module_order": [bio.id]})).await;

        let app = app(db, Config::default(), Mocks::new());
        let (_, body) = get_json(&app, "/theband").await;

        assert_eq!(body["og_tags"]["og:description"], "Loud and proud");
        assert_eq!(body["props"]["modules"][0]["description_text"], "Loud and proud");
    }

    #[tokio::test]
    async fn test_artist_page_shows_logged_in_artist() {
        let app = app(band_with_page().await, Config::default(), Mocks::new());

        let response = get(&app, "/theband", &[("x-authenticated-user", "user-1")]).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["props"]["loggedInArtist"]["id"], "AR1");
    }

    #[tokio::test]
    async fn test_winner_and_terms_pages() {
        let app = app(band_with_page().await, Config::default(), Mocks::new());

        let (status, winner) = get_json(&app, "/theband/s/summer-giveaway").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(winner["component"], "FanPageWinnerApp");
        assert_eq!(winner["title"], "Results");
        assert_eq!(winner["props"]["sweepsName"], "summer-giveaway");
        assert_eq!(winner["props"]["artistImgAssetId"], "img-1");
        assert!(winner["og_tags"].is_null());

        let (status, terms) = get_json(&app, "/theband/t/summer-giveaway").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(terms["component"], "FanPageTermsApp");
        assert_eq!(terms["title"], "Terms and Conditions");
        assert_eq!(terms["props"]["termsName"], "summer-giveaway");
    }

    async fn band_with_release() -> Arc<Database> {
        let db = band_with_page().await;
        insert_release(&db, live_release("R1", "AR1", "Hello, Wörld!")).await;
        insert_track(&db, "T1", "R1", 1, Some(180)).await;
        insert_track(&db, "T2", "R1", 2, Some(200)).await;
        insert_asset(&db, "A1", Some("T1"), "audio").await;
        db
    }

    #[tokio::test]
    async fn test_release_page_redirects_to_canonical_slug() {
        let app = app(band_with_release().await, Config::default(), Mocks::new());

        let response = get(&app, "/theband/r/wrong-slug/R1", &[]).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location(&response), "/theband/r/hello-world/R1");

        let response = get(&app, "/theband/r/R1", &[]).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location(&response), "/theband/r/hello-world/R1");
    }

    #[tokio::test]
    async fn test_release_page_renders_canonical_slug() {
        let app = app(band_with_release().await, Config::default(), Mocks::new());

        let (status, body) = get_json(&app, "/theband/r/hello-world/R1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["component"], "FanPageReleaseApp");
        assert_eq!(body["title"], "The Band - Hello, Wörld!");
        assert_eq!(body["og_tags"]["og:description"], RELEASE_PAGE_DESCRIPTION);
        assert_eq!(body["og_tags"]["twitter:description"], RELEASE_PAGE_DESCRIPTION);

        let props = &body["props"];
        assert_eq!(props["release"]["id"], "R1");
        assert_eq!(props["releaseIsLive"], true);
        assert_eq!(props["appleTrackId"], "1440833098");
        assert!(props["releaseExternalURLs"].as_object().unwrap().is_empty());
        assert_eq!(props["tracks"][0]["preview_url"], "https://cdn.example.com/A1.mp3");
        assert!(props["tracks"][1].get("preview_url").is_none());
    }

    #[tokio::test]
    async fn test_release_previews_generated_before_redirect() {
        let db = band_with_release().await;
        let mut mocks = Mocks::new();
        mocks.delivery = MockDeliveryClient::new();
        mocks
            .delivery
            .expect_get_preview_track_url()
            .withf(|asset_id, generate| asset_id == "A1" && *generate)
            .times(1)
            .returning(|_, _| Ok("https://cdn.example.com/A1.mp3".into()));

        let app = app(db, Config::default(), mocks);
        let response = get(&app, "/theband/r/R1", &[]).await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn test_release_not_live_is_not_found() {
        let db = band_with_page().await;

        let mut untitled = live_release("R-UNTITLED", "AR1", "x");
        untitled.title = Set(None);
        insert_release(&db, untitled).await;
        let mut undelivered = live_release("R-UNDELIVERED", "AR1", "Undelivered");
        undelivered.delivery_date = Set(None);
        insert_release(&db, undelivered).await;
        let mut taken_down = live_release("R-TAKEDOWN", "AR1", "Taken Down");
        taken_down.takedown_date = Set(Some(date(2020, 1, 1)));
        insert_release(&db, taken_down).await;
        insert_artist(&db, "AR2", "Someone Else", None).await;
        insert_release(&db, live_release("R-OTHER", "AR2", "Other")).await;

        let app = app(db, Config::default(), Mocks::new());
        for uri in [
            "/theband/r/x/R-UNTITLED",
            "/theband/r/undelivered/R-UNDELIVERED",
            "/theband/r/taken-down/R-TAKEDOWN",
            "/theband/r/other/R-OTHER",
            "/theband/r/missing/R-MISSING",
        ] {
            let response = get(&app, uri, &[]).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_apple_track_id_failure_is_empty() {
        let mut mocks = Mocks::new();
        mocks.warehouse = MockWarehouseClient::new();
        mocks
            .warehouse
            .expect_find_apple_track_id()
            .returning(|_| Err(eyre!("warehouse unavailable")));

        let app = app(band_with_release().await, Config::default(), mocks);
        let (status, body) = get_json(&app, "/theband/r/hello-world/R1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["props"]["appleTrackId"], "");
    }

    #[tokio::test]
    async fn test_apple_track_id_without_match_is_empty() {
        let mut mocks = Mocks::new();
        mocks.warehouse = MockWarehouseClient::new();
        mocks
            .warehouse
            .expect_find_apple_track_id()
            .withf(|upc| upc == "upc-R1")
            .returning(|_| Ok(None));

        let app = app(band_with_release().await, Config::default(), mocks);
        let (status, body) = get_json(&app, "/theband/r/hello-world/R1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["props"]["appleTrackId"], "");
    }

    #[tokio::test]
    async fn test_release_without_upc_skips_apple_lookup() {
        let db = band_with_page().await;
        let mut release = live_release("R1", "AR1", "No Barcode");
        release.upc = Set(None);
        insert_release(&db, release).await;

        let mut mocks = Mocks::new();
        mocks.warehouse = MockWarehouseClient::new();
        mocks.warehouse.expect_find_apple_track_id().never();

        let app = app(db, Config::default(), mocks);
        let (status, body) = get_json(&app, "/theband/r/no-barcode/R1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["props"]["appleTrackId"], "");
    }

    #[tokio::test]
    async fn test_release_page_props_match_frontend_fields() {
        let db = test_db().await;
        insert_artist(&db, "AR1", "The Band", None).await;
        insert_fan_page(
            &db,
            "AR1",
            "theband",
            json!({"connect_text": "Join", "thank_you_text": "Thanks"}),
        )
        .await;
        insert_asset(&db, "C1", None, "image").await;
        let mut release = live_release("R1", "AR1", "Hello");
        release.cover_art_id = Set(Some("C1".into()));
        release.track_order = Set(StringVec(vec!["T2".into(), "T1".into()]));
        insert_release(&db, release).await;
        insert_track(&db, "T1", "R1", 1, Some(180)).await;
        insert_track(&db, "T2", "R1", 2, Some(200)).await;
        insert_asset(&db, "A1", Some("T1"), "audio").await;
        insert_asset(&db, "A2", Some("T2"), "audio").await;

        let app = app(db, Config::default(), Mocks::new());
        let (status, body) = get_json(&app, "/theband/r/hello/R1").await;
        assert_eq!(status, StatusCode::OK);

        let props = &body["props"];
        assert_eq!(props["fanPage"]["connect_text"], "Join");
        assert_eq!(props["fanPage"]["thank_you_text"], "Thanks");
        assert_eq!(props["fanPage"]["url_handle"], "theband");
        assert_eq!(props["artist"]["profile"]["name"], "The Band");
        assert_eq!(props["release"]["track_order"], json!(["T2", "T1"]));
        assert_eq!(props["release"]["cover_art"]["id"], "C1");
        assert_eq!(props["tracks"][1]["assets"][0]["id"], "A2");

        // Sharing a release shares the fan page, not the cover art
        let og_tags = &body["og_tags"];
        assert_eq!(og_tags["og:url"], "http://localhost:3000/theband");
        assert_eq!(og_tags["twitter:url"], "http://localhost:3000/theband");
        assert_eq!(og_tags["og:url"], props["fanPage"]["url"]);
        assert_eq!(og_tags["og:image"], "http://localhost:3000/assets/img-1");
        assert_eq!(og_tags["twitter:image"], props["fanPage"]["artist_image_url"]);
    }

    #[tokio::test]
    async fn test_release_routes_hidden_when_feature_disabled() {
        let mut config = Config::default();
        config.features.fan_release_page = false;
        let app = app(band_with_release().await, config, Mocks::new());

        let response = get(&app, "/theband/r/hello-world/R1", &[]).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = get(&app, "/theband/r/R1", &[]).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get(&app, "/theband", &[]).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_internet_explorer_gets_unsupported_page() {
        let app = app(band_with_page().await, Config::default(), Mocks::new());

        let response = get(
            &app,
            "/theband",
            &[("user-agent", "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko")],
        )
        .await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["component"], "UnsupportedBrowserApp");
    }

    #[tokio::test]
    async fn test_html_shell_without_json_accept() {
        let app = app(band_with_page().await, Config::default(), Mocks::new());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/theband/s/summer").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(html.contains("<title>Results</title>"));
        assert!(html.contains("/static/FanPageWinnerApp.js"));
    }
}
