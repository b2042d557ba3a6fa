use color_eyre::eyre::Result;

/// Port for the media delivery service that transcodes and hosts audio
/// previews.
///
/// Implementations live in `services::delivery` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Returns the preview URL for an audio asset. With `generate` set, the
    /// service creates and caches the preview if it does not exist yet.
    async fn get_preview_track_url(&self, asset_id: &str, generate: bool) -> Result<String>;
}
