use color_eyre::eyre::Result;

/// What the smartlink provider needs to know about a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartlinkRequest {
    pub release_id: String,
    pub title: Option<String>,
    pub upc: Option<String>,
}

/// Port for the third-party service that generates shareable "smartlinks"
/// for live releases.
///
/// Implementations live in `services::feature_fm` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SmartlinkClient: Send + Sync {
    /// Returns `None` when the provider has no link for the release.
    async fn get_smartlink(&self, release: &SmartlinkRequest) -> Result<Option<String>>;
}
