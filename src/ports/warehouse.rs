use color_eyre::eyre::Result;

/// Port for the analytics warehouse.
///
/// Implementations live in `services::warehouse` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WarehouseClient: Send + Sync {
    async fn find_apple_track_id(&self, upc: &str) -> Result<Option<String>>;
}
