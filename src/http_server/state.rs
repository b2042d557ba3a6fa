use std::sync::Arc;

use color_eyre::eyre::Result;

use crate::config::Config;
use crate::database::Database;
use crate::http_server::render::PageRenderer;
use crate::ports::delivery::DeliveryClient;
use crate::ports::smartlink::SmartlinkClient;
use crate::ports::warehouse::WarehouseClient;
use crate::services::delivery::DeliveryHttpAdapter;
use crate::services::feature_flags::FeatureFlags;
use crate::services::feature_fm::FeatureFmClient;
use crate::services::warehouse::SqlWarehouse;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    pub features: FeatureFlags,
    pub renderer: PageRenderer,
    pub smartlinks: Arc<dyn SmartlinkClient>,
    pub delivery: Arc<dyn DeliveryClient>,
    pub warehouse: Arc<dyn WarehouseClient>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        config: Config,
        smartlinks: Arc<dyn SmartlinkClient>,
        delivery: Arc<dyn DeliveryClient>,
        warehouse: Arc<dyn WarehouseClient>,
    ) -> Self {
        Self {
            features: FeatureFlags::from_config(&config.features),
            renderer: PageRenderer::new(config.analytics_key.clone(), config.static_url.clone()),
            db,
            config,
            smartlinks,
            delivery,
            warehouse,
        }
    }

    /// Wire the production adapters described by the config.
    pub async fn from_config(db: Arc<Database>, config: Config) -> Result<Self> {
        let smartlinks = Arc::new(FeatureFmClient::new(config.feature_fm.clone()));
        let delivery = Arc::new(DeliveryHttpAdapter::new(config.delivery.clone()));
        let warehouse = Arc::new(SqlWarehouse::connect(config.warehouse.as_ref()).await?);

        Ok(Self::new(db, config, smartlinks, delivery, warehouse))
    }
}
