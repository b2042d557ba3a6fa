use crate::config::FeaturesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Per-release landing pages under `/{handle}/r/...`
    FanReleasePageEnabled,
}

#[derive(Debug, Clone)]
pub struct FeatureFlags {
    fan_release_page: bool,
}

impl FeatureFlags {
    pub fn from_config(config: &FeaturesConfig) -> Self {
        Self {
            fan_release_page: config.fan_release_page,
        }
    }

    pub fn is_active(&self, feature: Feature) -> bool {
        match feature {
            Feature::FanReleasePageEnabled => self.fan_release_page,
        }
    }
}
