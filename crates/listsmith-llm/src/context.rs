use listsmith_catalog::ApiConfig;
use listsmith_core::{Platform, PlatformRequirements, Product};

/// Everything a provider client needs for one (product, platform) call
#[derive(Debug, Clone)]
pub struct OptimizationContext {
    pub product: Product,
    pub platform: Platform,
    pub requirements: &'static PlatformRequirements,
    /// Free-text emphasis such as "eco-friendly materials"
    pub focus: Option<String>,
    pub audience: Option<String>,
    pub api: ApiConfig,
}

impl OptimizationContext {
    pub fn new(
        product: Product,
        platform: Platform,
        focus: Option<String>,
        audience: Option<String>,
        api: ApiConfig,
    ) -> Self {
        Self {
            product,
            platform,
            requirements: platform.requirements(),
            focus: focus.filter(|text| !text.trim().is_empty()),
            audience: audience.filter(|text| !text.trim().is_empty()),
            api,
        }
    }
}
