pub mod app_details;
pub mod bundles;
pub mod reviews;
pub mod tracks;
mod registry;

pub use app_details::AppDetailsTool;
pub use bundles::BundleDetailsTool;
pub use registry::{
    json_schema_enum, json_schema_integer, json_schema_object, json_schema_string, DispatchError,
    RegistryError, Tool, ToolRegistry,
};
pub use reviews::{ReviewTool, ReviewsTool};
pub use tracks::ReleaseTracksTool;

use crate::context::PublisherSettings;
use std::sync::Arc;

pub(crate) fn package_name_schema() -> serde_json::Value {
    json_schema_string("Android package name (e.g., com.example.app)")
}

/// Registry holding every Play Console tool, all sharing one settings value.
pub fn default_registry(settings: PublisherSettings) -> Result<ToolRegistry, RegistryError> {
    let settings = Arc::new(settings);
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(AppDetailsTool::new(settings.clone())))?;
    registry.register(Arc::new(ReleaseTracksTool::new(settings.clone())))?;
    registry.register(Arc::new(ReviewsTool::new(settings.clone())))?;
    registry.register(Arc::new(ReviewTool::new(settings.clone())))?;
    registry.register(Arc::new(BundleDetailsTool::new(settings)))?;

    Ok(registry)
}
