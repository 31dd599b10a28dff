// Uploaded bundle and APK hashes

use crate::context::PublisherSettings;
use crate::format::to_pretty_json;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, package_name_schema, Tool};
use anyhow::{Context, Result};
use play_publisher::types::{Apk, Bundle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tool to list uploaded app bundles and APKs
pub struct BundleDetailsTool {
    settings: Arc<PublisherSettings>,
}

impl BundleDetailsTool {
    pub fn new(settings: Arc<PublisherSettings>) -> Self {
        Self { settings }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleDetailsArgs {
    package_name: String,
}

#[derive(Debug, Serialize)]
struct BundleDetailsView {
    bundles: Vec<BundleView>,
    apks: Vec<ApkView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BundleView {
    version_code: Option<i64>,
    sha256: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApkView {
    version_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    binary: Option<BinaryView>,
}

#[derive(Debug, Serialize)]
struct BinaryView {
    sha256: Option<String>,
}

impl From<Bundle> for BundleView {
    fn from(bundle: Bundle) -> Self {
        Self {
            version_code: bundle.version_code,
            sha256: bundle.sha256,
        }
    }
}

impl From<Apk> for ApkView {
    fn from(apk: Apk) -> Self {
        Self {
            version_code: apk.version_code,
            binary: apk.binary.map(|b| BinaryView { sha256: b.sha256 }),
        }
    }
}

#[async_trait::async_trait]
impl Tool for BundleDetailsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-bundle-details".to_string(),
            description: "Get details about uploaded app bundles and APKs".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "packageName": package_name_schema()
                }),
                vec!["packageName"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: BundleDetailsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get-bundle-details")?;

        let client = self.settings.client()?;
        let client = &client;

        // The two listings are independent; either failing fails the call
        let (bundles, apks) = client
            .with_edit(&args.package_name, |edit| async move {
                let edits = client.edits();
                tokio::try_join!(edits.bundles(&edit), edits.apks(&edit))
            })
            .await?;

        let view = BundleDetailsView {
            bundles: bundles.into_iter().map(BundleView::from).collect(),
            apks: apks.into_iter().map(ApkView::from).collect(),
        };

        Ok(CallToolResult::text(to_pretty_json(&view)?))
    }
}
