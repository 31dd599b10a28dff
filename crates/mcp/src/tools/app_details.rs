// App metadata and store listings

use crate::context::PublisherSettings;
use crate::format::{to_pretty_json, truncate, FULL_DESCRIPTION_BUDGET};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, package_name_schema, Tool};
use anyhow::{Context, Result};
use play_publisher::types::{AppDetails, Listing};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tool to read app details and per-language listings
pub struct AppDetailsTool {
    settings: Arc<PublisherSettings>,
}

impl AppDetailsTool {
    pub fn new(settings: Arc<PublisherSettings>) -> Self {
        Self { settings }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppDetailsArgs {
    package_name: String,
}

#[derive(Debug, Serialize)]
struct AppDetailsView {
    details: AppDetails,
    listings: Vec<ListingView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingView {
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_description: Option<String>,
}

impl From<Listing> for ListingView {
    fn from(listing: Listing) -> Self {
        Self {
            language: listing.language,
            title: listing.title,
            short_description: listing.short_description,
            full_description: listing
                .full_description
                .map(|d| truncate(&d, FULL_DESCRIPTION_BUDGET)),
        }
    }
}

#[async_trait::async_trait]
impl Tool for AppDetailsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-app-details".to_string(),
            description: "Get app details including version, status, and configuration from Google Play Console".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "packageName": package_name_schema()
                }),
                vec!["packageName"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: AppDetailsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get-app-details")?;

        let client = self.settings.client()?;
        let client = &client;

        let (details, listings) = client
            .with_edit(&args.package_name, |edit| async move {
                let details = client.edits().details(&edit).await?;
                let listings = client.edits().listings(&edit).await?;
                Ok((details, listings))
            })
            .await?;

        let view = AppDetailsView {
            details,
            listings: listings.into_iter().map(ListingView::from).collect(),
        };

        Ok(CallToolResult::text(to_pretty_json(&view)?))
    }
}
