// User reviews: paginated list and single lookup

use crate::context::PublisherSettings;
use crate::format::{timestamp_to_iso, to_pretty_json};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_integer, json_schema_object, json_schema_string, package_name_schema, Tool};
use anyhow::{Context, Result};
use play_publisher::types::{DeviceMetadata, Review};
use play_publisher::ReviewsQuery;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_MAX_RESULTS: u32 = 20;
pub const MAX_RESULTS_LIMIT: u32 = 100;

/// Reduced view of a review shared by both review tools.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    review_id: Option<String>,
    author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    star_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Untranslated text; only present when a translation was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_version_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    android_os_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_metadata: Option<DeviceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    developer_reply: Option<DeveloperReply>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceSummary {
    manufacturer: Option<String>,
    device_class: Option<String>,
    screen_density_dpi: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeveloperReply {
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
}

impl From<&DeviceMetadata> for DeviceSummary {
    fn from(meta: &DeviceMetadata) -> Self {
        Self {
            manufacturer: meta.manufacturer.clone(),
            device_class: meta.device_class.clone(),
            screen_density_dpi: meta.screen_density_dpi,
        }
    }
}

impl From<&Review> for ReviewSummary {
    fn from(review: &Review) -> Self {
        let comment = review.user_comment();
        let reply = review.developer_reply();

        Self {
            review_id: review.review_id.clone(),
            author_name: review.author_name.clone(),
            star_rating: comment.and_then(|c| c.star_rating),
            text: comment.and_then(|c| c.text.clone()),
            original_text: comment.and_then(|c| c.original_text.clone()),
            last_modified: comment.and_then(|c| timestamp_to_iso(c.last_modified.as_ref())),
            app_version_code: comment.and_then(|c| c.app_version_code),
            app_version_name: comment.and_then(|c| c.app_version_name.clone()),
            device: comment.and_then(|c| c.device.clone()),
            android_os_version: comment.and_then(|c| c.android_os_version),
            device_metadata: comment
                .and_then(|c| c.device_metadata.as_ref())
                .map(DeviceSummary::from),
            developer_reply: reply.map(|r| DeveloperReply {
                text: r.text.clone(),
                last_modified: timestamp_to_iso(r.last_modified.as_ref()),
            }),
        }
    }
}

/// Tool to list recent reviews
pub struct ReviewsTool {
    settings: Arc<PublisherSettings>,
}

impl ReviewsTool {
    pub fn new(settings: Arc<PublisherSettings>) -> Self {
        Self { settings }
    }
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

/// JSON Schema counts `20.0` as an integer, so accept integral floats too.
fn integral_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let value = match number.as_u64() {
        Some(value) => Some(value),
        None => number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u64),
    };
    value
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("expected a non-negative integer, got {}", number)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsArgs {
    package_name: String,
    #[serde(default = "default_max_results", deserialize_with = "integral_u32")]
    max_results: u32,
    #[serde(default)]
    translation_language: Option<String>,
    #[serde(default)]
    page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsView {
    total_reviews: usize,
    reviews: Vec<ReviewSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_token: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ReviewsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-reviews".to_string(),
            description: "Get user reviews and ratings for an app from Google Play".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "packageName": package_name_schema(),
                    "maxResults": json_schema_integer(
                        "Maximum number of reviews to return (1-100, default 20)",
                        1,
                        MAX_RESULTS_LIMIT as i64,
                        DEFAULT_MAX_RESULTS as i64
                    ),
                    "translationLanguage": json_schema_string(
                        "Language code to translate reviews to (e.g., 'en' for English)"
                    ),
                    "pageToken": json_schema_string(
                        "Continuation token from a previous call's nextPageToken"
                    )
                }),
                vec!["packageName"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ReviewsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get-reviews")?;

        let client = self.settings.client()?;
        let query = ReviewsQuery {
            max_results: Some(args.max_results),
            translation_language: args.translation_language,
            token: args.page_token,
        };

        let page = client.reviews().list(&args.package_name, &query).await?;

        let reviews: Vec<ReviewSummary> = page.reviews.iter().map(ReviewSummary::from).collect();
        let view = ReviewsView {
            total_reviews: reviews.len(),
            reviews,
            next_page_token: page.token_pagination.and_then(|p| p.next_page_token),
        };

        Ok(CallToolResult::text(to_pretty_json(&view)?))
    }
}

/// Tool to read a single review by id
pub struct ReviewTool {
    settings: Arc<PublisherSettings>,
}

impl ReviewTool {
    pub fn new(settings: Arc<PublisherSettings>) -> Self {
        Self { settings }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewArgs {
    package_name: String,
    review_id: String,
    #[serde(default)]
    translation_language: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ReviewTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-review".to_string(),
            description: "Get a specific user review by ID".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "packageName": package_name_schema(),
                    "reviewId": json_schema_string("The review ID to retrieve"),
                    "translationLanguage": json_schema_string(
                        "Language code to translate review to"
                    )
                }),
                vec!["packageName", "reviewId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ReviewArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get-review")?;

        let client = self.settings.client()?;
        let review = client
            .reviews()
            .get(
                &args.package_name,
                &args.review_id,
                args.translation_language.as_deref(),
            )
            .await?;

        Ok(CallToolResult::text(to_pretty_json(&ReviewSummary::from(&review))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(comments: serde_json::Value) -> Review {
        serde_json::from_value(serde_json::json!({
            "reviewId": "gp:AOqpTOF",
            "authorName": "Grace",
            "comments": comments
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_with_developer_reply() {
        let review = review(serde_json::json!([
            {"userComment": {
                "text": "Crashes on launch",
                "starRating": 2,
                "lastModified": {"seconds": "1700000000", "nanos": 0},
                "appVersionCode": 240,
                "appVersionName": "2.4.0",
                "device": "oriole",
                "androidOsVersion": 34,
                "deviceMetadata": {
                    "manufacturer": "Google",
                    "deviceClass": "phone",
                    "screenDensityDpi": 420,
                    "ramMb": 8192
                }
            }},
            {"developerComment": {
                "text": "Fixed in 2.4.1",
                "lastModified": {"seconds": "1700086400"}
            }}
        ]));

        let value = serde_json::to_value(ReviewSummary::from(&review)).unwrap();
        assert_eq!(value["reviewId"], "gp:AOqpTOF");
        assert_eq!(value["starRating"], 2);
        assert_eq!(value["lastModified"], "2023-11-14T22:13:20.000Z");
        assert_eq!(value["deviceMetadata"]["screenDensityDpi"], 420);
        assert!(value["deviceMetadata"].get("ramMb").is_none());
        assert_eq!(value["developerReply"]["text"], "Fixed in 2.4.1");
        assert_eq!(value["developerReply"]["lastModified"], "2023-11-15T22:13:20.000Z");
        assert!(value.get("originalText").is_none());
    }

    #[test]
    fn test_summary_without_reply() {
        let review = review(serde_json::json!([
            {"userComment": {"text": "Love it", "starRating": 5}}
        ]));

        let value = serde_json::to_value(ReviewSummary::from(&review)).unwrap();
        assert_eq!(value["text"], "Love it");
        assert!(value.get("developerReply").is_none());
        assert!(value.get("lastModified").is_none());
    }

    #[test]
    fn test_summary_with_translation_keeps_original() {
        let review = review(serde_json::json!([
            {"userComment": {"text": "Very good", "originalText": "Sehr gut", "starRating": 5}}
        ]));

        let value = serde_json::to_value(ReviewSummary::from(&review)).unwrap();
        assert_eq!(value["text"], "Very good");
        assert_eq!(value["originalText"], "Sehr gut");
    }

    #[test]
    fn test_max_results_defaults_to_twenty() {
        let args: ReviewsArgs =
            serde_json::from_value(serde_json::json!({"packageName": "com.example.app"})).unwrap();
        assert_eq!(args.max_results, 20);
        assert!(args.translation_language.is_none());
    }

    #[test]
    fn test_max_results_accepts_integral_float() {
        let args: ReviewsArgs = serde_json::from_value(
            serde_json::json!({"packageName": "com.example.app", "maxResults": 20.0}),
        )
        .unwrap();
        assert_eq!(args.max_results, 20);

        let fractional = serde_json::from_value::<ReviewsArgs>(
            serde_json::json!({"packageName": "com.example.app", "maxResults": 2.5}),
        );
        assert!(fractional.is_err());
    }
}
