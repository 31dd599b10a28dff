//! Android Publisher v3 resources read by this client.
//!
//! Only the fields the client consumes are modelled; every field is optional
//! because the API omits empty values. Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// A server-side edit session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEdit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time_seconds: Option<String>,
}

/// App-level details attached to an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

/// Store listing for one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsListResponse {
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// A release track and its releases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub releases: Vec<TrackRelease>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRelease {
    #[serde(default)]
    pub name: Option<String>,
    /// int64 values, transmitted as decimal strings.
    #[serde(default)]
    pub version_codes: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_fraction: Option<f64>,
    #[serde(default)]
    pub release_notes: Vec<LocalizedText>,
    #[serde(default)]
    pub in_app_update_priority: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TracksListResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// An uploaded Android App Bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default)]
    pub version_code: Option<i64>,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundlesListResponse {
    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

/// An uploaded APK.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apk {
    #[serde(default)]
    pub version_code: Option<i64>,
    #[serde(default)]
    pub binary: Option<ApkBinary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApkBinary {
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApksListResponse {
    #[serde(default)]
    pub apks: Vec<Apk>,
}

/// A user review with its comment thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub review_id: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Review {
    /// The reviewer's comment, found by its discriminant rather than position.
    pub fn user_comment(&self) -> Option<&UserComment> {
        self.comments.iter().find_map(|c| c.user_comment.as_ref())
    }

    /// The developer's reply, if one has been posted.
    pub fn developer_reply(&self) -> Option<&DeveloperComment> {
        self.comments.iter().find_map(|c| c.developer_comment.as_ref())
    }
}

/// One entry of a review thread; exactly one side is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub user_comment: Option<UserComment>,
    #[serde(default)]
    pub developer_comment: Option<DeveloperComment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserComment {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub last_modified: Option<Timestamp>,
    #[serde(default)]
    pub star_rating: Option<i32>,
    #[serde(default)]
    pub reviewer_language: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub android_os_version: Option<i32>,
    #[serde(default)]
    pub app_version_code: Option<i64>,
    #[serde(default)]
    pub app_version_name: Option<String>,
    #[serde(default)]
    pub thumbs_up_count: Option<i32>,
    #[serde(default)]
    pub thumbs_down_count: Option<i32>,
    #[serde(default)]
    pub device_metadata: Option<DeviceMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetadata {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub device_class: Option<String>,
    #[serde(default)]
    pub screen_width_px: Option<i32>,
    #[serde(default)]
    pub screen_height_px: Option<i32>,
    #[serde(default)]
    pub screen_density_dpi: Option<i32>,
    #[serde(default)]
    pub native_platform: Option<String>,
    #[serde(default)]
    pub gl_es_version: Option<i32>,
    #[serde(default)]
    pub cpu_model: Option<String>,
    #[serde(default)]
    pub cpu_make: Option<String>,
    #[serde(default)]
    pub ram_mb: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperComment {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub last_modified: Option<Timestamp>,
}

/// Protobuf-style timestamp; `seconds` arrives as a decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsListResponse {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub token_pagination: Option<TokenPagination>,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPagination {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub previous_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total_results: Option<i32>,
    #[serde(default)]
    pub result_per_page: Option<i32>,
    #[serde(default)]
    pub start_index: Option<i32>,
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Number(i64),
        Text(String),
    }

    match Int64::deserialize(deserializer)? {
        Int64::Number(n) => Ok(n),
        Int64::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_accepts_string_seconds() {
        let ts: Timestamp =
            serde_json::from_value(serde_json::json!({"seconds": "1700000000", "nanos": 5})).unwrap();
        assert_eq!(ts.seconds, 1_700_000_000);
        assert_eq!(ts.nanos, 5);

        let ts: Timestamp = serde_json::from_value(serde_json::json!({"seconds": 42})).unwrap();
        assert_eq!(ts.seconds, 42);
        assert_eq!(ts.nanos, 0);
    }

    #[test]
    fn test_review_comment_discriminant() {
        let review: Review = serde_json::from_value(serde_json::json!({
            "reviewId": "r1",
            "authorName": "Ada",
            "comments": [
                {"developerComment": {"text": "Thanks!"}},
                {"userComment": {"text": "Great app", "starRating": 5}}
            ]
        }))
        .unwrap();

        assert_eq!(review.user_comment().unwrap().text.as_deref(), Some("Great app"));
        assert_eq!(review.developer_reply().unwrap().text.as_deref(), Some("Thanks!"));
    }

    #[test]
    fn test_review_without_reply() {
        let review: Review = serde_json::from_value(serde_json::json!({
            "reviewId": "r2",
            "comments": [{"userComment": {"text": "Meh", "starRating": 3}}]
        }))
        .unwrap();

        assert!(review.user_comment().is_some());
        assert!(review.developer_reply().is_none());
    }

    #[test]
    fn test_track_release_defaults() {
        let track: Track = serde_json::from_value(serde_json::json!({
            "track": "beta",
            "releases": [{"status": "draft"}]
        }))
        .unwrap();

        assert_eq!(track.releases.len(), 1);
        assert!(track.releases[0].version_codes.is_empty());
        assert!(track.releases[0].release_notes.is_empty());
    }
}
