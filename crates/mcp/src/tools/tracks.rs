// Release tracks and their releases

use crate::context::PublisherSettings;
use crate::format::{to_pretty_json, truncate, RELEASE_NOTES_BUDGET};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_enum, json_schema_object, package_name_schema, Tool};
use anyhow::{Context, Result};
use play_publisher::types::{LocalizedText, Track, TrackRelease};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const TRACK_NAMES: [&str; 4] = ["internal", "alpha", "beta", "production"];

/// Tool to read one or all release tracks
pub struct ReleaseTracksTool {
    settings: Arc<PublisherSettings>,
}

impl ReleaseTracksTool {
    pub fn new(settings: Arc<PublisherSettings>) -> Self {
        Self { settings }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseTracksArgs {
    package_name: String,
    #[serde(default)]
    track: Option<String>,
}

#[derive(Debug, Serialize)]
struct TrackView {
    track: Option<String>,
    releases: Vec<ReleaseView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseView {
    name: Option<String>,
    status: Option<String>,
    version_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_fraction: Option<f64>,
    release_notes: Vec<ReleaseNoteView>,
    in_app_update_priority: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ReleaseNoteView {
    language: Option<String>,
    text: Option<String>,
}

impl From<Track> for TrackView {
    fn from(track: Track) -> Self {
        Self {
            track: track.track,
            releases: track.releases.into_iter().map(ReleaseView::from).collect(),
        }
    }
}

impl From<TrackRelease> for ReleaseView {
    fn from(release: TrackRelease) -> Self {
        Self {
            name: release.name,
            status: release.status,
            version_codes: release.version_codes,
            user_fraction: release.user_fraction,
            release_notes: release
                .release_notes
                .into_iter()
                .map(ReleaseNoteView::from)
                .collect(),
            in_app_update_priority: release.in_app_update_priority,
        }
    }
}

impl From<LocalizedText> for ReleaseNoteView {
    fn from(note: LocalizedText) -> Self {
        Self {
            language: note.language,
            text: note.text.map(|t| truncate(&t, RELEASE_NOTES_BUDGET)),
        }
    }
}

#[async_trait::async_trait]
impl Tool for ReleaseTracksTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-release-tracks".to_string(),
            description: "Get release track information (internal, alpha, beta, production) for an app".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "packageName": package_name_schema(),
                    "track": json_schema_enum(
                        &TRACK_NAMES,
                        "Specific track to query. If omitted, returns all tracks."
                    )
                }),
                vec!["packageName"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ReleaseTracksArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get-release-tracks")?;

        let client = self.settings.client()?;
        let client = &client;
        let track = args.track.as_deref();

        let tracks = client
            .with_edit(&args.package_name, |edit| async move {
                match track {
                    Some(name) => Ok(vec![client.edits().track(&edit, name).await?]),
                    None => client.edits().tracks(&edit).await,
                }
            })
            .await?;

        let view: Vec<TrackView> = tracks.into_iter().map(TrackView::from).collect();
        Ok(CallToolResult::text(to_pretty_json(&view)?))
    }
}
