//! Edits API endpoints.
//!
//! Every read below is scoped to an open edit session; see
//! [`PublisherClient::with_edit`] for the open/read/delete discipline.

use super::segment;
use crate::client::PublisherClient;
use crate::error::PublisherResult;
use crate::types::{
    Apk, ApksListResponse, AppDetails, AppEdit, Bundle, BundlesListResponse, Listing,
    ListingsListResponse, Track, TracksListResponse,
};
use tracing::debug;

/// An edit session opened for a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEdit {
    pub package_name: String,
    pub edit_id: String,
}

impl OpenEdit {
    fn path(&self, rest: &str) -> String {
        let base = format!(
            "applications/{}/edits/{}",
            segment(&self.package_name),
            segment(&self.edit_id)
        );
        if rest.is_empty() {
            base
        } else {
            format!("{}/{}", base, rest)
        }
    }
}

/// Edits API for reading a consistent snapshot of an app.
pub struct EditsApi<'a> {
    client: &'a PublisherClient,
}

impl<'a> EditsApi<'a> {
    pub(crate) fn new(client: &'a PublisherClient) -> Self {
        Self { client }
    }

    /// Open a new edit session.
    pub async fn insert(&self, package_name: &str) -> PublisherResult<OpenEdit> {
        let edit: AppEdit = self
            .client
            .http
            .post(
                &format!("applications/{}/edits", segment(package_name)),
                &serde_json::json!({}),
            )
            .await?;
        debug!(package = package_name, edit_id = %edit.id, "Opened edit");

        Ok(OpenEdit {
            package_name: package_name.to_string(),
            edit_id: edit.id,
        })
    }

    /// Discard an edit session without committing it.
    pub async fn delete(&self, edit: &OpenEdit) -> PublisherResult<()> {
        self.client.http.delete_no_response(&edit.path("")).await?;
        debug!(package = %edit.package_name, edit_id = %edit.edit_id, "Deleted edit");
        Ok(())
    }

    /// Get app-level details.
    pub async fn details(&self, edit: &OpenEdit) -> PublisherResult<AppDetails> {
        self.client.http.get(&edit.path("details")).await
    }

    /// List store listings for every language.
    pub async fn listings(&self, edit: &OpenEdit) -> PublisherResult<Vec<Listing>> {
        let response: ListingsListResponse = self.client.http.get(&edit.path("listings")).await?;
        Ok(response.listings)
    }

    /// List all release tracks.
    pub async fn tracks(&self, edit: &OpenEdit) -> PublisherResult<Vec<Track>> {
        let response: TracksListResponse = self.client.http.get(&edit.path("tracks")).await?;
        Ok(response.tracks)
    }

    /// Get a single release track by name.
    pub async fn track(&self, edit: &OpenEdit, track: &str) -> PublisherResult<Track> {
        self.client
            .http
            .get(&edit.path(&format!("tracks/{}", segment(track))))
            .await
    }

    /// List uploaded app bundles.
    pub async fn bundles(&self, edit: &OpenEdit) -> PublisherResult<Vec<Bundle>> {
        let response: BundlesListResponse = self.client.http.get(&edit.path("bundles")).await?;
        Ok(response.bundles)
    }

    /// List uploaded APKs.
    pub async fn apks(&self, edit: &OpenEdit) -> PublisherResult<Vec<Apk>> {
        let response: ApksListResponse = self.client.http.get(&edit.path("apks")).await?;
        Ok(response.apks)
    }
}
