//! Reviews API endpoints. These are not edit-scoped.

use super::segment;
use crate::client::PublisherClient;
use crate::error::PublisherResult;
use crate::types::{Review, ReviewsListResponse};
use serde::Serialize;

/// Query parameters for listing reviews.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_language: Option<String>,
    /// Continuation token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslationQuery<'q> {
    #[serde(skip_serializing_if = "Option::is_none")]
    translation_language: Option<&'q str>,
}

/// Reviews API for reading user ratings and comments.
pub struct ReviewsApi<'a> {
    client: &'a PublisherClient,
}

impl<'a> ReviewsApi<'a> {
    pub(crate) fn new(client: &'a PublisherClient) -> Self {
        Self { client }
    }

    /// List one page of reviews.
    pub async fn list(
        &self,
        package_name: &str,
        query: &ReviewsQuery,
    ) -> PublisherResult<ReviewsListResponse> {
        self.client
            .http
            .get_with_query(
                &format!("applications/{}/reviews", segment(package_name)),
                query,
            )
            .await
    }

    /// Get a single review, optionally machine-translated.
    pub async fn get(
        &self,
        package_name: &str,
        review_id: &str,
        translation_language: Option<&str>,
    ) -> PublisherResult<Review> {
        self.client
            .http
            .get_with_query(
                &format!(
                    "applications/{}/reviews/{}",
                    segment(package_name),
                    segment(review_id)
                ),
                &TranslationQuery {
                    translation_language,
                },
            )
            .await
    }
}
