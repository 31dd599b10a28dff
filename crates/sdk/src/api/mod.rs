//! Endpoint groups of the publishing API.

pub mod edits;
pub mod reviews;

pub use edits::{EditsApi, OpenEdit};
pub use reviews::{ReviewsApi, ReviewsQuery};

use url::Url;

/// Percent-encode a caller-supplied value for use as one path segment.
pub(crate) fn segment(value: &str) -> String {
    let mut scratch = Url::parse("http://segment.invalid/").expect("static URL is valid");
    if let Ok(mut segments) = scratch.path_segments_mut() {
        segments.clear().push(value);
    }
    scratch.path().trim_start_matches('/').to_string()
}
