//! # Play Publisher
//!
//! Async client for the read side of the Google Play Developer
//! (Android Publisher v3) API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use play_publisher::{PublisherClient, PublisherResult};
//!
//! #[tokio::main]
//! async fn main() -> PublisherResult<()> {
//!     let client = PublisherClient::builder()
//!         .service_account_key("/path/to/service-account.json")
//!         .build()?;
//!
//!     // Edit-scoped reads: the edit is always deleted afterwards
//!     let tracks = client
//!         .with_edit("com.example.app", |edit| {
//!             let client = &client;
//!             async move { client.edits().tracks(&edit).await }
//!         })
//!         .await?;
//!     println!("Found {} tracks", tracks.len());
//!
//!     // Reviews are read directly
//!     let page = client
//!         .reviews()
//!         .list("com.example.app", &Default::default())
//!         .await?;
//!     println!("Found {} reviews", page.reviews.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use api::{OpenEdit, ReviewsQuery};
pub use auth::ServiceAccountKey;
pub use client::{PublisherClient, PublisherClientBuilder};
pub use config::{
    ClientConfig, CredentialSource, DEFAULT_BASE_URL, PUBLISHER_SCOPE, SERVICE_ACCOUNT_KEY_ENV,
};
pub use error::{PublisherError, PublisherResult};
