//! Transport layer for the publisher client.

pub mod http;

pub use http::HttpTransport;
