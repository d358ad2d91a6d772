//! HTTP layer: cookie-holding client used by the session lifecycle

pub mod client;

pub use client::HttpClient;
