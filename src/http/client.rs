//! HTTP client wrapper with a persistent cookie jar
//!
//! One `HttpClient` backs exactly one authenticated session; the cookie jar
//! is the session identity and is never shared across test cases.

use crate::config::HarnessConfig;
use crate::error::Result;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Thin wrapper over `reqwest::Client` with cookies and timeout configured
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new client from harness configuration
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .cookie_store(true)
            .build()?;

        Ok(Self { client })
    }

    /// Sends a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        Ok(response)
    }

    /// Sends a form-urlencoded POST request
    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Response> {
        debug!("POST {url}");
        let response = self.client.post(url).form(form).send().await?;
        Ok(response)
    }
}
