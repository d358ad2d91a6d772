//! Detection oracles, one per SQL injection technique
//!
//! Each oracle issues one or more crafted requests through a ready session
//! and returns a boolean "vulnerability observed" verdict with diagnostic
//! evidence. Network failures propagate out uncaught: an oracle never
//! conflates "could not determine" with "not vulnerable".

pub mod boolean;
pub mod error_based;
pub mod payloads;
pub mod piggyback;
pub mod second_order;
pub mod timing;
pub mod union;

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::models::{Detection, Technique};
use crate::session::Session;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Trait all detection oracles implement
#[async_trait]
pub trait Oracle: Send + Sync {
    /// The technique this oracle exercises
    fn technique(&self) -> Technique;

    /// Probes the target through the given session and returns the verdict
    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection>;
}

/// Returns the oracle implementing the given technique
pub fn oracle_for(technique: Technique) -> Arc<dyn Oracle> {
    match technique {
        Technique::BlindBoolean => Arc::new(boolean::BlindBooleanOracle),
        Technique::Piggyback => Arc::new(piggyback::PiggybackOracle),
        Technique::TimeBased => Arc::new(timing::TimeBasedOracle),
        Technique::UnionData => Arc::new(union::UnionDataOracle),
        Technique::UnionSchema => Arc::new(union::UnionSchemaOracle),
        Technique::ErrorBased => Arc::new(error_based::ErrorBasedOracle),
        Technique::SecondOrder => Arc::new(second_order::SecondOrderOracle),
    }
}

/// All oracles in suite order
pub fn all_oracles() -> Vec<Arc<dyn Oracle>> {
    Technique::ALL.iter().map(|t| oracle_for(*t)).collect()
}

/// Submits a payload through the vulnerable form (POST) and returns the body
pub(crate) async fn submit_payload(
    session: &Session,
    config: &HarnessConfig,
    payload: &str,
) -> Result<String> {
    let url = config.url(&config.sqli_path);
    let response = session
        .client()
        .post_form(&url, &[("id", payload), ("Submit", "Submit")])
        .await?;
    Ok(response.text().await?)
}

/// Delivers the same probe through the query string (GET)
pub(crate) async fn query_payload(
    session: &Session,
    config: &HarnessConfig,
    path: &str,
    payload: &str,
) -> Result<String> {
    let url = Url::parse_with_params(&config.url(path), &[("id", payload), ("Submit", "Submit")])?;
    let response = session.client().get(url.as_str()).await?;
    Ok(response.text().await?)
}
