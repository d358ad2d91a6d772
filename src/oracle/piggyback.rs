//! Piggyback (stacked query) detection

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::models::{Detection, Evidence, Technique};
use crate::oracle::{payloads, submit_payload, Oracle};
use crate::session::Session;
use async_trait::async_trait;
use tracing::debug;

/// Appends a second statement after the injected query and checks whether
/// the page still renders the expected content marker.
///
/// This is a heuristic proxy for stacked-query execution, not a delay
/// measurement, and it is inherently noisy: a false negative here is a
/// possible outcome, not an anomaly.
pub struct PiggybackOracle;

#[async_trait]
impl Oracle for PiggybackOracle {
    fn technique(&self) -> Technique {
        Technique::Piggyback
    }

    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection> {
        let payload = payloads::piggyback(session.level().quote_context());
        let body = submit_payload(session, config, &payload).await?;

        let marker = &config.signatures.piggyback_marker;
        let observed = body.contains(marker.as_str());
        debug!(
            "piggyback at {}: marker '{marker}' {}",
            session.level(),
            if observed { "present" } else { "absent" }
        );

        Ok(Detection {
            technique: self.technique(),
            level: session.level(),
            observed,
            evidence: if observed {
                Evidence::Matched {
                    needle: marker.clone(),
                }
            } else {
                Evidence::None
            },
        })
    }
}
