//! Boolean-blind detection: diff of normalized true/false responses

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::models::{Detection, Evidence, Technique};
use crate::oracle::{payloads, submit_payload, Oracle};
use crate::session::token::normalize;
use crate::session::Session;
use async_trait::async_trait;
use tracing::debug;

/// Submits a forced-true and a forced-false condition on the same parameter
/// and compares the full response bodies after token normalization. The
/// target is vulnerable when the bodies differ.
pub struct BlindBooleanOracle;

#[async_trait]
impl Oracle for BlindBooleanOracle {
    fn technique(&self) -> Technique {
        Technique::BlindBoolean
    }

    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection> {
        let pair = payloads::boolean_pair(session.level().quote_context());

        let body_true = submit_payload(session, config, &pair.truthy).await?;
        let body_false = submit_payload(session, config, &pair.falsy).await?;

        // Each response embeds a fresh per-request token; comparing raw
        // bodies would always differ. Normalize both sides first.
        let differed = normalize(&body_true, &config.token_field)
            != normalize(&body_false, &config.token_field);
        debug!(
            "blind-boolean at {}: normalized bodies {}",
            session.level(),
            if differed { "differ" } else { "match" }
        );

        Ok(Detection {
            technique: self.technique(),
            level: session.level(),
            observed: differed,
            evidence: Evidence::ResponseDiff { differed },
        })
    }
}
