//! Error-based detection: forcing a state-leaking database error

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::models::{Detection, Evidence, Technique};
use crate::oracle::{payloads, query_payload, Oracle};
use crate::session::Session;
use async_trait::async_trait;
use tracing::debug;

/// Submits a payload that triggers an XPATH-forcing database error and
/// scans the response for any of the configured error signatures. The
/// probe travels in the query string, matching the GET surface of the
/// vulnerable page.
pub struct ErrorBasedOracle;

#[async_trait]
impl Oracle for ErrorBasedOracle {
    fn technique(&self) -> Technique {
        Technique::ErrorBased
    }

    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection> {
        let payload = payloads::error_probe(session.level().quote_context());
        let body = query_payload(session, config, &config.sqli_path, &payload).await?;

        let matched = config
            .signatures
            .sql_errors
            .iter()
            .find(|sig| body.contains(sig.as_str()));
        debug!(
            "error-based at {}: {}",
            session.level(),
            match matched {
                Some(sig) => format!("signature '{sig}' present"),
                None => "no error signature".to_string(),
            }
        );

        Ok(Detection {
            technique: self.technique(),
            level: session.level(),
            observed: matched.is_some(),
            evidence: match matched {
                Some(sig) => Evidence::Matched { needle: sig.clone() },
                None => Evidence::None,
            },
        })
    }
}
