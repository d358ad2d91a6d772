//! Second-order detection: stored payload resurfacing on a later read

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::models::{Detection, Evidence, Technique};
use crate::oracle::{payloads, Oracle};
use crate::session::Session;
use async_trait::async_trait;
use tracing::debug;

/// Stores a quote-bearing marker through the write path, then issues a
/// separate read request and checks whether the marker's unescaped
/// fragment or any configured sensitive substring resurfaces.
///
/// Known precision limitation: the disjunction is broad by design — a
/// sensitive substring such as "admin" can appear on the read path for
/// reasons unrelated to the injected payload, so this oracle can
/// overcount. The condition is kept as-is rather than silently tightened.
pub struct SecondOrderOracle;

#[async_trait]
impl Oracle for SecondOrderOracle {
    fn technique(&self) -> Technique {
        Technique::SecondOrder
    }

    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection> {
        let stored = payloads::second_order(session.level().quote_context());

        let write_url = config.url(&config.second_order_write_path);
        session
            .client()
            .post_form(
                &write_url,
                &[("id", stored.payload.as_str()), ("Submit", "Submit")],
            )
            .await?;

        let read_url = config.url(&config.second_order_read_path);
        let body = session.client().get(&read_url).await?.text().await?;

        let fragment_resurfaced = body.contains(stored.fragment.as_str());
        let sensitive_leaked = config
            .signatures
            .second_order_sensitive
            .iter()
            .find(|s| body.contains(s.as_str()));

        let observed = fragment_resurfaced || sensitive_leaked.is_some();
        debug!(
            "second-order at {}: fragment {}, sensitive {:?}",
            session.level(),
            if fragment_resurfaced { "resurfaced" } else { "absent" },
            sensitive_leaked
        );

        Ok(Detection {
            technique: self.technique(),
            level: session.level(),
            observed,
            evidence: if fragment_resurfaced {
                Evidence::Matched {
                    needle: stored.fragment.clone(),
                }
            } else if let Some(s) = sensitive_leaked {
                Evidence::Matched { needle: s.clone() }
            } else {
                Evidence::None
            },
        })
    }
}
