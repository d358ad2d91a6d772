//! Union-based detection: data extraction and schema enumeration

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::models::{Detection, Evidence, Technique};
use crate::oracle::{payloads, submit_payload, Oracle};
use crate::session::Session;
use async_trait::async_trait;
use tracing::debug;

/// Appends a UNION selecting sensitive user columns and checks that every
/// configured data marker appears in the response.
pub struct UnionDataOracle;

/// Same shape as [`UnionDataOracle`] but selecting from the metadata
/// catalog, matching known schema-object names instead.
pub struct UnionSchemaOracle;

fn all_markers_present(body: &str, markers: &[String]) -> bool {
    markers.iter().all(|m| body.contains(m.as_str()))
}

async fn probe_union(
    session: &Session,
    config: &HarnessConfig,
    technique: Technique,
    payload: String,
    markers: &[String],
) -> Result<Detection> {
    let body = submit_payload(session, config, &payload).await?;
    let observed = all_markers_present(&body, markers);
    debug!(
        "{technique} at {}: markers {markers:?} {}",
        session.level(),
        if observed { "all present" } else { "not all present" }
    );

    Ok(Detection {
        technique,
        level: session.level(),
        observed,
        evidence: if observed {
            Evidence::Matched {
                needle: markers.join(", "),
            }
        } else {
            Evidence::None
        },
    })
}

#[async_trait]
impl Oracle for UnionDataOracle {
    fn technique(&self) -> Technique {
        Technique::UnionData
    }

    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection> {
        let payload = payloads::union_data(session.level().quote_context());
        probe_union(
            session,
            config,
            self.technique(),
            payload,
            &config.signatures.union_data,
        )
        .await
    }
}

#[async_trait]
impl Oracle for UnionSchemaOracle {
    fn technique(&self) -> Technique {
        Technique::UnionSchema
    }

    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection> {
        let payload = payloads::union_schema(session.level().quote_context());
        probe_union(
            session,
            config,
            self.technique(),
            payload,
            &config.signatures.union_schema,
        )
        .await
    }
}
