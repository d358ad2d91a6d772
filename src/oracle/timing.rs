//! Time-based blind detection via a conditional-delay differential

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::models::{Detection, Evidence, Technique};
use crate::oracle::{payloads, submit_payload, Oracle};
use crate::session::Session;
use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

/// Submits a true-condition delay payload and a false-condition one, and
/// compares elapsed times: the target is vulnerable when the differential
/// exceeds the configured threshold.
///
/// The threshold defaults to 4s against a 5s injected delay, which absorbs
/// network jitter. The two requests must run sequentially, and no other
/// network-bound case may share the measurement window: concurrent load
/// inflates both measurements and corrupts the differential.
pub struct TimeBasedOracle;

async fn timed_submit(session: &Session, config: &HarnessConfig, payload: &str) -> Result<f64> {
    let start = Instant::now();
    submit_payload(session, config, payload).await?;
    Ok(start.elapsed().as_secs_f64())
}

#[async_trait]
impl Oracle for TimeBasedOracle {
    fn technique(&self) -> Technique {
        Technique::TimeBased
    }

    async fn probe(&self, session: &Session, config: &HarnessConfig) -> Result<Detection> {
        let pair = payloads::time_pair(session.level().quote_context(), config.delay_secs);

        let true_secs = timed_submit(session, config, &pair.truthy).await?;
        let false_secs = timed_submit(session, config, &pair.falsy).await?;

        let delta = true_secs - false_secs;
        let observed = delta > config.delay_threshold_secs;
        debug!(
            "time-based at {}: true {true_secs:.2}s, false {false_secs:.2}s, delta {delta:.2}s (threshold {:.2}s)",
            session.level(),
            config.delay_threshold_secs
        );

        Ok(Detection {
            technique: self.technique(),
            level: session.level(),
            observed,
            evidence: Evidence::Delay {
                true_secs,
                false_secs,
            },
        })
    }
}
