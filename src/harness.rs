//! Test-case orchestration across the technique × level matrix

use crate::config::HarnessConfig;
use crate::error::{AletheiaError, Result};
use crate::expect::Expectations;
use crate::models::{CaseOutcome, CaseRecord, Detection, RunSummary, SecurityLevel, Technique};
use crate::oracle::oracle_for;
use crate::session::Session;
use crate::verify::{verify, Mismatch};
use std::time::Instant;
use tracing::{error, info, warn};

/// Runs the configured matrix of (technique, level) cases.
///
/// Cases run strictly sequentially: the time-based oracle's differential is
/// only valid when nothing else shares the network during its measurement
/// window, and serial execution satisfies that for the whole suite. Each
/// case establishes its own session end-to-end; sessions are never reused
/// across cases or levels.
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Executes every configured case and returns the collected records
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::new(&self.config.target);

        for technique in &self.config.techniques {
            for level in &self.config.levels {
                info!("running {technique} at {level}");
                let record = self.run_case(*technique, *level).await;
                if !record.outcome.is_pass() {
                    warn!("{technique} at {level}: {}", record.outcome);
                }
                summary.push(record);
            }
        }

        summary.finish();
        summary
    }

    /// Runs a single case: fresh session, probe, verify
    pub async fn run_case(&self, technique: Technique, level: SecurityLevel) -> CaseRecord {
        let start = Instant::now();
        let expected = Expectations::expected(technique, level);

        let (observed, outcome) = match self.probe_case(technique, level).await {
            Ok(detection) => {
                let observed = detection.observed;
                let outcome = match verify(&detection, expected) {
                    Ok(()) => CaseOutcome::Passed,
                    Err(Mismatch::MissedDetection { .. }) => CaseOutcome::MissedDetection,
                    Err(Mismatch::FalsePositive { .. }) => CaseOutcome::FalsePositive,
                };
                (Some(observed), outcome)
            }
            Err(e) => {
                // Auth and transport failures are errored cases, kept
                // distinct from a negative verdict.
                match &e {
                    AletheiaError::AuthenticationFailed(_) => {
                        error!("{technique} at {level}: {e}")
                    }
                    _ => error!("{technique} at {level} aborted: {e}"),
                }
                (None, CaseOutcome::Errored(e.to_string()))
            }
        };

        CaseRecord {
            technique,
            level,
            expected,
            observed,
            outcome,
            elapsed_secs: start.elapsed().as_secs_f64(),
        }
    }

    async fn probe_case(&self, technique: Technique, level: SecurityLevel) -> Result<Detection> {
        let session = Session::establish(&self.config, level).await?;
        let oracle = oracle_for(technique);
        oracle.probe(&session, &self.config).await
    }
}
