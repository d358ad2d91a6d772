//! Verdict verification against the expectation matrix

use crate::models::{Detection, SecurityLevel, Technique};
use std::fmt;

/// Classified disagreement between an oracle verdict and the expectation.
///
/// The two directions are different failures and stay distinct all the way
/// to the surfaced result: a missed detection (expected vulnerable,
/// observed clean) is more severe than a false positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    MissedDetection {
        technique: Technique,
        level: SecurityLevel,
    },
    FalsePositive {
        technique: Technique,
        level: SecurityLevel,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::MissedDetection { technique, level } => write!(
                f,
                "{technique} at {level}: expected vulnerable, vulnerability NOT detected"
            ),
            Mismatch::FalsePositive { technique, level } => write!(
                f,
                "{technique} at {level}: expected not vulnerable, false positive detected"
            ),
        }
    }
}

/// Compares an oracle verdict to the expected one
pub fn verify(detection: &Detection, expected: bool) -> std::result::Result<(), Mismatch> {
    if detection.observed == expected {
        return Ok(());
    }
    if expected {
        Err(Mismatch::MissedDetection {
            technique: detection.technique,
            level: detection.level,
        })
    } else {
        Err(Mismatch::FalsePositive {
            technique: detection.technique,
            level: detection.level,
        })
    }
}
