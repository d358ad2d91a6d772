//! Expectation matrix: which (technique, level) pairs should be vulnerable

use crate::models::{SecurityLevel, Technique};

/// Static, total lookup from (technique, level) to the expected verdict.
///
/// Two distinct policies coexist and are encoded per technique, never as
/// one global rule:
/// - error-based and piggyback injection only get through at low — the
///   target's escaping at medium is enough to block error leakage and
///   stacked statements;
/// - every other technique still succeeds at medium through the numeric
///   context, so it is expected vulnerable at low and medium.
///
/// Totality holds by construction: both match arms cover every level.
pub struct Expectations;

impl Expectations {
    /// Expected verdict for a (technique, level) pair
    pub fn expected(technique: Technique, level: SecurityLevel) -> bool {
        match technique {
            Technique::ErrorBased | Technique::Piggyback => {
                matches!(level, SecurityLevel::Low)
            }
            _ => matches!(level, SecurityLevel::Low | SecurityLevel::Medium),
        }
    }

    /// The full matrix as (technique, level, expected) triples
    pub fn matrix() -> Vec<(Technique, SecurityLevel, bool)> {
        let mut entries = Vec::new();
        for technique in Technique::ALL {
            for level in SecurityLevel::ALL {
                entries.push((technique, level, Self::expected(technique, level)));
            }
        }
        entries
    }
}
