//! Core data models for the Aletheia harness

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Security posture configured on the target, graded low → impossible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
    Impossible,
}

impl SecurityLevel {
    /// Every level in ascending order of strictness
    pub const ALL: [SecurityLevel; 4] = [
        SecurityLevel::Low,
        SecurityLevel::Medium,
        SecurityLevel::High,
        SecurityLevel::Impossible,
    ];

    /// Wire form, also the value posted to the security configuration form
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Low => "low",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
            SecurityLevel::Impossible => "impossible",
        }
    }

    /// Injection syntax context for this level.
    ///
    /// The medium level submits the id through a numeric, unquoted query
    /// position; every other level splices it into a quoted string. This is
    /// a fixed property of the target, not something inferred at runtime.
    pub fn quote_context(&self) -> QuoteContext {
        match self {
            SecurityLevel::Medium => QuoteContext::Numeric,
            _ => QuoteContext::Quoted,
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(SecurityLevel::Low),
            "medium" => Ok(SecurityLevel::Medium),
            "high" => Ok(SecurityLevel::High),
            "impossible" => Ok(SecurityLevel::Impossible),
            other => Err(format!("unknown security level: '{other}'")),
        }
    }
}

/// Quoting context the injected payload must break out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteContext {
    /// Payload lands in a numeric position, no quote escape needed
    Numeric,
    /// Payload lands inside a quoted string, needs a quote + comment terminator
    Quoted,
}

/// SQL injection technique exercised by one oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technique {
    BlindBoolean,
    Piggyback,
    TimeBased,
    UnionData,
    UnionSchema,
    ErrorBased,
    SecondOrder,
}

impl Technique {
    /// Every technique, in suite order
    pub const ALL: [Technique; 7] = [
        Technique::BlindBoolean,
        Technique::Piggyback,
        Technique::TimeBased,
        Technique::UnionData,
        Technique::UnionSchema,
        Technique::ErrorBased,
        Technique::SecondOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Technique::BlindBoolean => "blind-boolean",
            Technique::Piggyback => "piggyback",
            Technique::TimeBased => "time-based",
            Technique::UnionData => "union-data",
            Technique::UnionSchema => "union-schema",
            Technique::ErrorBased => "error-based",
            Technique::SecondOrder => "second-order",
        }
    }

    /// One-line description for the module listing
    pub fn description(&self) -> &'static str {
        match self {
            Technique::BlindBoolean => {
                "Infers a true/false condition from whether two responses differ"
            }
            Technique::Piggyback => "Appends a stacked statement after the injected query",
            Technique::TimeBased => "Measures the differential of conditional delay payloads",
            Technique::UnionData => "Extracts sensitive columns through a UNION clause",
            Technique::UnionSchema => "Enumerates schema objects through the metadata catalog",
            Technique::ErrorBased => "Forces a database error that leaks internal state",
            Technique::SecondOrder => "Stores a payload on a write path and re-reads it later",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Technique {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blind-boolean" => Ok(Technique::BlindBoolean),
            "piggyback" => Ok(Technique::Piggyback),
            "time-based" => Ok(Technique::TimeBased),
            "union-data" => Ok(Technique::UnionData),
            "union-schema" => Ok(Technique::UnionSchema),
            "error-based" => Ok(Technique::ErrorBased),
            "second-order" => Ok(Technique::SecondOrder),
            other => Err(format!("unknown technique: '{other}'")),
        }
    }
}

/// Diagnostic evidence attached to a detection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    /// No diagnostic beyond the verdict itself
    None,
    /// Whether the normalized true/false response bodies differed
    ResponseDiff { differed: bool },
    /// Elapsed times of the true-condition and false-condition requests
    Delay { true_secs: f64, false_secs: f64 },
    /// Signature substring found in the response body
    Matched { needle: String },
}

/// Verdict of a single oracle invocation
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub technique: Technique,
    pub level: SecurityLevel,
    /// True when the oracle observed the vulnerability
    pub observed: bool,
    pub evidence: Evidence,
}

/// Classified outcome of one verified (technique, level) case.
///
/// The missed-detection / false-positive distinction is preserved all the
/// way to the report; an errored case never counts as a clean verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    /// Expected vulnerable, observed clean — the more severe failure
    MissedDetection,
    /// Expected clean, observed vulnerable
    FalsePositive,
    /// Auth or transport failure before a verdict could be reached
    Errored(String),
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseOutcome::Passed => write!(f, "passed"),
            CaseOutcome::MissedDetection => write!(f, "missed detection"),
            CaseOutcome::FalsePositive => write!(f, "false positive"),
            CaseOutcome::Errored(e) => write!(f, "errored: {e}"),
        }
    }
}

/// Structured record emitted for one test case, consumed by the reporting layer
#[derive(Debug, Clone, Serialize)]
pub struct CaseRecord {
    pub technique: Technique,
    pub level: SecurityLevel,
    /// Whether the expectation matrix says this pair should be vulnerable
    pub expected: bool,
    /// Oracle verdict, absent when the case errored before a verdict
    pub observed: Option<bool>,
    pub outcome: CaseOutcome,
    pub elapsed_secs: f64,
}

impl CaseRecord {
    pub fn expected_label(&self) -> &'static str {
        if self.expected {
            "vulnerable"
        } else {
            "not vulnerable"
        }
    }

    pub fn observed_label(&self) -> &'static str {
        match self.observed {
            Some(true) => "vulnerable",
            Some(false) => "not vulnerable",
            None => "no verdict",
        }
    }
}

/// Result collector for a complete run.
///
/// Owned by the harness and handed to the reporting layer; case outcomes
/// are never accumulated in process-wide state.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub target: String,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub records: Vec<CaseRecord>,
}

impl RunSummary {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            started_at: Local::now(),
            finished_at: None,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: CaseRecord) {
        self.records.push(record);
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    CaseOutcome::MissedDetection | CaseOutcome::FalsePositive
                )
            })
            .count()
    }

    pub fn errored(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, CaseOutcome::Errored(_)))
            .count()
    }

    pub fn all_passed(&self) -> bool {
        self.records.iter().all(|r| r.outcome.is_pass())
    }
}
