//! Configuration management for the Aletheia harness

use crate::error::{AletheiaError, Result};
use crate::models::{SecurityLevel, Technique};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Substring signature tables used by the content-matching oracles.
///
/// These default to the wording of a stock DVWA/MySQL target but are plain
/// configuration, so the harness can be pointed at targets whose error
/// strings, schema names, or page markup are worded differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Signatures {
    /// Marker present in the login response body when credentials are rejected
    pub login_failure: String,
    /// Column header expected when the stacked-query page still renders rows
    pub piggyback_marker: String,
    /// All must appear in the response for the union data-extraction verdict
    pub union_data: Vec<String>,
    /// All must appear in the response for the union schema-enumeration verdict
    pub union_schema: Vec<String>,
    /// Any may appear in the response for the error-based verdict
    pub sql_errors: Vec<String>,
    /// Sensitive substrings the second-order read path should never surface
    pub second_order_sensitive: Vec<String>,
}

impl Default for Signatures {
    fn default() -> Self {
        Self {
            login_failure: "Login failed".to_string(),
            piggyback_marker: "First name".to_string(),
            union_data: vec!["admin".to_string(), "password".to_string()],
            union_schema: vec!["guestbook".to_string(), "users".to_string()],
            sql_errors: vec![
                "XPATH syntax error".to_string(),
                "You have an error in your SQL syntax".to_string(),
                "Warning: mysql".to_string(),
                "SQLSTATE[".to_string(),
            ],
            second_order_sensitive: vec!["admin".to_string()],
        }
    }
}

/// Complete configuration for a verification run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL of the target application
    pub target: String,
    pub username: String,
    pub password: String,
    /// Login form page, relative to the target base URL
    pub login_path: String,
    /// Security-level configuration page
    pub security_path: String,
    /// Vulnerable query page probed by most oracles
    pub sqli_path: String,
    /// Write path used by the second-order oracle to store its payload
    pub second_order_write_path: String,
    /// Read path the second-order oracle re-checks for the stored payload
    pub second_order_read_path: String,
    /// Name attribute of the per-page anti-CSRF token field
    pub token_field: String,
    pub user_agent: String,
    /// HTTP request timeout; a hung request is a fatal transport error
    pub timeout_secs: u64,
    /// Sleep duration injected by the time-based payloads
    pub delay_secs: u64,
    /// Differential (true minus false elapsed seconds) above which the
    /// time-based oracle reports a vulnerability
    pub delay_threshold_secs: f64,
    /// Security levels to exercise
    pub levels: Vec<SecurityLevel>,
    /// Techniques to exercise
    pub techniques: Vec<Technique>,
    pub signatures: Signatures,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            target: "http://localhost:8080".to_string(),
            username: "admin".to_string(),
            password: "password".to_string(),
            login_path: "/login.php".to_string(),
            security_path: "/security.php".to_string(),
            sqli_path: "/vulnerabilities/sqli/".to_string(),
            second_order_write_path: "/vulnerabilities/sqli/".to_string(),
            second_order_read_path: "/vulnerabilities/sqli/".to_string(),
            token_field: "user_token".to_string(),
            user_agent: "Aletheia/0.1.0".to_string(),
            timeout_secs: 30,
            delay_secs: 5,
            delay_threshold_secs: 4.0,
            levels: SecurityLevel::ALL.to_vec(),
            techniques: Technique::ALL.to_vec(),
            signatures: Signatures::default(),
        }
    }
}

impl HarnessConfig {
    /// Joins a configured path onto the target base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.target.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// File-based configuration structure matching config/default.toml
#[derive(Debug, Deserialize)]
struct FileConfig {
    target: Option<TargetSection>,
    timing: Option<TimingSection>,
    run: Option<RunSection>,
    signatures: Option<SignaturesSection>,
}

#[derive(Debug, Deserialize)]
struct TargetSection {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    login_path: Option<String>,
    security_path: Option<String>,
    sqli_path: Option<String>,
    second_order_write_path: Option<String>,
    second_order_read_path: Option<String>,
    token_field: Option<String>,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TimingSection {
    delay_secs: Option<u64>,
    threshold_secs: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RunSection {
    levels: Option<Vec<String>>,
    techniques: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SignaturesSection {
    login_failure: Option<String>,
    piggyback_marker: Option<String>,
    union_data: Option<Vec<String>>,
    union_schema: Option<Vec<String>>,
    sql_errors: Option<Vec<String>>,
    second_order_sensitive: Option<Vec<String>>,
}

/// Loads configuration from a TOML file and merges with defaults
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    let content = std::fs::read_to_string(path).map_err(AletheiaError::Io)?;
    let file_config: FileConfig = toml::from_str(&content)?;

    let mut config = HarnessConfig::default();

    if let Some(target) = file_config.target {
        if let Some(base_url) = target.base_url {
            config.target = base_url;
        }
        if let Some(username) = target.username {
            config.username = username;
        }
        if let Some(password) = target.password {
            config.password = password;
        }
        if let Some(p) = target.login_path {
            config.login_path = p;
        }
        if let Some(p) = target.security_path {
            config.security_path = p;
        }
        if let Some(p) = target.sqli_path {
            config.sqli_path = p;
        }
        if let Some(p) = target.second_order_write_path {
            config.second_order_write_path = p;
        }
        if let Some(p) = target.second_order_read_path {
            config.second_order_read_path = p;
        }
        if let Some(f) = target.token_field {
            config.token_field = f;
        }
        if let Some(ua) = target.user_agent {
            config.user_agent = ua;
        }
        if let Some(t) = target.timeout_secs {
            config.timeout_secs = t;
        }
    }

    if let Some(timing) = file_config.timing {
        if let Some(d) = timing.delay_secs {
            config.delay_secs = d;
        }
        if let Some(t) = timing.threshold_secs {
            config.delay_threshold_secs = t;
        }
    }

    if let Some(run) = file_config.run {
        if let Some(levels) = run.levels {
            config.levels = parse_all(&levels)?;
        }
        if let Some(techniques) = run.techniques {
            config.techniques = parse_all(&techniques)?;
        }
    }

    if let Some(sig) = file_config.signatures {
        if let Some(s) = sig.login_failure {
            config.signatures.login_failure = s;
        }
        if let Some(s) = sig.piggyback_marker {
            config.signatures.piggyback_marker = s;
        }
        if let Some(s) = sig.union_data {
            config.signatures.union_data = s;
        }
        if let Some(s) = sig.union_schema {
            config.signatures.union_schema = s;
        }
        if let Some(s) = sig.sql_errors {
            config.signatures.sql_errors = s;
        }
        if let Some(s) = sig.second_order_sensitive {
            config.signatures.second_order_sensitive = s;
        }
    }

    Ok(config)
}

fn parse_all<T: FromStr<Err = String>>(values: &[String]) -> Result<Vec<T>> {
    values
        .iter()
        .map(|v| v.parse::<T>().map_err(AletheiaError::Config))
        .collect()
}

/// Merges CLI arguments into an existing HarnessConfig
#[allow(clippy::too_many_arguments)]
pub fn merge_cli_args(
    config: &mut HarnessConfig,
    target: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<u64>,
    delay_threshold: Option<f64>,
    levels: Option<Vec<SecurityLevel>>,
    techniques: Option<Vec<Technique>>,
) {
    if let Some(t) = target {
        config.target = t;
    }
    if let Some(u) = username {
        config.username = u;
    }
    if let Some(p) = password {
        config.password = p;
    }
    if let Some(t) = timeout {
        config.timeout_secs = t;
    }
    if let Some(t) = delay_threshold {
        config.delay_threshold_secs = t;
    }
    if let Some(l) = levels {
        config.levels = l;
    }
    if let Some(t) = techniques {
        config.techniques = t;
    }
}
