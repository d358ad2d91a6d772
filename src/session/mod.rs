//! Authenticated session lifecycle: login, token handling, level switching

pub mod auth;
pub mod security;
pub mod token;

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::SecurityLevel;

/// A ready-to-attack session: authenticated and switched to one security
/// level.
///
/// Owns its HTTP client (and with it the cookie jar), lives for exactly one
/// test case, and is bound to the level it was established for. Probing a
/// different level requires establishing a new session.
pub struct Session {
    client: HttpClient,
    level: SecurityLevel,
}

impl Session {
    /// Authenticates and switches the target to `level`.
    ///
    /// Fails with whatever the authenticator raises; the level switcher is
    /// never invoked on a failed authentication.
    pub async fn establish(config: &HarnessConfig, level: SecurityLevel) -> Result<Self> {
        let client = HttpClient::new(config)?;
        auth::authenticate(&client, config).await?;
        security::set_security_level(&client, config, level).await?;
        Ok(Self { client, level })
    }

    /// The security level this session was prepared for
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}
