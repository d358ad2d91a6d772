//! Security-level switching for an authenticated session

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::SecurityLevel;
use crate::session::token::extract_token;
use tracing::info;

/// Sets the target's security posture for the current session.
///
/// Tokens are per-page, so a fresh one is extracted from the security page
/// rather than reusing the login token. The applied level is deliberately
/// not read back: the target exposes no cheap way to confirm it, and the
/// oracle's own pass/fail outcome is the end-to-end signal.
pub(crate) async fn set_security_level(
    client: &HttpClient,
    config: &HarnessConfig,
    level: SecurityLevel,
) -> Result<()> {
    let security_url = config.url(&config.security_path);

    let page = client.get(&security_url).await?.text().await?;
    let token = extract_token(&page, &config.token_field);

    let mut form: Vec<(&str, &str)> = vec![
        ("security", level.as_str()),
        ("seclev_submit", "Submit"),
    ];
    if let Some(ref t) = token {
        form.push((config.token_field.as_str(), t.as_str()));
    }

    client.post_form(&security_url, &form).await?;
    info!("security level set to {level}");
    Ok(())
}
