//! Form-based login against the target

use crate::config::HarnessConfig;
use crate::error::{AletheiaError, Result};
use crate::http::HttpClient;
use crate::session::token::extract_token;
use tracing::{debug, info};

/// Logs into the target with the configured credentials.
///
/// Fetches the login page, extracts a fresh token, and posts the
/// credentials. The login is considered rejected when the response body
/// carries the configured failure marker or the final URL (after
/// redirects) still points at the login page. Rejection is fatal for the
/// test case and never retried. On success the client's cookie jar holds
/// the authenticated identity.
pub(crate) async fn authenticate(client: &HttpClient, config: &HarnessConfig) -> Result<()> {
    let login_url = config.url(&config.login_path);

    let page = client.get(&login_url).await?.text().await?;
    let token = extract_token(&page, &config.token_field);
    if token.is_none() {
        debug!("login page carries no {} field", config.token_field);
    }

    let mut form: Vec<(&str, &str)> = vec![
        ("username", config.username.as_str()),
        ("password", config.password.as_str()),
        ("Login", "Login"),
    ];
    if let Some(ref t) = token {
        form.push((config.token_field.as_str(), t.as_str()));
    }

    let response = client.post_form(&login_url, &form).await?;
    let final_url = response.url().to_string();
    let body = response.text().await?;

    if body.contains(&config.signatures.login_failure) || final_url.contains(&config.login_path) {
        return Err(AletheiaError::AuthenticationFailed(format!(
            "login rejected for user '{}' at {login_url}",
            config.username
        )));
    }

    info!("authenticated to {} as {}", config.target, config.username);
    Ok(())
}
