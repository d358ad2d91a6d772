//! Anti-CSRF token extraction and response normalization

use regex::Regex;

/// Placeholder substituted for the live token value during normalization
pub const TOKEN_PLACEHOLDER: &str = "NORMALIZED_TOKEN";

fn token_regex(field: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"name='{}' value='([^']*)'",
        regex::escape(field)
    ))
    .ok()
}

/// Extracts the anti-CSRF token embedded in an HTML page body.
///
/// First match wins; the target's markup is stable enough that a pattern
/// search is sufficient and a full HTML parse is not warranted. No
/// assumption is made about token length or character set. Returns `None`
/// when the page carries no token field — callers then omit the token from
/// the subsequent request rather than treating it as an error.
pub fn extract_token(html: &str, field: &str) -> Option<String> {
    let re = token_regex(field)?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Replaces the per-request token value with a fixed placeholder, leaving
/// all other content untouched.
///
/// The boolean-blind oracle compares two full response bodies for equality;
/// without this every pair of responses differs trivially because each page
/// embeds a fresh token, turning every comparison into a false positive.
/// Idempotent: normalizing an already-normalized body is a no-op.
pub fn normalize(html: &str, field: &str) -> String {
    match token_regex(field) {
        Some(re) => re
            .replace_all(html, format!("name='{field}' value='{TOKEN_PLACEHOLDER}'"))
            .into_owned(),
        None => html.to_string(),
    }
}
