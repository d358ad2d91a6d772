//! Common test utilities

use aletheia::config::HarnessConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test HarnessConfig pointing to a wiremock server
pub fn test_config(target: &str) -> HarnessConfig {
    HarnessConfig {
        target: target.to_string(),
        timeout_secs: 5,
        user_agent: "Aletheia-Test/0.1.0".to_string(),
        ..HarnessConfig::default()
    }
}

/// Login page markup carrying a fresh anti-CSRF token
pub fn login_page() -> String {
    r#"<html><body>
        <form action="login.php" method="post">
            <input type="text" name="username" />
            <input type="password" name="password" />
            <input type='hidden' name='user_token' value='login-token-1' />
        </form>
    </body></html>"#
        .to_string()
}

/// Security configuration page markup with its own per-page token
pub fn security_page() -> String {
    r##"<html><body>
        <form action="#" method="POST">
            <select name="security"></select>
            <input type='hidden' name='user_token' value='sec-token-1' />
        </form>
    </body></html>"##
        .to_string()
}

/// Mounts the login flow and security-level pages every session needs:
/// GET/POST /login.php (successful login redirecting to /index.php),
/// GET /index.php, GET/POST /security.php.
pub async fn mount_session_mocks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/login.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login.php"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/index.php"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/index.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Welcome</html>"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/security.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(security_page()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/security.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Security level set"))
        .mount(server)
        .await;
}
