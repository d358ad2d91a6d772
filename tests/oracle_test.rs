//! Integration tests for the detection oracles against wiremock stub targets

mod common;

use aletheia::config::HarnessConfig;
use aletheia::models::{Evidence, SecurityLevel, Technique};
use aletheia::oracle::{oracle_for, Oracle};
use aletheia::session::Session;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SQLI_PATH: &str = "/vulnerabilities/sqli/";

async fn ready_session(server: &MockServer, level: SecurityLevel) -> (HarnessConfig, Session) {
    common::mount_session_mocks(server).await;
    let config = common::test_config(&server.uri());
    let session = Session::establish(&config, level)
        .await
        .expect("session should establish");
    (config, session)
}

async fn probe(
    oracle: Arc<dyn Oracle>,
    session: &Session,
    config: &HarnessConfig,
) -> bool {
    oracle
        .probe(session, config)
        .await
        .expect("probe should not error")
        .observed
}

// An unsanitized target renders different pages for forced-true and
// forced-false conditions; the token churn must not pollute the diff.
#[tokio::test]
async fn blind_boolean_observes_unsanitized_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .and(body_string_contains("1%3D1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<pre>First name: admin</pre><input name='user_token' value='t-001' />",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .and(body_string_contains("1%3D2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<pre></pre><input name='user_token' value='t-002' />"),
        )
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Low).await;
    assert!(probe(oracle_for(Technique::BlindBoolean), &session, &config).await);
}

// A parameterized target renders the same page for both conditions; only
// the embedded token differs, and normalization must absorb that.
#[tokio::test]
async fn blind_boolean_ignores_parameterized_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .and(body_string_contains("1%3D1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<pre>ID unknown</pre><input name='user_token' value='t-aaa' />",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .and(body_string_contains("1%3D2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<pre>ID unknown</pre><input name='user_token' value='t-bbb' />",
        ))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Impossible).await;
    assert!(!probe(oracle_for(Technique::BlindBoolean), &session, &config).await);
}

#[tokio::test]
async fn time_based_observes_conditional_delay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .and(body_string_contains("1%3D1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<pre>ok</pre>")
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .and(body_string_contains("1%3D2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<pre>ok</pre>"))
        .mount(&mock_server)
        .await;

    let (mut config, session) = ready_session(&mock_server, SecurityLevel::Low).await;
    config.delay_threshold_secs = 0.3;

    let detection = oracle_for(Technique::TimeBased)
        .probe(&session, &config)
        .await
        .expect("probe should not error");
    assert!(detection.observed);
    match detection.evidence {
        Evidence::Delay {
            true_secs,
            false_secs,
        } => {
            assert!(true_secs > false_secs);
            assert!(true_secs >= 0.6);
        }
        other => panic!("expected delay evidence, got {other:?}"),
    }
}

#[tokio::test]
async fn time_based_ignores_fast_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<pre>ok</pre>"))
        .mount(&mock_server)
        .await;

    let (mut config, session) = ready_session(&mock_server, SecurityLevel::High).await;
    config.delay_threshold_secs = 0.3;
    assert!(!probe(oracle_for(Technique::TimeBased), &session, &config).await);
}

// An unconditional delay slows both requests equally; the differential
// stays below threshold and must not be reported.
#[tokio::test]
async fn time_based_ignores_unconditional_delay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<pre>slow</pre>")
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&mock_server)
        .await;

    let (mut config, session) = ready_session(&mock_server, SecurityLevel::Low).await;
    config.delay_threshold_secs = 0.3;
    assert!(!probe(oracle_for(Technique::TimeBased), &session, &config).await);
}

#[tokio::test]
async fn union_data_requires_all_markers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<pre>First name: admin<br />Surname: password</pre>",
        ))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Low).await;
    assert!(probe(oracle_for(Technique::UnionData), &session, &config).await);
}

#[tokio::test]
async fn union_data_partial_match_is_clean() {
    let mock_server = MockServer::start().await;

    // "admin" appears but the password column never leaks.
    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<pre>First name: admin</pre>"),
        )
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::High).await;
    assert!(!probe(oracle_for(Technique::UnionData), &session, &config).await);
}

#[tokio::test]
async fn union_schema_observes_catalog_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<pre>Surname: guestbook</pre><pre>Surname: users</pre>",
        ))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Medium).await;
    assert!(probe(oracle_for(Technique::UnionSchema), &session, &config).await);
}

#[tokio::test]
async fn piggyback_observes_content_marker() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<pre>First name: admin</pre>"),
        )
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Low).await;
    assert!(probe(oracle_for(Technique::Piggyback), &session, &config).await);
}

#[tokio::test]
async fn piggyback_blocked_statement_is_clean() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<pre>Something went wrong.</pre>"),
        )
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Medium).await;
    assert!(!probe(oracle_for(Technique::Piggyback), &session, &config).await);
}

#[tokio::test]
async fn error_based_observes_leaked_error() {
    let mock_server = MockServer::start().await;

    // The probe travels as a GET query parameter.
    Mock::given(method("GET"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "XPATH syntax error: '~dvwa~'",
        ))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Low).await;
    assert!(probe(oracle_for(Technique::ErrorBased), &session, &config).await);
}

#[tokio::test]
async fn error_based_escaped_target_is_clean() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<pre>ID: 1</pre>"))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Medium).await;
    assert!(!probe(oracle_for(Technique::ErrorBased), &session, &config).await);
}

#[tokio::test]
async fn second_order_observes_resurfaced_fragment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .and(body_string_contains("aletheia2ndorder"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The stored marker comes back on the read path with its quote intact.
    Mock::given(method("GET"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<td>aletheia2ndorder' -- </td>",
        ))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Low).await;
    assert!(probe(oracle_for(Technique::SecondOrder), &session, &config).await);
}

// The disjunction also fires on a sensitive substring alone. This is the
// documented precision limitation of the second-order check.
#[tokio::test]
async fn second_order_observes_sensitive_leak_without_fragment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<td>admin</td>"))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Medium).await;
    assert!(probe(oracle_for(Technique::SecondOrder), &session, &config).await);
}

#[tokio::test]
async fn second_order_sanitized_target_is_clean() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .mount(&mock_server)
        .await;

    // Escaped on write: the raw-quote fragment never resurfaces.
    Mock::given(method("GET"))
        .and(path(SQLI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<td>aletheia2ndorder\\' -- escaped</td><td>guest</td>",
        ))
        .mount(&mock_server)
        .await;

    let (config, session) = ready_session(&mock_server, SecurityLevel::Impossible).await;
    assert!(!probe(oracle_for(Technique::SecondOrder), &session, &config).await);
}
