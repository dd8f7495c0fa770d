use crate::helpers::{location, query_value, spawn_app, TEST_CODE};
use portal_shared::uac::Funcoes;

fn funcoes(values: &[&str]) -> Funcoes {
    values.iter().copied().collect()
}

#[tokio::test]
async fn sign_in_redirects_to_identity_provider() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_sign_in(None).await;

    // Assert
    assert_eq!(response.status().as_u16(), 303);
    let location = location(&response);
    assert!(
        location.starts_with(&format!("{}/authorize?", app.mock_server.url())),
        "{location}"
    );
    assert_eq!(query_value(&location, "response_type").as_deref(), Some("code"));
    assert!(query_value(&location, "client_id").is_some());
    assert!(query_value(&location, "redirect_uri")
        .unwrap()
        .ends_with("/auth/callback"));
    assert!(!query_value(&location, "state").unwrap().is_empty());
}

#[tokio::test]
async fn each_sign_in_gets_a_new_state() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let first = app.start_sign_in(None).await;
    let second = app.start_sign_in(None).await;

    // Assert
    assert_ne!(first, second);
}

#[tokio::test]
async fn bare_permission_record_is_attached() {
    // Arrange
    let mut app = spawn_app().await;
    let (token_mock, userinfo_mock) = app.mock_identity_provider().await;
    let permissions_mock = app
        .mock_permissions(200, r#"{"is_admin": true, "funcoes": ["A"]}"#)
        .await;

    // Act
    let response = app.sign_in().await;

    // Assert
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), app.landing_path);
    let session = app.get_session().await.expect("should be signed in");
    assert_eq!(session.email.as_deref(), Some(app.test_user.email.as_str()));
    assert_eq!(session.name.as_deref(), Some(app.test_user.name.as_str()));
    assert!(session.is_admin);
    assert_eq!(session.funcoes, funcoes(&["A"]));
    token_mock.assert_async().await;
    userinfo_mock.assert_async().await;
    permissions_mock.assert_async().await;
}

#[tokio::test]
async fn array_wrapped_permission_record_is_unwrapped() {
    // Arrange
    let mut app = spawn_app().await;
    app.mock_identity_provider().await;
    let permissions_mock = app
        .mock_permissions(200, r#"[{"is_admin": true, "funcoes": ["A", "B"]}]"#)
        .await;

    // Act
    app.sign_in().await;

    // Assert
    let session = app.get_session().await.expect("should be signed in");
    assert!(session.is_admin);
    assert_eq!(session.funcoes, funcoes(&["A", "B"]));
    permissions_mock.assert_async().await;
}

#[tokio::test]
async fn permission_webhook_failure_still_signs_in() {
    // Arrange
    let mut app = spawn_app().await;
    app.mock_identity_provider().await;
    let permissions_mock = app
        .mock_permissions(500, r#"{"is_admin": true, "funcoes": ["A"]}"#)
        .await;

    // Act
    let response = app.sign_in().await;

    // Assert - login succeeds, authorization does not
    assert_eq!(location(&response), app.landing_path);
    let session = app.get_session().await.expect("should be signed in");
    assert_eq!(session.email.as_deref(), Some(app.test_user.email.as_str()));
    assert!(!session.is_admin);
    assert!(session.funcoes.is_empty());
    assert_eq!(app.get_whoami().await.status().as_u16(), 200);
    permissions_mock.assert_async().await;
}

#[tokio::test]
async fn malformed_permission_record_gives_no_permissions() {
    for body in ["<html>oops</html>", "[]", r#"{"is_admin": 1, "funcoes": ["A"]}"#] {
        // Arrange
        let mut app = spawn_app().await;
        app.mock_identity_provider().await;
        app.mock_permissions(200, body).await;

        // Act
        app.sign_in().await;

        // Assert
        let session = app.get_session().await.expect("should be signed in");
        assert!(!session.is_admin, "{body}");
        assert!(session.funcoes.is_empty(), "{body}");
    }
}

#[tokio::test]
async fn missing_email_skips_permission_lookup() {
    // Arrange
    let mut app = spawn_app().await;
    app.mock_identity_provider_with_profile(serde_json::json!({ "name": "No Mail" }))
        .await;
    let permissions_mock = app.mock_permissions_not_called().await;

    // Act
    let response = app.sign_in().await;

    // Assert
    assert_eq!(location(&response), app.landing_path);
    let session = app.get_session().await.expect("should be signed in");
    assert_eq!(session.email, None);
    assert_eq!(session.name.as_deref(), Some("No Mail"));
    assert!(!session.is_admin);
    assert!(session.funcoes.is_empty());
    permissions_mock.assert_async().await;
}

#[tokio::test]
async fn redirect_ignores_requested_page() {
    // Arrange
    let mut app = spawn_app().await;
    app.mock_identity_provider().await;
    app.mock_server
        .mock("POST", crate::helpers::PERMISSIONS_PATH)
        .with_body("{}")
        .create_async()
        .await;

    for requested in [
        None,
        Some("/"),
        Some("/notas/fiscais?id=7"),
        Some("https://elsewhere.example.com/"),
    ] {
        // Act
        let response = app.sign_in_requesting(requested).await;

        // Assert
        assert_eq!(response.status().as_u16(), 303, "{requested:?}");
        assert_eq!(location(&response), app.landing_path, "{requested:?}");
    }
}

#[tokio::test]
async fn mismatched_state_creates_no_session() {
    // Arrange
    let mut app = spawn_app().await;
    let token_mock = app
        .mock_server
        .mock("POST", "/token")
        .expect(0)
        .create_async()
        .await;
    let permissions_mock = app.mock_permissions_not_called().await;
    app.start_sign_in(None).await;

    // Act
    let response = app
        .get_callback(&[("code", TEST_CODE), ("state", "forged-state")])
        .await;

    // Assert
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), app.error_location("state_mismatch"));
    assert!(app.get_session().await.is_none());
    token_mock.assert_async().await;
    permissions_mock.assert_async().await;
}

#[tokio::test]
async fn callback_without_sign_in_is_rejected() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .get_callback(&[("code", TEST_CODE), ("state", "anything")])
        .await;

    // Assert
    assert_eq!(location(&response), app.error_location("state_mismatch"));
    assert!(app.get_session().await.is_none());
}

#[tokio::test]
async fn provider_error_is_reported() {
    // Arrange
    let app = spawn_app().await;
    let state = app.start_sign_in(None).await;

    // Act
    let response = app
        .get_callback(&[
            ("error", "access_denied"),
            ("error_description", "user cancelled"),
            ("state", state.as_str()),
        ])
        .await;

    // Assert
    assert_eq!(location(&response), app.error_location("provider_error"));
    assert!(app.get_session().await.is_none());
}

#[tokio::test]
async fn missing_code_is_reported() {
    // Arrange
    let app = spawn_app().await;
    let state = app.start_sign_in(None).await;

    // Act
    let response = app.get_callback(&[("state", state.as_str())]).await;

    // Assert
    assert_eq!(location(&response), app.error_location("missing_code"));
    assert!(app.get_session().await.is_none());
}

#[tokio::test]
async fn rejected_code_exchange_creates_no_session() {
    // Arrange
    let mut app = spawn_app().await;
    app.mock_server
        .mock("POST", "/token")
        .with_status(401)
        .with_body(r#"{"error": "invalid_client"}"#)
        .create_async()
        .await;
    let permissions_mock = app.mock_permissions_not_called().await;

    // Act
    let response = app.sign_in().await;

    // Assert
    assert_eq!(location(&response), app.error_location("token_exchange_failed"));
    assert!(app.get_session().await.is_none());
    permissions_mock.assert_async().await;
}

#[tokio::test]
async fn state_is_single_use() {
    // Arrange
    let mut app = spawn_app().await;
    app.mock_identity_provider().await;
    app.mock_permissions(200, "{}").await;
    let state = app.start_sign_in(None).await;
    let first = app
        .get_callback(&[("code", TEST_CODE), ("state", state.as_str())])
        .await;
    assert_eq!(location(&first), app.landing_path);

    // Act
    let replay = app
        .get_callback(&[("code", TEST_CODE), ("state", state.as_str())])
        .await;

    // Assert
    assert_eq!(location(&replay), app.error_location("state_mismatch"));
}

#[tokio::test]
async fn large_access_token_still_signs_in() {
    // Arrange
    let mut app = spawn_app().await;
    app.test_user.access_token = "x".repeat(2_500);
    app.mock_identity_provider().await;
    app.mock_permissions(200, r#"{"is_admin": true, "funcoes": ["FISCAL", "AGRO", "FINANCEIRO"]}"#)
        .await;

    // Act
    let response = app.sign_in().await;

    // Assert
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), app.landing_path);
    assert!(app.get_session().await.is_some());
}

#[tokio::test]
async fn claims_too_large_for_cookie_are_reported() {
    // Arrange
    let mut app = spawn_app().await;
    app.test_user.access_token = "x".repeat(4_000);
    app.mock_identity_provider().await;
    app.mock_permissions(200, r#"{"is_admin": true, "funcoes": ["FISCAL", "AGRO", "FINANCEIRO"]}"#)
        .await;

    // Act
    let response = app.sign_in().await;

    // Assert
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), app.error_location("session_too_large"));
    assert!(app.get_session().await.is_none());
    assert_eq!(app.get_whoami().await.status().as_u16(), 401);
}
