use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/health_check").await;

    // Assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn version_reports_package_version() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/version").await;

    // Assert
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "test-version");
}

#[tokio::test]
async fn unknown_route_not_found() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/does/not/exist").await;

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}
