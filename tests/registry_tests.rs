use anyhow::Result;
use user_lifecycle_worker::{
    clients::registry::{AdapterRegistryClient, CitizenRegistry},
    models::registry::CitizenRegistration,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

const OPERATOR_ID: &str = "681466aaedee130015720b44";
const OPERATOR_NAME: &str = "Operador Marcianos";

fn registry_client(server: &MockServer) -> AdapterRegistryClient {
    AdapterRegistryClient::new(
        server.uri(),
        OPERATOR_ID.to_string(),
        OPERATOR_NAME.to_string(),
    )
}

fn citizen_registration() -> CitizenRegistration {
    CitizenRegistration {
        id: "900123".to_string(),
        name: "Ana Lopez".to_string(),
        address: Some("Calle 10 # 20-30".to_string()),
        email: "a@b.com".to_string(),
    }
}

/// Test: Validation succeeds only on 204 No Content
#[tokio::test]
async fn test_validate_accepts_no_content() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/adapter/validateCitizen/900123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    registry_client(&server).validate("900123").await?;

    Ok(())
}

/// Test: Any non-204 validation status is a hard failure carrying the status
#[tokio::test]
async fn test_validate_rejects_other_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/adapter/validateCitizen/900123"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = registry_client(&server)
        .validate("900123")
        .await
        .expect_err("non-204 statuses must be rejected");

    assert!(error.to_string().contains("404"));
}

/// Test: Registration succeeds on 201 with a confirmed enrollment
#[tokio::test]
async fn test_register_accepts_confirmed_creation() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/adapter/registerCitizen"))
        .and(body_partial_json(serde_json::json!({
            "id": "900123",
            "name": "Ana Lopez",
            "email": "a@b.com",
            "operatorId": OPERATOR_ID,
            "operatorName": OPERATOR_NAME,
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "registered": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    registry_client(&server)
        .register(&citizen_registration())
        .await?;

    Ok(())
}

/// Test: A 201 without the confirmation flag is still a failure
#[tokio::test]
async fn test_register_rejects_unconfirmed_creation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/adapter/registerCitizen"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "registered": false })),
        )
        .mount(&server)
        .await;

    let error = registry_client(&server)
        .register(&citizen_registration())
        .await
        .expect_err("unconfirmed enrollments must be rejected");

    assert!(error.to_string().contains("not confirmed"));
}

/// Test: Non-201 registration statuses are hard failures carrying the status
#[tokio::test]
async fn test_register_rejects_error_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/adapter/registerCitizen"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let error = registry_client(&server)
        .register(&citizen_registration())
        .await
        .expect_err("error statuses must be rejected");

    assert!(error.to_string().contains("500"));
}
