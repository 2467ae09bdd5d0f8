use user_lifecycle_worker::models::message::{
    ACTION_REGISTER_USER, ACTION_TRANSFER_SUCCESS, CitizenRegistrationRequest, DeletionRequest,
    NotificationEvent, RegistrationRequest,
};

fn registration_request(payload: &str) -> RegistrationRequest {
    serde_json::from_str(payload).expect("valid registration payload")
}

/// Test: Full name joins the four name parts in fixed order
#[test]
fn test_full_name_joins_parts_in_fixed_order() {
    let request = registration_request(
        r#"{
            "id": "123",
            "email": "a@b.com",
            "firstName": "Ana",
            "secondName": "Maria",
            "lastName": "Lopez",
            "secondLastName": "Diaz"
        }"#,
    );

    assert_eq!(request.full_name(), "Ana Maria Lopez Diaz");
}

/// Test: Missing and empty name parts are excluded from the full name
#[test]
fn test_full_name_skips_missing_and_empty_parts() {
    let request = registration_request(
        r#"{
            "id": "123",
            "email": "a@b.com",
            "firstName": "Ana",
            "secondName": "",
            "lastName": "Lopez"
        }"#,
    );

    assert_eq!(request.full_name(), "Ana Lopez");
}

/// Test: Full name computation is idempotent
#[test]
fn test_full_name_is_idempotent() {
    let request = registration_request(
        r#"{"id": "123", "email": "a@b.com", "firstName": "Ana", "lastName": "Lopez"}"#,
    );

    assert_eq!(request.full_name(), request.full_name());
}

/// Test: Registration payloads decode their camelCase wire keys
#[test]
fn test_registration_request_decodes_optional_fields() {
    let request = registration_request(
        r#"{
            "id": "900123",
            "email": "ana@example.com",
            "firstName": "Ana",
            "lastName": "Lopez",
            "documentType": "CC",
            "phone": "3001234567",
            "country": "CO",
            "department": "Antioquia",
            "city": "Medellin",
            "address": "Calle 10 # 20-30"
        }"#,
    );

    assert_eq!(request.id, "900123");
    assert_eq!(request.document_type.as_deref(), Some("CC"));
    assert_eq!(request.city.as_deref(), Some("Medellin"));
    assert_eq!(request.second_name, None);
}

/// Test: Deletion payloads decode the idNumber key
#[test]
fn test_deletion_request_decodes_id_number() {
    let request: DeletionRequest =
        serde_json::from_str(r#"{"idNumber": "900123"}"#).expect("valid deletion payload");

    assert_eq!(request.id_number, "900123");
}

/// Test: Citizen registration payloads decode the confirmAPI key as-is
#[test]
fn test_citizen_registration_request_decodes_confirm_api() {
    let request: CitizenRegistrationRequest = serde_json::from_str(
        r#"{
            "id": "55",
            "citizenName": "Luz Marina",
            "citizenEmail": "luz@example.com",
            "urlDocuments": "https://docs.example.com/55",
            "confirmAPI": true
        }"#,
    )
    .expect("valid citizen payload");

    assert_eq!(request.citizen_name, "Luz Marina");
    assert_eq!(request.url_documents.as_deref(), Some("https://docs.example.com/55"));
    assert_eq!(request.confirm_api, Some(true));
}

/// Test: Register-user notifications serialize the passwordUrl wire key
#[test]
fn test_register_user_notification_wire_format() {
    let event = NotificationEvent::register_user(
        "https://reset.example/abc".to_string(),
        "Ana Lopez".to_string(),
        "a@b.com".to_string(),
    );

    let value = serde_json::to_value(&event).expect("serializable event");

    assert_eq!(value["action"], ACTION_REGISTER_USER);
    assert_eq!(value["passwordUrl"], "https://reset.example/abc");
    assert_eq!(value["name"], "Ana Lopez");
    assert_eq!(value["to_email"], "a@b.com");
}

/// Test: Transfer-success notifications omit the absent optional fields
#[test]
fn test_transfer_success_notification_wire_format() {
    let event = NotificationEvent::transfer_success("a@b.com".to_string());

    let value = serde_json::to_value(&event).expect("serializable event");
    let object = value.as_object().expect("object payload");

    assert_eq!(value["action"], ACTION_TRANSFER_SUCCESS);
    assert_eq!(value["to_email"], "a@b.com");
    assert!(!object.contains_key("passwordUrl"));
    assert!(!object.contains_key("name"));
}
