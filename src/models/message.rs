use serde::{Deserialize, Serialize};

pub const ACTION_REGISTER_USER: &str = "register-user";
pub const ACTION_TRANSFER_SUCCESS: &str = "transfer_success";

/// Inbound payload on the registration queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub id: String,
    pub email: String,
    pub first_name: String,

    #[serde(default)]
    pub second_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub second_last_name: Option<String>,

    #[serde(default)]
    pub document_type: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub department: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
}

impl RegistrationRequest {
    /// Non-empty name parts joined by single spaces, in fixed order.
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.second_name.as_deref(),
            self.last_name.as_deref(),
            self.second_last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Inbound payload on the delete-user queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionRequest {
    pub id_number: String,
}

/// Inbound payload on the citizen registration queue. Forwarded verbatim to
/// the docs transfer queue when the pipeline completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenRegistrationRequest {
    pub id: String,
    pub citizen_name: String,
    pub citizen_email: String,

    #[serde(default)]
    pub url_documents: Option<String>,

    #[serde(default, rename = "confirmAPI")]
    pub confirm_api: Option<bool>,
}

/// Fire-and-forget event published to the notifications queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub action: String,

    #[serde(
        default,
        rename = "passwordUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub password_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub to_email: String,
}

impl NotificationEvent {
    pub fn register_user(password_url: String, name: String, to_email: String) -> Self {
        Self {
            action: ACTION_REGISTER_USER.to_string(),
            password_url: Some(password_url),
            name: Some(name),
            to_email,
        }
    }

    pub fn transfer_success(to_email: String) -> Self {
        Self {
            action: ACTION_TRANSFER_SUCCESS.to_string(),
            password_url: None,
            name: None,
            to_email,
        }
    }
}
