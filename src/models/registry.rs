use serde::{Deserialize, Serialize};

/// Citizen data handed to the registry for enrollment. The operator identity
/// is attached by the registry client.
#[derive(Debug, Clone, PartialEq)]
pub struct CitizenRegistration {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCitizenRequest {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub email: String,
    pub operator_id: String,
    pub operator_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterCitizenResponse {
    #[serde(default)]
    pub registered: bool,
}
