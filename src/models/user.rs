use serde::{Deserialize, Serialize};

/// Persisted user row. `id` is always the subject id issued by the identity
/// provider, never a client-supplied value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub document_type: Option<String>,
    pub document_number: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub department: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}
