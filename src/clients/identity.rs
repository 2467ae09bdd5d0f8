use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::Config;

const IDENTITY_TOOLKIT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const IDENTITY_SCOPES: &[&str] = &["https://www.googleapis.com/auth/identitytoolkit"];

/// External service issuing account identities and credential-reset links.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account keyed by email and returns the issued subject id.
    async fn create_account(&self, email: &str) -> Result<String, Error>;
    async fn password_reset_link(&self, email: &str) -> Result<String, Error>;
    async fn delete_account(&self, subject_id: &str) -> Result<(), Error>;
}

pub struct FirebaseIdentityClient {
    http_client: Client,
    project_id: String,
    token_provider: Arc<dyn TokenProvider>,
}

#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(rename = "localId")]
    local_id: String,
}

#[derive(Debug, Deserialize)]
struct OobCodeResponse {
    #[serde(rename = "oobLink")]
    oob_link: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: i64,
    message: String,
}

impl FirebaseIdentityClient {
    pub async fn new(config: &Config) -> Result<Self, Error> {
        let token_provider: Arc<dyn TokenProvider> = match &config.firebase_credentials_path {
            Some(path) => Arc::new(
                CustomServiceAccount::from_file(path)
                    .map_err(|e| anyhow!("Failed to load identity credentials: {}", e))?,
            ),
            None => gcp_auth::provider()
                .await
                .map_err(|e| anyhow!("Failed to resolve identity credentials: {}", e))?,
        };

        info!(project_id = %config.firebase_project_id, "Identity provider client initialized");

        Ok(Self {
            http_client: Client::new(),
            project_id: config.firebase_project_id.clone(),
            token_provider,
        })
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response, Error> {
        let url = format!(
            "{}/projects/{}{}",
            IDENTITY_TOOLKIT_BASE_URL, self.project_id, path
        );

        let token = self.token_provider.token(IDENTITY_SCOPES).await?;

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&body)
            .send()
            .await?;

        Ok(response)
    }
}

/// Maps an identity toolkit error body to an error preserving the
/// provider-reported code and message.
async fn provider_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => anyhow!(
            "identity provider error ({}): {}",
            envelope.error.code,
            envelope.error.message
        ),
        Err(_) => anyhow!(
            "identity provider request failed with status {}: {}",
            status,
            body
        ),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn create_account(&self, email: &str) -> Result<String, Error> {
        let response = self.post("/accounts", json!({ "email": email })).await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let account: SignUpResponse = response.json().await?;

        debug!(email, subject_id = %account.local_id, "Identity account created");

        Ok(account.local_id)
    }

    async fn password_reset_link(&self, email: &str) -> Result<String, Error> {
        let response = self
            .post(
                "/accounts:sendOobCode",
                json!({
                    "requestType": "PASSWORD_RESET",
                    "email": email,
                    "returnOobLink": true,
                }),
            )
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let oob: OobCodeResponse = response.json().await?;

        Ok(oob.oob_link)
    }

    async fn delete_account(&self, subject_id: &str) -> Result<(), Error> {
        let response = self
            .post("/accounts:delete", json!({ "localId": subject_id }))
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        debug!(subject_id, "Identity account deleted");

        Ok(())
    }
}
