use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::models::registry::{
    CitizenRegistration, RegisterCitizenRequest, RegisterCitizenResponse,
};

/// External HTTP service validating and registering a person against an
/// authoritative identity record.
#[async_trait]
pub trait CitizenRegistry: Send + Sync {
    /// Succeeds only when the registry answers 204 No Content.
    async fn validate(&self, document_number: &str) -> Result<(), Error>;
    /// Succeeds only when the registry answers 201 Created and confirms the
    /// enrollment in the response body.
    async fn register(&self, registration: &CitizenRegistration) -> Result<(), Error>;
}

pub struct AdapterRegistryClient {
    http_client: Client,
    base_url: String,
    operator_id: String,
    operator_name: String,
}

impl AdapterRegistryClient {
    pub fn new(base_url: String, operator_id: String, operator_name: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
            operator_id,
            operator_name,
        }
    }
}

#[async_trait]
impl CitizenRegistry for AdapterRegistryClient {
    async fn validate(&self, document_number: &str) -> Result<(), Error> {
        let url = format!(
            "{}/v1/adapter/validateCitizen/{}",
            self.base_url, document_number
        );

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        info!(document_number, %status, "Response from citizen validation");

        if status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(anyhow!("citizen validation rejected with status {}", status))
        }
    }

    async fn register(&self, registration: &CitizenRegistration) -> Result<(), Error> {
        let url = format!("{}/v1/adapter/registerCitizen", self.base_url);

        let body = RegisterCitizenRequest {
            id: registration.id.clone(),
            name: registration.name.clone(),
            address: registration.address.clone(),
            email: registration.email.clone(),
            operator_id: self.operator_id.clone(),
            operator_name: self.operator_name.clone(),
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();

        info!(document_number = %registration.id, %status, "Response from citizen registration");

        if status != StatusCode::CREATED {
            return Err(anyhow!(
                "citizen registration failed with status {}",
                status
            ));
        }

        let confirmation: RegisterCitizenResponse = response.json().await?;

        if !confirmation.registered {
            return Err(anyhow!("citizen registration not confirmed by registry"));
        }

        Ok(())
    }
}
