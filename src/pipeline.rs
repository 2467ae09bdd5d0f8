use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use tracing::{error, info};

use crate::{
    clients::{
        database::UserStore, identity::IdentityProvider, rbmq::QueuePublisher,
        registry::CitizenRegistry,
    },
    models::{
        message::{
            CitizenRegistrationRequest, DeletionRequest, NotificationEvent, RegistrationRequest,
        },
        registry::CitizenRegistration,
        user::UserRecord,
    },
};

/// Document type recorded for citizen registrations, which carry none in the
/// payload.
const DEFAULT_DOCUMENT_TYPE: &str = "CC";

/// Runs one strictly sequential pipeline per message against the injected
/// collaborators. Every method is a failure boundary: the first failing step
/// aborts the pipeline, already-completed steps are not rolled back, and the
/// caller acknowledges the message whatever the outcome.
pub struct MessageProcessor {
    identity: Arc<dyn IdentityProvider>,
    registry: Arc<dyn CitizenRegistry>,
    user_store: Arc<dyn UserStore>,
    publisher: Arc<dyn QueuePublisher>,
    notifications_queue: String,
    docs_forward_queue: String,
}

impl MessageProcessor {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        registry: Arc<dyn CitizenRegistry>,
        user_store: Arc<dyn UserStore>,
        publisher: Arc<dyn QueuePublisher>,
        notifications_queue: String,
        docs_forward_queue: String,
    ) -> Self {
        Self {
            identity,
            registry,
            user_store,
            publisher,
            notifications_queue,
            docs_forward_queue,
        }
    }

    pub async fn process_registration(&self, payload: &[u8]) -> Result<(), Error> {
        let request: RegistrationRequest = serde_json::from_slice(payload)?;
        let full_name = request.full_name();

        info!(email = %request.email, full_name = %full_name, "Received registration message");

        let subject_id = self.identity.create_account(&request.email).await?;
        info!(email = %request.email, subject_id = %subject_id, "Identity account created");

        let password_url = self.request_password_reset_link(&request.email).await;

        self.registry.validate(&request.id).await?;

        let record = UserRecord {
            id: subject_id,
            document_type: request.document_type.clone(),
            document_number: request.id.clone(),
            name: full_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            country: request.country.clone(),
            department: request.department.clone(),
            city: request.city.clone(),
            address: request.address.clone(),
        };
        self.user_store.insert(&record).await?;
        info!(user_id = %record.id, "User persisted");

        self.registry
            .register(&CitizenRegistration {
                id: request.id.clone(),
                name: full_name.clone(),
                address: request.address.clone(),
                email: request.email.clone(),
            })
            .await?;

        self.publish_notification(NotificationEvent::register_user(
            password_url,
            full_name,
            request.email,
        ))
        .await
    }

    pub async fn process_deletion(&self, payload: &[u8]) -> Result<(), Error> {
        let request: DeletionRequest = serde_json::from_slice(payload)?;

        info!(id_number = %request.id_number, "Received message to delete user");

        let record = self
            .user_store
            .find_by_document(&request.id_number)
            .await?
            .ok_or_else(|| anyhow!("user not found for document number {}", request.id_number))?;

        self.identity.delete_account(&record.id).await?;
        info!(subject_id = %record.id, "Identity account deleted");

        self.user_store.delete_by_document(&request.id_number).await?;
        info!(id_number = %request.id_number, "User deleted from store");

        self.publish_notification(NotificationEvent::transfer_success(record.email))
            .await
    }

    pub async fn process_citizen_registration(&self, payload: &[u8]) -> Result<(), Error> {
        let request: CitizenRegistrationRequest = serde_json::from_slice(payload)?;

        info!(
            document_number = %request.id,
            citizen_name = %request.citizen_name,
            citizen_email = %request.citizen_email,
            "Received citizen registration message"
        );

        let subject_id = self.identity.create_account(&request.citizen_email).await?;
        info!(email = %request.citizen_email, subject_id = %subject_id, "Identity account created");

        let password_url = self.request_password_reset_link(&request.citizen_email).await;

        self.registry.validate(&request.id).await?;

        let record = UserRecord {
            id: subject_id,
            document_type: Some(DEFAULT_DOCUMENT_TYPE.to_string()),
            document_number: request.id.clone(),
            name: request.citizen_name.clone(),
            email: request.citizen_email.clone(),
            phone: None,
            country: None,
            department: None,
            city: None,
            address: None,
        };
        self.user_store.insert(&record).await?;
        info!(user_id = %record.id, "User persisted");

        self.registry
            .register(&CitizenRegistration {
                id: request.id.clone(),
                name: request.citizen_name.clone(),
                address: None,
                email: request.citizen_email.clone(),
            })
            .await?;

        self.publish_notification(NotificationEvent::register_user(
            password_url,
            request.citizen_name.clone(),
            request.citizen_email.clone(),
        ))
        .await?;

        // The docs transfer flow expects the inbound payload untouched.
        self.publisher
            .publish(&self.docs_forward_queue, payload)
            .await?;
        info!(queue = %self.docs_forward_queue, "Payload forwarded");

        Ok(())
    }

    /// Best-effort: a failure here is logged and absorbed, and the pipeline
    /// continues with an empty link.
    async fn request_password_reset_link(&self, email: &str) -> String {
        match self.identity.password_reset_link(email).await {
            Ok(url) => {
                info!(email, "Password reset link generated");
                url
            }
            Err(e) => {
                error!(email, error = %e, "Failed to generate password reset link");
                String::new()
            }
        }
    }

    async fn publish_notification(&self, event: NotificationEvent) -> Result<(), Error> {
        let payload = serde_json::to_vec(&event)?;

        self.publisher
            .publish(&self.notifications_queue, &payload)
            .await?;

        info!(action = %event.action, to_email = %event.to_email, "Notification published");

        Ok(())
    }
}
