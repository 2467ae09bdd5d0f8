use std::sync::Arc;

use anyhow::{Error, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use user_lifecycle_worker::{
    api::run_api_server,
    clients::{
        database::PostgresUserStore,
        identity::FirebaseIdentityClient,
        rbmq::{QueuePublisher, RabbitMqClient},
        registry::AdapterRegistryClient,
    },
    config::Config,
    consumers::Worker,
    pipeline::MessageProcessor,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let user_store = Arc::new(PostgresUserStore::connect(&config).await?);
    user_store.ensure_schema().await?;
    info!("Database connection established, schema synchronized");

    let rabbitmq = Arc::new(RabbitMqClient::connect(&config).await?);

    let identity = Arc::new(FirebaseIdentityClient::new(&config).await?);
    let registry = Arc::new(AdapterRegistryClient::new(
        config.adapter_base_url.clone(),
        config.operator_id.clone(),
        config.operator_name.clone(),
    ));

    let processor = Arc::new(MessageProcessor::new(
        identity,
        registry,
        user_store,
        Arc::clone(&rabbitmq) as Arc<dyn QueuePublisher>,
        config.notifications_queue_name.clone(),
        config.docs_forward_queue_name.clone(),
    ));

    let worker = Arc::new(Worker::new(Arc::clone(&rabbitmq), processor));

    let register_worker = Arc::clone(&worker);
    let registration_queue = config.registration_queue_name.clone();
    tokio::spawn(async move {
        if let Err(e) = register_worker.consume_register_user(&registration_queue).await {
            error!(error = %e, "Registration consumer terminated");
        }
    });

    let delete_worker = Arc::clone(&worker);
    let delete_queue = config.delete_user_queue_name.clone();
    tokio::spawn(async move {
        if let Err(e) = delete_worker.consume_delete_user(&delete_queue).await {
            error!(error = %e, "Delete user consumer terminated");
        }
    });

    info!("Consumers started");

    run_api_server(config).await
}
