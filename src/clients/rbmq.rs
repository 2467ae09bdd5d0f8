use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties, Consumer,
    options::{
        BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicQosOptions,
        QueueDeclareOptions,
    },
    types::FieldTable,
};
use tracing::{debug, info};

use crate::config::Config;

/// Durable-queue publisher. Implemented by the broker client and by test
/// doubles so pipelines can run without a live broker.
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), Error>;
}

/// Owns the broker connection and the single channel shared by every
/// consumer and publish. No auto-reconnect: a connect failure propagates.
pub struct RabbitMqClient {
    connection: Connection,
    channel: Channel,
}

impl RabbitMqClient {
    pub async fn connect(config: &Config) -> Result<Self, Error> {
        info!(host = %config.rmq_host, port = config.rmq_port, "Connecting to RabbitMQ");

        let connection =
            Connection::connect(&config.rabbitmq_url(), ConnectionProperties::default())
                .await
                .map_err(|e| anyhow!("Failed to connect to RabbitMQ: {}", e))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| anyhow!("RabbitMQ channel creation failed: {}", e))?;

        channel
            .basic_qos(config.prefetch_count, BasicQosOptions::default())
            .await
            .map_err(|e| anyhow!("Failed to set prefetch count: {}", e))?;

        info!(prefetch_count = config.prefetch_count, "RabbitMQ connected");

        Ok(Self {
            connection,
            channel,
        })
    }

    pub async fn create_consumer(&self, queue: &str, consumer_tag: &str) -> Result<Consumer, Error> {
        self.declare_queue(queue).await?;

        let consumer = self
            .channel
            .basic_consume(
                queue,
                consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("Failed to create consumer for queue {}: {}", queue, e))?;

        Ok(consumer)
    }

    pub async fn acknowledge(&self, delivery_tag: u64) -> Result<(), Error> {
        self.channel
            .basic_ack(delivery_tag, BasicAckOptions::default())
            .await
            .map_err(|e| anyhow!("Failed to acknowledge message: {}", e))?;

        Ok(())
    }

    /// Closes the channel first, then the connection; each failure surfaces.
    pub async fn close(&self) -> Result<(), Error> {
        self.channel
            .close(200, "closing")
            .await
            .map_err(|e| anyhow!("Failed to close RabbitMQ channel: {}", e))?;

        self.connection
            .close(200, "closing")
            .await
            .map_err(|e| anyhow!("Failed to close RabbitMQ connection: {}", e))?;

        info!("RabbitMQ connection closed");

        Ok(())
    }

    async fn declare_queue(&self, queue: &str) -> Result<(), Error> {
        self.channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("Failed to declare queue {}: {}", queue, e))?;

        Ok(())
    }
}

#[async_trait]
impl QueuePublisher for RabbitMqClient {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), Error> {
        self.declare_queue(queue).await?;

        self.channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_delivery_mode(2),
            )
            .await
            .map_err(|e| anyhow!("Failed to publish message to {}: {}", queue, e))?;

        debug!(queue, payload_bytes = payload.len(), "Message published");

        Ok(())
    }
}
