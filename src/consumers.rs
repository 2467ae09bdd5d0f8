use std::sync::Arc;

use anyhow::{Error, Result};
use futures_util::StreamExt;
use tracing::{error, info};

use crate::{clients::rbmq::RabbitMqClient, pipeline::MessageProcessor};

#[derive(Debug, Clone, Copy)]
enum Pipeline {
    RegisterUser,
    DeleteUser,
    RegisterCitizen,
}

impl Pipeline {
    fn consumer_tag(self) -> &'static str {
        match self {
            Pipeline::RegisterUser => "register_user_worker",
            Pipeline::DeleteUser => "delete_user_worker",
            Pipeline::RegisterCitizen => "register_citizen_worker",
        }
    }
}

/// Per-queue consumer loops. Each delivery is processed on its own task so
/// messages run concurrently up to the channel prefetch bound, and each
/// delivery is acknowledged exactly once, on success and failure alike, so a
/// poison message can never stall the queue.
pub struct Worker {
    rabbitmq: Arc<RabbitMqClient>,
    processor: Arc<MessageProcessor>,
}

impl Worker {
    pub fn new(rabbitmq: Arc<RabbitMqClient>, processor: Arc<MessageProcessor>) -> Self {
        Self {
            rabbitmq,
            processor,
        }
    }

    pub async fn consume_register_user(&self, queue: &str) -> Result<(), Error> {
        self.run(queue, Pipeline::RegisterUser).await
    }

    pub async fn consume_delete_user(&self, queue: &str) -> Result<(), Error> {
        self.run(queue, Pipeline::DeleteUser).await
    }

    /// Not started by the default entry point.
    pub async fn consume_register_citizen(&self, queue: &str) -> Result<(), Error> {
        self.run(queue, Pipeline::RegisterCitizen).await
    }

    async fn run(&self, queue: &str, pipeline: Pipeline) -> Result<(), Error> {
        let mut consumer = self
            .rabbitmq
            .create_consumer(queue, pipeline.consumer_tag())
            .await?;

        info!(queue, "Consumer started");

        while let Some(delivery_result) = consumer.next().await {
            match delivery_result {
                Ok(delivery) => {
                    let rabbitmq = Arc::clone(&self.rabbitmq);
                    let processor = Arc::clone(&self.processor);
                    let queue = queue.to_string();
                    let delivery_tag = delivery.delivery_tag;

                    tokio::spawn(async move {
                        let outcome = match pipeline {
                            Pipeline::RegisterUser => {
                                processor.process_registration(&delivery.data).await
                            }
                            Pipeline::DeleteUser => {
                                processor.process_deletion(&delivery.data).await
                            }
                            Pipeline::RegisterCitizen => {
                                processor.process_citizen_registration(&delivery.data).await
                            }
                        };

                        if let Err(e) = outcome {
                            error!(queue = %queue, error = %e, "Message processing failed");
                        }

                        // Acknowledged on every outcome; redelivery is never
                        // requested.
                        if let Err(e) = rabbitmq.acknowledge(delivery_tag).await {
                            error!(queue = %queue, error = %e, "Failed to acknowledge message");
                        }
                    });
                }
                Err(e) => {
                    error!(queue, error = %e, "Consumer delivery error");
                }
            }
        }

        Ok(())
    }
}
