use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_rmq_user")]
    pub rmq_user: String,

    #[serde(default = "default_rmq_pass")]
    pub rmq_pass: String,

    #[serde(default = "default_rmq_host")]
    pub rmq_host: String,

    #[serde(default = "default_rmq_port")]
    pub rmq_port: u16,

    #[serde(default = "default_prefetch_count")]
    pub prefetch_count: u16,

    #[serde(default = "default_registration_queue")]
    pub registration_queue_name: String,

    #[serde(default = "default_delete_user_queue")]
    pub delete_user_queue_name: String,

    #[serde(default = "default_citizen_queue")]
    pub citizen_queue_name: String,

    #[serde(default = "default_notifications_queue")]
    pub notifications_queue_name: String,

    #[serde(default = "default_docs_forward_queue")]
    pub docs_forward_queue_name: String,

    pub db_host: String,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,

    pub firebase_project_id: String,

    #[serde(default)]
    pub firebase_credentials_path: Option<String>,

    #[serde(default = "default_adapter_base_url")]
    pub adapter_base_url: String,

    #[serde(default = "default_operator_id")]
    pub operator_id: String,

    #[serde(default = "default_operator_name")]
    pub operator_name: String,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        // Local .env files are only loaded in development.
        if std::env::var("APP_ENV").is_ok_and(|env| env == "development") {
            dotenv().ok();
        }

        let config = envy::from_env::<Self>()
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;

        Ok(config)
    }

    pub fn rabbitmq_url(&self) -> String {
        format!(
            "amqp://{}:{}@{}:{}",
            self.rmq_user, self.rmq_pass, self.rmq_host, self.rmq_port
        )
    }
}

fn default_rmq_user() -> String {
    "user".to_string()
}

fn default_rmq_pass() -> String {
    "password".to_string()
}

fn default_rmq_host() -> String {
    "localhost".to_string()
}

fn default_rmq_port() -> u16 {
    5672
}

fn default_prefetch_count() -> u16 {
    10
}

fn default_registration_queue() -> String {
    "registration-queue".to_string()
}

fn default_delete_user_queue() -> String {
    "delete_data_transferred_user_queue".to_string()
}

fn default_citizen_queue() -> String {
    "registration_citizen_queue".to_string()
}

fn default_notifications_queue() -> String {
    "notifications".to_string()
}

fn default_docs_forward_queue() -> String {
    "receive_data_transferred_docs_queue".to_string()
}

fn default_adapter_base_url() -> String {
    "http://mrpotato-adapter-service.mrpotato-adapter.svc.cluster.local".to_string()
}

fn default_operator_id() -> String {
    "681466aaedee130015720b44".to_string()
}

fn default_operator_name() -> String {
    "Operador Marcianos".to_string()
}

fn default_server_port() -> u16 {
    8080
}
