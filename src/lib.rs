pub mod api;
pub mod clients;
pub mod config;
pub mod consumers;
pub mod models;
pub mod pipeline;
