pub mod alerts;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;

pub use config::Config;
pub use error::TransportError;
