//! Sample SparkPost client: store a template, then send a transmission that uses it.
//!
//! The library follows a layered design: a domain layer of strong types, a transport
//! layer for the JSON wire format, and a small client layer issuing authenticated
//! requests. The [`sample`] module strings the two demo calls together.
//!
//! ```rust,no_run
//! use sparkpost_sample::config::Config;
//! use sparkpost_sample::sample;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sample::SampleError> {
//!     let config = Config::from_env()?;
//!     let client = sample::client_for(&config)?;
//!     let template = sample::build_template(&config.sender)?;
//!     let created = client
//!         .create_template(&template)
//!         .await
//!         .map_err(sample::SampleError::Template)?;
//!     println!("template id: {}", created.id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod logging;
pub mod sample;
mod transport;

pub use client::{Response, SparkPostClient, SparkPostClientBuilder, SparkPostError};
pub use config::{Config, ConfigError};
pub use domain::{
    Address, ApiKey, CampaignId, EmailAddress, Recipient, ServerTimestamp, StoredTemplate,
    Template, TemplateContent, TemplateCreated, TemplateId, TemplateName, Transmission,
    TransmissionCreated, TransmissionId, ValidationError,
};
