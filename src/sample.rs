//! The sample flow: store a template, then send a transmission that uses its draft.
//!
//! Each step is all-or-nothing. The template created by the first step is left on the
//! server even when the transmission fails.

use std::io::{self, Write};

use crate::client::{SparkPostClient, SparkPostError};
use crate::config::{Config, ConfigError};
use crate::domain::{
    Address, CampaignId, EmailAddress, Recipient, StoredTemplate, Template, TemplateContent,
    TemplateId, TemplateName, Transmission, TransmissionCreated, ValidationError,
};

pub const BANNER: &str = "*** SparkPost API Sample application ***";
pub const TEMPLATE_NAME: &str = "_TMP_TEMPLATE_TEST";
pub const TEMPLATE_FROM_NAME: &str = "Testing";
pub const TEMPLATE_SUBJECT: &str = "Template Test";
pub const TEMPLATE_HTML: &str = "Hello!";
pub const CAMPAIGN_ID: &str = "sample_app_trans_test";

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("template step failed: {0}")]
    Template(#[source] SparkPostError),

    #[error("transmission step failed: {0}")]
    Transmission(#[source] SparkPostError),

    #[error("could not build request: {0}")]
    Validation(#[from] ValidationError),

    #[error("could not set up client: {0}")]
    Client(#[source] SparkPostError),

    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
}

/// Build the client the sample talks through.
pub fn client_for(config: &Config) -> Result<SparkPostClient, SampleError> {
    SparkPostClient::builder(config.api_key.clone())
        .endpoint(config.base_url.clone())
        .timeout(config.timeout)
        .log_level(config.log_level)
        .build()
        .map_err(SampleError::Client)
}

pub fn build_template(sender: &EmailAddress) -> Result<Template, ValidationError> {
    let from = Address::new(sender.clone()).with_name(TEMPLATE_FROM_NAME);
    let content = TemplateContent::new(
        from,
        TEMPLATE_SUBJECT,
        Some(TEMPLATE_HTML.to_owned()),
        None,
    )?;
    Ok(Template::new(TemplateName::new(TEMPLATE_NAME)?, content))
}

/// A fresh template is unpublished, so the transmission has to use its draft.
pub fn build_transmission(
    sender: &EmailAddress,
    template_id: &TemplateId,
) -> Result<Transmission, ValidationError> {
    let recipient = Recipient::new(Address::new(sender.clone())).with_return_path(sender.clone());
    let transmission =
        Transmission::new(vec![recipient], StoredTemplate::draft(template_id.clone()))?
            .with_campaign_id(CampaignId::new(CAMPAIGN_ID)?)
            .with_return_path(sender.clone());
    Ok(transmission)
}

pub async fn create_template(
    client: &SparkPostClient,
    config: &Config,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<TemplateId, SampleError> {
    let template = build_template(&config.sender)?;
    match client.create_template(&template).await {
        Ok(created) => {
            writeln!(
                out,
                "Server says template was created with ID: {}",
                created.id
            )?;
            Ok(created.id)
        }
        Err(err) => {
            writeln!(diag, "Could not create template.")?;
            tracing::debug!(error = ?err, "template create failed");
            Err(SampleError::Template(err))
        }
    }
}

pub async fn create_transmission(
    client: &SparkPostClient,
    config: &Config,
    template_id: &TemplateId,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<TransmissionCreated, SampleError> {
    let transmission = build_transmission(&config.sender, template_id)?;
    match client.create_transmission(&transmission).await {
        Ok(created) => {
            writeln!(
                out,
                "Server says transmission was created with ID: {}",
                created.id
            )?;
            writeln!(
                out,
                "Total rejected recipients: {}",
                created.total_rejected_recipients
            )?;
            writeln!(
                out,
                "Total accepted recipients: {}",
                created.total_accepted_recipients
            )?;
            Ok(created)
        }
        Err(err) => {
            writeln!(diag, "Could not create transmission.")?;
            tracing::debug!(error = ?err, "transmission create failed");
            Err(SampleError::Transmission(err))
        }
    }
}

/// Run both steps in order; the transmission is only sent once a template id is known.
pub async fn run(
    client: &SparkPostClient,
    config: &Config,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<TransmissionCreated, SampleError> {
    let template_id = create_template(client, config, out, diag).await?;
    create_transmission(client, config, &template_id, out, diag).await
}
