use serde::{Deserialize, Serialize};

use super::envelope::{TransportError, decode_envelope};
use super::template::AddressJson;
use crate::domain::{
    CampaignId, EmailAddress, Recipient, Transmission, TransmissionCreated, TransmissionId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientJson {
    pub address: AddressJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredTemplateJson {
    pub template_id: String,
    pub use_draft_template: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransmissionJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
    pub recipients: Vec<RecipientJson>,
    pub content: StoredTemplateJson,
}

#[derive(Debug, Clone, Deserialize)]
struct TransmissionCreatedJson {
    id: String,
    #[serde(default)]
    total_accepted_recipients: u32,
    #[serde(default)]
    total_rejected_recipients: u32,
}

impl From<&Recipient> for RecipientJson {
    fn from(value: &Recipient) -> Self {
        Self {
            address: (&value.address).into(),
            return_path: value.return_path.as_ref().map(|it| it.as_str().to_owned()),
        }
    }
}

pub fn encode_transmission_json(transmission: &Transmission) -> TransmissionJson {
    let content = transmission.content();
    TransmissionJson {
        campaign_id: transmission
            .campaign_id()
            .map(|it| CampaignId::as_str(it).to_owned()),
        return_path: transmission
            .return_path()
            .map(|it| EmailAddress::as_str(it).to_owned()),
        recipients: transmission
            .recipients()
            .iter()
            .map(RecipientJson::from)
            .collect(),
        content: StoredTemplateJson {
            template_id: content.template_id.as_str().to_owned(),
            use_draft_template: content.use_draft_template,
        },
    }
}

pub fn decode_transmission_created_response(
    json: &str,
) -> Result<TransmissionCreated, TransportError> {
    let parsed: TransmissionCreatedJson = decode_envelope(json)?;
    Ok(TransmissionCreated {
        id: TransmissionId::new(parsed.id)?,
        total_accepted_recipients: parsed.total_accepted_recipients,
        total_rejected_recipients: parsed.total_rejected_recipients,
    })
}
