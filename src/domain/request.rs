use crate::domain::validation::ValidationError;
use crate::domain::value::{CampaignId, EmailAddress, ServerTimestamp, TemplateId, TemplateName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub email: EmailAddress,
    pub name: Option<String>,
    pub header_to: Option<String>,
}

impl Address {
    pub fn new(email: EmailAddress) -> Self {
        Self {
            email,
            name: None,
            header_to: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContent {
    from: Address,
    subject: String,
    html: Option<String>,
    text: Option<String>,
}

impl TemplateContent {
    pub const SUBJECT_FIELD: &'static str = "subject";

    /// Build template content; `subject` must not be blank and at least one of
    /// `html`/`text` must be present.
    pub fn new(
        from: Address,
        subject: impl Into<String>,
        html: Option<String>,
        text: Option<String>,
    ) -> Result<Self, ValidationError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::SUBJECT_FIELD,
            });
        }
        if html.is_none() && text.is_none() {
            return Err(ValidationError::MissingTemplateBody);
        }
        Ok(Self {
            from,
            subject,
            html,
            text,
        })
    }

    pub fn from(&self) -> &Address {
        &self.from
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Assigned by the server; unset on templates that are about to be created.
    pub id: Option<TemplateId>,
    pub name: TemplateName,
    pub content: TemplateContent,
    pub published: Option<bool>,
    pub last_update_time: Option<ServerTimestamp>,
}

impl Template {
    pub fn new(name: TemplateName, content: TemplateContent) -> Self {
        Self {
            id: None,
            name,
            content,
            published: None,
            last_update_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub address: Address,
    pub return_path: Option<EmailAddress>,
}

impl Recipient {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            return_path: None,
        }
    }

    pub fn with_return_path(mut self, return_path: EmailAddress) -> Self {
        self.return_path = Some(return_path);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTemplate {
    pub template_id: TemplateId,
    pub use_draft_template: bool,
}

impl StoredTemplate {
    /// Reference the draft revision; required for templates that were never published.
    pub fn draft(template_id: TemplateId) -> Self {
        Self {
            template_id,
            use_draft_template: true,
        }
    }

    pub fn published(template_id: TemplateId) -> Self {
        Self {
            template_id,
            use_draft_template: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    campaign_id: Option<CampaignId>,
    return_path: Option<EmailAddress>,
    recipients: Vec<Recipient>,
    content: StoredTemplate,
}

impl Transmission {
    pub const RECIPIENTS_FIELD: &'static str = "recipients";

    pub fn new(
        recipients: Vec<Recipient>,
        content: StoredTemplate,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::RECIPIENTS_FIELD,
            });
        }
        Ok(Self {
            campaign_id: None,
            return_path: None,
            recipients,
            content,
        })
    }

    pub fn with_campaign_id(mut self, campaign_id: CampaignId) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }

    pub fn with_return_path(mut self, return_path: EmailAddress) -> Self {
        self.return_path = Some(return_path);
        self
    }

    pub fn campaign_id(&self) -> Option<&CampaignId> {
        self.campaign_id.as_ref()
    }

    pub fn return_path(&self) -> Option<&EmailAddress> {
        self.return_path.as_ref()
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn content(&self) -> &StoredTemplate {
        &self.content
    }
}
