//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{Address, Recipient, StoredTemplate, Template, TemplateContent, Transmission};
pub use response::{TemplateCreated, TransmissionCreated};
pub use validation::ValidationError;
pub use value::{
    ApiKey, CampaignId, EmailAddress, ServerTimestamp, TemplateId, TemplateName, TransmissionId,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> EmailAddress {
        EmailAddress::new("demo@example.com").unwrap()
    }

    #[test]
    fn api_key_rejects_blank() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn template_content_requires_subject() {
        let err = TemplateContent::new(Address::new(sender()), " ", Some("Hello!".into()), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: TemplateContent::SUBJECT_FIELD
            }
        ));
    }

    #[test]
    fn template_content_requires_html_or_text() {
        let err = TemplateContent::new(Address::new(sender()), "Subject", None, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingTemplateBody);

        let text_only =
            TemplateContent::new(Address::new(sender()), "Subject", None, Some("hi".into()))
                .unwrap();
        assert_eq!(text_only.text(), Some("hi"));
        assert_eq!(text_only.html(), None);
    }

    #[test]
    fn new_template_has_no_server_fields() {
        let content =
            TemplateContent::new(Address::new(sender()), "Subject", Some("Hello!".into()), None)
                .unwrap();
        let template = Template::new(TemplateName::new("name").unwrap(), content);
        assert!(template.id.is_none());
        assert!(template.published.is_none());
        assert!(template.last_update_time.is_none());
    }

    #[test]
    fn transmission_requires_recipients() {
        let content = StoredTemplate::draft(TemplateId::new("tmpl_123").unwrap());
        let err = Transmission::new(Vec::new(), content).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: Transmission::RECIPIENTS_FIELD
            }
        ));
    }

    #[test]
    fn stored_template_constructors_set_draft_flag() {
        let id = TemplateId::new("tmpl_123").unwrap();
        assert!(StoredTemplate::draft(id.clone()).use_draft_template);
        assert!(!StoredTemplate::published(id).use_draft_template);
    }

    #[test]
    fn transmission_builders_keep_values() {
        let recipient = Recipient::new(Address::new(sender())).with_return_path(sender());
        let transmission = Transmission::new(
            vec![recipient.clone()],
            StoredTemplate::draft(TemplateId::new("tmpl_123").unwrap()),
        )
        .unwrap()
        .with_campaign_id(CampaignId::new("campaign").unwrap())
        .with_return_path(sender());

        assert_eq!(transmission.recipients(), &[recipient]);
        assert_eq!(
            transmission.campaign_id().map(CampaignId::as_str),
            Some("campaign")
        );
        assert_eq!(transmission.return_path(), Some(&sender()));
        assert_eq!(transmission.content().template_id.as_str(), "tmpl_123");
    }
}
