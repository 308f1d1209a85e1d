use serde::{Deserialize, Serialize};

use super::envelope::{TransportError, decode_envelope};
use crate::domain::{
    Address, EmailAddress, ServerTimestamp, Template, TemplateContent, TemplateCreated,
    TemplateId, TemplateName,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressJson {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_to: Option<String>,
}

impl From<&Address> for AddressJson {
    fn from(value: &Address) -> Self {
        Self {
            email: value.email.as_str().to_owned(),
            name: value.name.clone(),
            header_to: value.header_to.clone(),
        }
    }
}

impl TryFrom<AddressJson> for Address {
    type Error = TransportError;

    fn try_from(value: AddressJson) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::new(value.email)?,
            name: value.name,
            header_to: value.header_to,
        })
    }
}

/// `content.from` is returned either as an address object or a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FromJson {
    Address(AddressJson),
    Email(String),
}

impl TryFrom<FromJson> for Address {
    type Error = TransportError;

    fn try_from(value: FromJson) -> Result<Self, Self::Error> {
        match value {
            FromJson::Address(address) => address.try_into(),
            FromJson::Email(email) => Ok(Address::new(EmailAddress::new(email)?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateContentJson {
    pub from: FromJson,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub content: TemplateContentJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TemplateCreatedJson {
    id: String,
}

pub fn encode_template_json(template: &Template) -> TemplateJson {
    let content = &template.content;
    TemplateJson {
        id: template.id.as_ref().map(|id| id.as_str().to_owned()),
        name: template.name.as_str().to_owned(),
        content: TemplateContentJson {
            from: FromJson::Address(content.from().into()),
            subject: content.subject().to_owned(),
            html: content.html().map(str::to_owned),
            text: content.text().map(str::to_owned),
        },
        published: template.published,
        last_update_time: template.last_update_time.map(|ts| ts.to_string()),
    }
}

impl TryFrom<TemplateJson> for Template {
    type Error = TransportError;

    fn try_from(value: TemplateJson) -> Result<Self, Self::Error> {
        let content = TemplateContent::new(
            value.content.from.try_into()?,
            value.content.subject,
            value.content.html,
            value.content.text,
        )?;
        Ok(Self {
            id: value.id.map(TemplateId::new).transpose()?,
            name: TemplateName::new(value.name)?,
            content,
            published: value.published,
            last_update_time: value
                .last_update_time
                .as_deref()
                .map(ServerTimestamp::parse)
                .transpose()?,
        })
    }
}

pub fn decode_template_created_response(json: &str) -> Result<TemplateCreated, TransportError> {
    let parsed: TemplateCreatedJson = decode_envelope(json)?;
    Ok(TemplateCreated {
        id: TemplateId::new(parsed.id)?,
    })
}

pub fn decode_template_response(json: &str) -> Result<Template, TransportError> {
    let parsed: TemplateJson = decode_envelope(json)?;
    parsed.try_into()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::ValidationError;

    fn sample_template() -> Template {
        let sender = EmailAddress::new("demo@example.com").unwrap();
        let from = Address::new(sender).with_name("Testing");
        let content =
            TemplateContent::new(from, "Template Test", Some("Hello!".into()), None).unwrap();
        Template::new(TemplateName::new("_TMP_TEMPLATE_TEST").unwrap(), content)
    }

    #[test]
    fn encode_omits_unset_optional_fields() {
        let value = serde_json::to_value(encode_template_json(&sample_template())).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "_TMP_TEMPLATE_TEST",
                "content": {
                    "from": { "email": "demo@example.com", "name": "Testing" },
                    "subject": "Template Test",
                    "html": "Hello!"
                }
            })
        );
        assert!(!value.to_string().contains("null"));
    }

    #[test]
    fn encode_then_decode_keeps_populated_fields() {
        let mut template = sample_template();
        template.id = Some(TemplateId::new("tmpl_123").unwrap());
        template.published = Some(false);
        template.last_update_time = Some(ServerTimestamp::parse("2014-05-01T12:30:45").unwrap());

        let encoded = serde_json::to_string(&encode_template_json(&template)).unwrap();
        let decoded = decode_template_response(&format!(r#"{{"results":{encoded}}}"#)).unwrap();
        assert_eq!(decoded, template);
    }

    #[test]
    fn decode_accepts_string_from_and_server_dates() {
        let json = r#"
        {
          "results": {
            "id": "tmpl_123",
            "name": "_TMP_TEMPLATE_TEST",
            "published": false,
            "description": "ignored",
            "last_update_time": "2014-05-01T12:30:45",
            "content": {
              "from": "demo@example.com",
              "subject": "Template Test",
              "text": "Hello!"
            }
          }
        }
        "#;

        let template = decode_template_response(json).unwrap();
        assert_eq!(template.id.as_ref().map(TemplateId::as_str), Some("tmpl_123"));
        assert_eq!(template.content.from().email.as_str(), "demo@example.com");
        assert_eq!(template.content.from().name, None);
        assert_eq!(template.content.text(), Some("Hello!"));
        assert_eq!(
            template.last_update_time.map(|ts| ts.to_string()).as_deref(),
            Some("2014-05-01T12:30:45")
        );
    }

    #[test]
    fn decode_template_created_reads_id() {
        let created = decode_template_created_response(r#"{"results":{"id":"tmpl_123"}}"#).unwrap();
        assert_eq!(created.id.as_str(), "tmpl_123");
    }

    #[test]
    fn decode_template_created_keeps_id_verbatim() {
        let created =
            decode_template_created_response(r#"{"results":{"id":" tmpl 123 "}}"#).unwrap();
        assert_eq!(created.id.as_str(), " tmpl 123 ");
    }

    #[test]
    fn decode_template_created_rejects_missing_id() {
        let err = decode_template_created_response(r#"{"results":{}}"#).unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }

    #[test]
    fn decode_template_created_rejects_empty_id() {
        let err = decode_template_created_response(r#"{"results":{"id":"  "}}"#).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Invalid(ValidationError::Empty { .. })
        ));
    }
}
