use std::fmt;

use chrono::{DateTime, NaiveDateTime};

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// SparkPost API key, sent verbatim as the `Authorization` header.
///
/// Invariant: not blank. The value is kept exactly as provided and never shows up in
/// `Debug` output.
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variable the sample reads the key from.
    pub const FIELD: &'static str = "SPARKPOST_API_KEY";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the key as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Bare email address (`local-part@domain`, no display name).
///
/// Invariant: parses as an RFC 5322 address after trimming.
pub struct EmailAddress(String);

impl EmailAddress {
    /// JSON field name used by SparkPost (`email`).
    pub const FIELD: &'static str = "email";

    /// Create a validated [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let options = email_address::Options::default().without_display_text();
        if email_address::EmailAddress::parse_with_options(trimmed, options).is_err() {
            return Err(ValidationError::InvalidEmail {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-assigned template id (`id` / `template_id`), kept exactly as received.
///
/// Invariant: not blank.
pub struct TemplateId(String);

impl TemplateId {
    /// JSON field name used by transmissions (`template_id`).
    pub const FIELD: &'static str = "template_id";

    /// Create a validated [`TemplateId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Client-chosen template name (`name`).
///
/// Invariant: non-empty after trimming. The original value is preserved.
pub struct TemplateName(String);

impl TemplateName {
    /// JSON field name used by SparkPost (`name`).
    pub const FIELD: &'static str = "name";

    /// Create a validated [`TemplateName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the name as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-assigned transmission id.
///
/// Invariant: non-empty after trimming.
pub struct TransmissionId(String);

impl TransmissionId {
    /// JSON field name used by SparkPost (`id`).
    pub const FIELD: &'static str = "id";

    /// Create a validated [`TransmissionId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Opaque caller-chosen label used for reporting (`campaign_id`).
///
/// Invariant: non-empty after trimming.
pub struct CampaignId(String);

impl CampaignId {
    /// JSON field name used by SparkPost (`campaign_id`).
    pub const FIELD: &'static str = "campaign_id";

    /// Create a validated [`CampaignId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated campaign id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Timestamp as reported by SparkPost, in UTC.
///
/// The wire form is `YYYY-MM-DDTHH:MM:SS` without an offset. Values carrying an
/// RFC 3339 offset are accepted too and normalized to UTC.
pub struct ServerTimestamp(NaiveDateTime);

impl ServerTimestamp {
    /// Wire format (`chrono` syntax).
    pub const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";

    /// Parse a timestamp from its wire form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, Self::FORMAT) {
            return Ok(Self(naive));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self(dt.naive_utc()))
            .map_err(|_| ValidationError::InvalidTimestamp {
                input: trimmed.to_owned(),
            })
    }

    pub fn as_naive_utc(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for ServerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
