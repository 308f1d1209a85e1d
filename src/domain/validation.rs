use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidEmail { input: String },
    MissingTemplateBody,
    InvalidTimestamp { input: String },
    InvalidPathSegment { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidEmail { input } => write!(f, "invalid email address: {input}"),
            Self::MissingTemplateBody => {
                write!(f, "template content needs at least one of html or text")
            }
            Self::InvalidTimestamp { input } => {
                write!(
                    f,
                    "invalid timestamp: {input} (expected YYYY-MM-DDTHH:MM:SS)"
                )
            }
            Self::InvalidPathSegment { input } => {
                write!(f, "{input:?} cannot be used as a path segment")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
