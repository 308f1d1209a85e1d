use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains an invalid value: {0}")]
    Invalid(#[from] ValidationError),
}

/// `{ "results": ... }` wrapper SparkPost puts around every success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub results: T,
}

pub fn decode_envelope<T: DeserializeOwned>(json: &str) -> Result<T, TransportError> {
    let envelope: Envelope<T> = serde_json::from_str(json)?;
    Ok(envelope.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Id {
        id: String,
    }

    #[test]
    fn decode_unwraps_results() {
        let parsed: Id = decode_envelope(r#"{"results":{"id":"abc"}}"#).unwrap();
        assert_eq!(
            parsed,
            Id {
                id: "abc".to_owned()
            }
        );
    }

    #[test]
    fn decode_rejects_missing_results() {
        let err = decode_envelope::<Id>(r#"{"errors":[{"message":"nope"}]}"#).unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode_envelope::<Id>("not-json").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}
