//! Uniform response body.
//!
//! Every response produced by this adapter, success or failure, is an
//! [`Envelope`] serialised as `{"data": ..., "error": ...}`. Both keys are
//! always present; the absent side is `null`.

use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Response body wrapper.
///
/// # Examples
/// ```
/// use authgate::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_value(Envelope::data(1)).unwrap();
/// assert_eq!(body, serde_json::json!({"data": 1, "error": null}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<Error>,
}

impl<T> Envelope<T> {
    /// Successful payload.
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Failure payload. Callers redact internal errors first.
    pub fn error(error: Error) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }
}

impl Envelope<()> {
    /// Success without a payload.
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_envelope_keeps_both_keys() {
        let value = serde_json::to_value(Envelope::empty()).expect("serialise");
        assert_eq!(value, json!({ "data": null, "error": null }));
    }

    #[test]
    fn error_envelope_nulls_data() {
        let value =
            serde_json::to_value(Envelope::<()>::error(Error::forbidden())).expect("serialise");
        assert_eq!(
            value,
            json!({
                "data": null,
                "error": { "kind": "forbidden", "code": 200, "message": "access forbidden" }
            })
        );
    }
}
