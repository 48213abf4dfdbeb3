//! Inbound notification body parsing.
//!
//! The processor posts either a JSON object or a form-encoded body. JSON is
//! tried first regardless of the declared content type; anything that is not
//! a JSON object is read as form pairs.

use serde_json::Value;

use super::WebhookError;
use crate::domain::signature::FieldMap;

/// Encoding the body was successfully read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPayload {
    pub fields: FieldMap,
    pub format: PayloadFormat,
}

/// Parses a notification body into a field map.
///
/// JSON object keys keep their document order. Repeated form keys keep the
/// position of their first occurrence and the value of their last.
///
/// # Errors
///
/// `MalformedPayload` when the body is not a JSON object and cannot be
/// form-decoded either.
pub fn parse_payload(body: &[u8]) -> Result<ParsedPayload, WebhookError> {
    if let Ok(Value::Object(object)) = serde_json::from_slice::<Value>(body) {
        return Ok(ParsedPayload {
            fields: FieldMap::from_json_object(&object),
            format: PayloadFormat::Json,
        });
    }

    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

    Ok(ParsedPayload {
        fields: pairs.into_iter().collect(),
        format: PayloadFormat::Form,
    })
}

/// Returns true if a `Content-Type` value declares JSON.
pub fn declares_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_is_read_in_document_order() {
        let body = br#"{"status":"PROCESSING","merchantReference":"WC-x-1","isError":false}"#;

        let parsed = parse_payload(body).unwrap();

        assert_eq!(parsed.format, PayloadFormat::Json);
        let keys: Vec<&str> = parsed.fields.keys().collect();
        assert_eq!(keys, vec!["status", "merchantReference", "isError"]);
        assert_eq!(parsed.fields.get("isError"), Some(""));
    }

    #[test]
    fn form_body_is_decoded() {
        let body = b"merchantReference=WC-x-55&status=TXN_AUTH_SUCCESSFUL&signature=ab%2Bc%3D";

        let parsed = parse_payload(body).unwrap();

        assert_eq!(parsed.format, PayloadFormat::Form);
        assert_eq!(parsed.fields.get("merchantReference"), Some("WC-x-55"));
        assert_eq!(parsed.fields.get("signature"), Some("ab+c="));
    }

    #[test]
    fn repeated_form_key_keeps_last_value() {
        let parsed = parse_payload(b"a=1&b=2&a=3").unwrap();

        let entries: Vec<(&str, &str)> = parsed.fields.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn json_array_falls_back_to_form() {
        let parsed = parse_payload(b"[1,2]").unwrap();

        assert_eq!(parsed.format, PayloadFormat::Form);
        assert!(parsed.fields.get("signature").is_none());
    }

    #[test]
    fn empty_body_is_an_empty_form() {
        let parsed = parse_payload(b"").unwrap();

        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn declares_json_ignores_parameters_and_case() {
        assert!(declares_json(Some("application/json; charset=utf-8")));
        assert!(declares_json(Some("Application/JSON")));
        assert!(declares_json(Some("application/vnd.sparco+json")));
        assert!(!declares_json(Some("application/x-www-form-urlencoded")));
        assert!(!declares_json(None));
    }
}
