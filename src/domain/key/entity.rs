//! Key record entities

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{ModelId, ValidatorId};

/// Server-assigned key identifier.
///
/// The service is free to use numeric or string ids; the wire form is kept
/// so that a delete request echoes exactly what a listing returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyId {
    Numeric(i64),
    Text(String),
}

impl FromStr for KeyId {
    type Err = std::convert::Infallible;

    /// Digits parse as a numeric id, anything else is kept as text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Self::Numeric)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

impl From<i64> for KeyId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for KeyId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

const VISIBLE_SECRET_PREFIX: usize = 6;

/// Opaque API key value issued by the server.
///
/// `Debug` never prints the full value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeySecret(String);

impl ApiKeySecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to show in logs and listings
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(VISIBLE_SECRET_PREFIX).collect();
        format!("{}...", prefix)
    }
}

impl std::fmt::Debug for ApiKeySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKeySecret").field(&self.masked()).finish()
    }
}

/// An issued key as reported by the key listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key_id: KeyId,
    pub api_key: ApiKeySecret,
    pub input_validators: Vec<ValidatorId>,
    pub output_validators: Vec<ValidatorId>,
    pub model_id: Option<ModelId>,
}

impl KeyRecord {
    /// Whether this record was issued for exactly the given configuration.
    ///
    /// Validator order is irrelevant.
    pub fn matches(
        &self,
        input: &[ValidatorId],
        output: &[ValidatorId],
        model: Option<&ModelId>,
    ) -> bool {
        same_members(&self.input_validators, input)
            && same_members(&self.output_validators, output)
            && self.model_id.as_ref() == model
    }
}

fn same_members(a: &[ValidatorId], b: &[ValidatorId]) -> bool {
    a.len() == b.len() && a.iter().all(|id| b.contains(id))
}

/// Result of a successful key registration.
///
/// The registration endpoint returns only the key value; the configuration
/// fields echo what was submitted. The authoritative record arrives with the
/// next listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedKey {
    pub key_id: Option<KeyId>,
    pub api_key: ApiKeySecret,
    pub input_validators: Vec<ValidatorId>,
    pub output_validators: Vec<ValidatorId>,
    pub model_id: Option<ModelId>,
}

/// Server acknowledgement of a key deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> KeyRecord {
        KeyRecord {
            key_id: KeyId::Numeric(42),
            api_key: ApiKeySecret::new("sk_live_abcdef123456"),
            input_validators: vec!["detect_pii".into(), "nsfw_text".into()],
            output_validators: vec!["has_url".into()],
            model_id: Some("gpt-4o".into()),
        }
    }

    #[test]
    fn test_key_id_from_str() {
        assert_eq!("42".parse::<KeyId>().unwrap(), KeyId::Numeric(42));
        assert_eq!(
            "key-abc".parse::<KeyId>().unwrap(),
            KeyId::Text("key-abc".to_string())
        );
    }

    #[test]
    fn test_key_id_wire_form() {
        let numeric: KeyId = serde_json::from_str("7").unwrap();
        let text: KeyId = serde_json::from_str("\"a1\"").unwrap();

        assert_eq!(numeric, KeyId::Numeric(7));
        assert_eq!(text, KeyId::Text("a1".to_string()));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "7");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"a1\"");
    }

    #[test]
    fn test_secret_debug_is_masked() {
        let secret = ApiKeySecret::new("sk_live_abcdef123456");
        let debug = format!("{:?}", secret);

        assert!(debug.contains("sk_liv..."));
        assert!(!debug.contains("abcdef123456"));
        assert_eq!(secret.expose(), "sk_live_abcdef123456");
    }

    #[test]
    fn test_matches_ignores_order() {
        let record = record();
        let input: Vec<ValidatorId> = vec!["nsfw_text".into(), "detect_pii".into()];
        let output: Vec<ValidatorId> = vec!["has_url".into()];

        assert!(record.matches(&input, &output, Some(&"gpt-4o".into())));
        assert!(!record.matches(&input, &output, None));
        assert!(!record.matches(&input[..1], &output, Some(&"gpt-4o".into())));
    }
}
