//! JSON shapes exchanged with the key service

use serde::{Deserialize, Serialize};

use crate::domain::{ApiKeySecret, KeyId, KeyRecord, ModelId, ValidatorId};

#[derive(Debug, Deserialize)]
pub(super) struct ListKeysResponse {
    pub api_keys: Vec<WireKeyRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireKeyRecord {
    pub key_id: KeyId,
    pub api_key: String,
    pub input_validators: Vec<ValidatorId>,
    pub output_validators: Vec<ValidatorId>,
    #[serde(default)]
    pub selected_model: Option<ModelId>,
}

impl From<WireKeyRecord> for KeyRecord {
    fn from(wire: WireKeyRecord) -> Self {
        Self {
            key_id: wire.key_id,
            api_key: ApiKeySecret::new(wire.api_key),
            input_validators: wire.input_validators,
            output_validators: wire.output_validators,
            model_id: wire.selected_model,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub input_validators: &'a [ValidatorId],
    pub output_validators: &'a [ValidatorId],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<&'a ModelId>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RegisterResponse {
    pub api_key: String,
    #[serde(default)]
    pub key_id: Option<KeyId>,
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteRequest<'a> {
    pub key_id: &'a KeyId,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeleteResponse {
    pub message: String,
}
