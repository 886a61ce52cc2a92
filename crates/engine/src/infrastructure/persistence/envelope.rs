//! Versioned JSON envelope around every stored value.
//!
//! Stored form: `{"schemaVersion": 1, "data": <value>}`. Decoding checks the
//! version before touching `data`, then decodes `data` strictly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::RepoError;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Storage slot holding the story list.
pub const ADVENTURES_KEY: &str = "adventures";

/// Storage slot holding the profile.
pub const PROFILE_KEY: &str = "profile";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeOut<'a, T> {
    schema_version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EnvelopeIn {
    schema_version: u32,
    data: serde_json::Value,
}

pub fn encode<T: Serialize>(value: &T) -> Result<String, RepoError> {
    serde_json::to_string(&EnvelopeOut {
        schema_version: SCHEMA_VERSION,
        data: value,
    })
    .map_err(RepoError::serialization)
}

pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, RepoError> {
    let envelope: EnvelopeIn = serde_json::from_str(json).map_err(RepoError::serialization)?;
    if envelope.schema_version != SCHEMA_VERSION {
        return Err(RepoError::SchemaVersion {
            found: envelope.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    serde_json::from_value(envelope.data).map_err(RepoError::serialization)
}
