//! Design-document payloads attached to versions.
//!
//! At the storage boundary a payload is an opaque [`StoredDocument`] (the
//! serialized JSON text). At the API boundary it is a [`DocumentData`], which
//! is either the decoded structure or, when the stored text is not valid
//! JSON, the raw text itself. Decoding never fails the surrounding read.

use serde::Serialize;
use serde_json::Value;

/// Serialized document text as persisted in `versions.document_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument(String);

impl StoredDocument {
    /// Serialize a structured payload into its stored form.
    pub fn encode(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::to_string(value).map(Self)
    }

    /// Wrap text read back from the store.
    pub fn from_stored(text: String) -> Self {
        Self(text)
    }

    /// Byte length of the serialized text; this is the version's `file_size`.
    pub fn byte_len(&self) -> i64 {
        self.0.len() as i64
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the stored text.
    ///
    /// On failure the raw text is handed back inside [`DecodeFailure`] so the
    /// caller can log it and fall back to [`DocumentData::Raw`].
    pub fn decode(self) -> Result<Value, DecodeFailure> {
        serde_json::from_str(&self.0).map_err(|error| DecodeFailure { raw: self.0, error })
    }
}

/// A stored payload that could not be parsed as JSON.
#[derive(Debug)]
pub struct DecodeFailure {
    pub raw: String,
    pub error: serde_json::Error,
}

/// A version's document payload as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocumentData {
    /// Successfully decoded JSON.
    Structured(Value),
    /// Stored text that failed to decode, passed through verbatim.
    Raw(String),
}

impl DocumentData {
    pub fn is_raw(&self) -> bool {
        matches!(self, DocumentData::Raw(_))
    }
}

impl From<DecodeFailure> for DocumentData {
    fn from(failure: DecodeFailure) -> Self {
        DocumentData::Raw(failure.raw)
    }
}
