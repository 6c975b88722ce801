//! Extractors that reject bad requests with the shared error envelope
//! before a handler ever runs.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
