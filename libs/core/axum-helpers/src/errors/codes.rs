//! Stable error identifiers shared by every API response.
//!
//! Each code has three faces: the SCREAMING_SNAKE name clients branch on,
//! the numeric id that shows up in logs and dashboards, and a default
//! message for when the handler has nothing more specific to say.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body failed field validation
    ValidationError,
    /// Path or query parameter was not a UUID
    InvalidUuid,
    /// Request body could not be parsed as JSON
    JsonExtraction,
    /// Requested resource does not exist
    NotFound,
    /// Request was malformed or violated a business rule
    BadRequest,
    /// Unexpected server-side failure
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Numeric id for logs and monitoring. Client-caused errors live in
    /// 1000-1999; 1005 is the only server-side code so far.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::BadRequest => 1006,
        }
    }

    /// Fallback message when the handler supplies none.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 6] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidUuid,
        ErrorCode::JsonExtraction,
        ErrorCode::NotFound,
        ErrorCode::BadRequest,
        ErrorCode::InternalError,
    ];

    #[test]
    fn numeric_codes_are_unique() {
        let mut codes: Vec<i32> = ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn display_matches_screaming_snake_name() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorCode::InvalidUuid.to_string(), "INVALID_UUID");
    }

    #[test]
    fn serializes_as_the_client_facing_name() {
        let json = serde_json::to_string(&ErrorCode::ValidationError).unwrap();
        assert_eq!(json, "\"VALIDATION_ERROR\"");
    }

    #[test]
    fn every_code_has_a_default_message() {
        for code in ALL {
            assert!(!code.default_message().is_empty());
        }
    }
}
