//! Structured Generation Service boundary.
//!
//! The generation service is an external collaborator: given a role, a
//! validation schema, and a prompt, it returns a value guaranteed to
//! conform to the schema. This crate treats it as opaque — no retry, no
//! backoff, no provider selection. Idempotent safe re-invocation is the
//! collaborator's responsibility. Our only obligation at this boundary is
//! supplying a schema and a prompt containing the localization directive
//! where required.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`StructuredGeneration::generate`].
///
/// The trait stays object-safe and implementable on stable without an
/// async-trait shim.
pub type GenerationFuture<'a> = Pin<Box<dyn Future<Output = GenerationResult> + Send + 'a>>;

/// Result of a structured generation call.
pub type GenerationResult = Result<Value, GenerationError>;

/// Message role the generation call runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationRole {
    System,
    User,
}

impl std::fmt::Display for GenerationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A single structured generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Role the prompt is issued as.
    pub role: GenerationRole,

    /// Validation schema the returned value must satisfy.
    pub schema: Value,

    /// Natural-language prompt.
    pub prompt: String,
}

impl GenerationRequest {
    /// Create a new request.
    pub fn new(role: GenerationRole, schema: Value, prompt: impl Into<String>) -> Self {
        Self {
            role,
            schema,
            prompt: prompt.into(),
        }
    }

    /// Create a user-role request (the common case).
    pub fn user(schema: Value, prompt: impl Into<String>) -> Self {
        Self::new(GenerationRole::User, schema, prompt)
    }
}

/// Error returned by the generation service.
///
/// Opaque to this crate: we never inspect it beyond logging. Whether it
/// was a timeout, a refusal, or a provider outage is the collaborator's
/// concern.
#[derive(Debug, Clone, Error)]
#[error("generation failed: {message}")]
pub struct GenerationError {
    /// Human-readable failure description.
    pub message: String,

    /// Optional structured detail from the provider.
    pub data: Option<Value>,
}

impl GenerationError {
    /// Create a new generation error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    /// Attach structured detail.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// The generation collaborator seam.
///
/// Implemented by the model-invocation layer, mocked in tests. May reject;
/// the returned value is trusted to conform to `request.schema` because
/// the collaborator validates before resolving.
pub trait StructuredGeneration: Send + Sync {
    /// Run one structured generation call.
    fn generate(&self, request: GenerationRequest) -> GenerationFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_construction() {
        let req = GenerationRequest::user(json!({"type": "object"}), "detect the language");
        assert_eq!(req.role, GenerationRole::User);
        assert_eq!(req.prompt, "detect the language");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&GenerationRole::User).unwrap();
        assert_eq!(json, "\"user\"");
    }

    #[test]
    fn test_error_detail() {
        let err = GenerationError::new("provider timeout").with_data(json!({"code": 504}));
        assert!(err.to_string().contains("provider timeout"));
        assert!(err.data.is_some());
    }
}
