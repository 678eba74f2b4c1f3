//! Language profile: one-shot asynchronous language/style resolution.
//!
//! Every localized schema field embeds a directive telling the model which
//! language and register to answer in. The profile starts with safe
//! defaults (`"en"`, `"formal English"`), runs at most one detection call
//! against the generation service, and publishes the resolved pair as a
//! single unit. Reads are synchronous and never block.
//!
//! # Lifecycle
//!
//! Two-phase construction:
//!
//! 1. [`LanguageProfile::new`] builds a not-ready profile holding the
//!    defaults.
//! 2. [`LanguageProfile::resolve`] is the awaitable resolution. Callers
//!    either await it before composing schemas or explicitly accept
//!    default-directive behavior and let it run in the background.
//!
//! Exactly one detection call runs per instance — later `resolve` calls
//! are no-ops. If the call fails, the profile keeps the defaults forever;
//! no error surfaces (a `tracing` warning is emitted so a permanently
//! default profile is visible to operators). "Still default forever" is a
//! valid steady state, not a bug to wait out.
//!
//! # Publication
//!
//! The resolved pair goes through a single [`OnceLock`] swap. A reader
//! observes either both defaults or both resolved values, never a torn
//! pair with one field updated and the other still default.

use crate::bounds::QUESTION_SAMPLE_CHARS;
use crate::generation::{GenerationRequest, StructuredGeneration};
use crate::schemas::language_detection_schema;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::warn;

/// Default ISO-639-1 language code.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Default descriptive style.
pub const DEFAULT_LANGUAGE_STYLE: &str = "formal English";

/// A resolved language code + style pair.
///
/// Always replaced as a whole; the two fields are never updated
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings {
    /// ISO-639-1 language code (e.g. "en", "fr").
    #[serde(rename = "langCode")]
    pub language_code: String,

    /// Free-text style descriptor (e.g. "casual French").
    #[serde(rename = "langStyle")]
    pub language_style: String,
}

impl LanguageSettings {
    /// Create a settings pair.
    pub fn new(language_code: impl Into<String>, language_style: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            language_style: language_style.into(),
        }
    }
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE_CODE, DEFAULT_LANGUAGE_STYLE)
    }
}

#[derive(Debug, Default)]
struct ProfileInner {
    /// Guards the one-per-instance detection call.
    started: AtomicBool,

    /// Set at most once; holds the resolved pair after publication.
    resolved: OnceLock<LanguageSettings>,
}

/// Shared language/style profile for one agent session.
///
/// Cheap to clone — clones share the same resolution cell, so a profile
/// handed to schema builders observes the publication made by the
/// background resolution task.
#[derive(Debug, Clone, Default)]
pub struct LanguageProfile {
    inner: Arc<ProfileInner>,
}

impl LanguageProfile {
    /// Create a not-ready profile holding the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the detection call has published its result.
    pub fn is_resolved(&self) -> bool {
        self.inner.resolved.get().is_some()
    }

    /// Current best-known settings: the resolved pair once published,
    /// the defaults before that (and forever, if detection failed).
    pub fn settings(&self) -> LanguageSettings {
        self.inner
            .resolved
            .get()
            .cloned()
            .unwrap_or_default()
    }

    /// Compose the localization directive embedded into schema fields.
    ///
    /// Synchronous, never blocks, never fails. Two schemas built before
    /// and after resolution will carry different directive text; neither
    /// self-updates afterwards — builders capture this value at build
    /// time.
    pub fn localization_directive(&self) -> String {
        let settings = self.settings();
        format!(
            "first-person, lang:{}, style:{}",
            settings.language_code, settings.language_style
        )
    }

    /// Run the one-shot detection call and publish the result.
    ///
    /// Returns `true` if this call published a resolved pair. Returns
    /// `false` when resolution already started on this instance (no-op)
    /// or when detection failed (defaults kept, warning logged, no error
    /// surfaces). Never retried by this component.
    pub async fn resolve<G>(&self, question: &str, generator: &G) -> bool
    where
        G: StructuredGeneration + ?Sized,
    {
        if self.inner.started.swap(true, Ordering::AcqRel) {
            return false;
        }

        let sample = question_sample(question);
        let request = GenerationRequest::user(
            language_detection_schema(),
            format!(
                "Identify the language and writing style of the question below. \
                 Report the ISO 639-1 code and a short style descriptor \
                 (e.g. \"casual French\", \"technical English\").\n\n\
                 Question: {sample}"
            ),
        );

        match generator.generate(request).await {
            Ok(value) => match serde_json::from_value::<LanguageSettings>(value) {
                Ok(settings) => self.inner.resolved.set(settings).is_ok(),
                Err(err) => {
                    warn!(error = %err, "language detection returned an unusable value; keeping defaults");
                    false
                }
            },
            Err(err) => {
                warn!(error = %err, "language detection failed; keeping defaults");
                false
            }
        }
    }

    /// Start the one-shot detection call on a background task.
    ///
    /// For callers that accept default-directive behavior until resolution
    /// lands instead of awaiting [`resolve`](Self::resolve) inline. The
    /// task is never cancelled or retried; the handle resolves to whether
    /// a pair was published.
    ///
    /// Must be called within a tokio runtime.
    pub fn resolve_in_background<G>(
        &self,
        question: impl Into<String>,
        generator: Arc<G>,
    ) -> tokio::task::JoinHandle<bool>
    where
        G: StructuredGeneration + ?Sized + 'static,
    {
        let profile = self.clone();
        let question = question.into();
        tokio::spawn(async move { profile.resolve(&question, generator.as_ref()).await })
    }
}

/// Truncate the triggering question to the detection sample length,
/// respecting char boundaries.
fn question_sample(question: &str) -> &str {
    match question.char_indices().nth(QUESTION_SAMPLE_CHARS) {
        Some((idx, _)) => &question[..idx],
        None => question,
    }
}
