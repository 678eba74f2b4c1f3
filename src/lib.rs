//! # Research Contracts
//!
//! Structured-output contracts for the autonomous research agent loop.
//!
//! Every model call the agent makes is a structured generation: a prompt
//! plus a validation schema the returned value must satisfy. This crate is
//! the single source of truth for those schemas and their bounds:
//!
//! - **bounds**: the constant registry every array/string limit cites
//! - **language**: one-shot async language/style resolution with a
//!   synchronous, never-blocking directive read
//! - **schemas**: pure builders for the fixed-purpose steps (language
//!   detection, gap-check, code synthesis, failure analysis, query rewrite)
//! - **evaluator**: the tagged evaluator family — base `{pass, think}` plus
//!   exactly one analysis record per evaluation kind
//! - **actions**: the capability-gated decision schema for the
//!   single-action step
//! - **generation**: the boundary trait for the external structured
//!   generation service
//!
//! ## Usage
//!
//! ```rust
//! use research_contracts::prelude::*;
//!
//! let profile = LanguageProfile::new();
//! let caps = ActionCapabilitySet::none().search(true).answer(true);
//! let schema = decision_schema(&caps, &profile)?;
//! # assert!(schema.is_object());
//! # Ok::<(), ContractError>(())
//! ```
//!
//! ## The Promise
//!
//! - Every bound appears in exactly one place ([`bounds`])
//! - A composed schema never changes after it is built — localization is
//!   captured at build time
//! - The only two fatal errors are caller configuration errors: an unknown
//!   evaluation tag and an all-off capability set

pub mod actions;
pub mod bounds;
pub mod errors;
pub mod evaluator;
pub mod generation;
pub mod language;
pub mod schemas;

// Re-export everything in prelude for convenience
pub mod prelude {
    pub use crate::actions::*;
    pub use crate::bounds::*;
    pub use crate::errors::*;
    pub use crate::evaluator::*;
    pub use crate::generation::*;
    pub use crate::language::*;
    pub use crate::schemas::*;
}

// Also re-export at crate root
pub use prelude::*;
