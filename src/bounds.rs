//! Shared numeric and length bounds for every composed schema.
//!
//! This is the single registry for per-step limits and per-field character
//! caps. Every array bound and `maxLength` in every builder cites one of
//! these constants; changing a bound here changes it everywhere at once.
//!
//! The three `*_PER_STEP` constants are part of the stable contract —
//! callers rely on them when composing prompts and UI limits.

/// Maximum URLs a single `visit` action may target.
pub const MAX_URLS_PER_STEP: usize = 2;

/// Maximum search queries a single `search` action may issue.
pub const MAX_QUERIES_PER_STEP: usize = 5;

/// Maximum follow-up questions a single `reflect` action may raise.
pub const MAX_REFLECT_PER_STEP: usize = 3;

/// Character cap for short keyword-style fields (search queries, exact
/// quotes from sources).
pub const MAX_KEYWORD_CHARS: usize = 30;

/// Character cap for URL fields.
pub const MAX_URL_CHARS: usize = 100;

/// Character cap for the `think` field of the code-generation schema.
/// Deliberately tighter than [`MAX_PROSE_CHARS`]: code reasoning should
/// stay terse.
pub const MAX_CODE_THINK_CHARS: usize = 200;

/// Character cap for prose fields (`think`, `recap`, `blame`,
/// `improvement`, `codingIssue`).
pub const MAX_PROSE_CHARS: usize = 500;

/// Character cap for date-time strings (`YYYY-MM-DD HH:MM:SS` fits).
pub const MAX_DATETIME_CHARS: usize = 16;

/// Character cap for aspect lists in the completeness analysis record.
pub const MAX_ASPECT_CHARS: usize = 100;

/// Character cap for ISO-639-1 language codes (with room for region tags).
pub const MAX_LANG_CODE_CHARS: usize = 10;

/// Character cap for the free-text language style descriptor.
pub const MAX_LANG_STYLE_CHARS: usize = 100;

/// How many characters of the triggering question seed language detection.
pub const QUESTION_SAMPLE_CHARS: usize = 100;
