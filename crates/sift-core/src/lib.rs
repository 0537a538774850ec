//! Sift core domain types, configuration, diagnostics, and errors.

mod config;
mod diag;
mod error;
mod types;

pub use config::{DEFAULT_THRESHOLD, MatchConfig, TokenizerKind};
pub use diag::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use error::SiftError;
pub use types::{
    ExtractedAnswer, GradingItem, LabeledAnswer, ModelAnswer, QuestionBank, QuestionSpec,
};
