use std::fmt;
use std::sync::Mutex;

/// A recoverable condition raised while matching. None of these abort extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The linguistic tokenizer could not be used; whitespace splitting is in effect.
    TokenizerFallback { reason: String },
    /// Similarity could not be computed for one candidate phrasing.
    ScoreSkipped { candidate: String, reason: String },
    /// A submission in a batch could not be read.
    SubmissionSkipped { student: String, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenizerFallback { reason } => {
                write!(f, "tokenizer fallback to whitespace split: {reason}")
            }
            Self::ScoreSkipped { candidate, reason } => {
                write!(f, "skipped candidate {candidate:?}: {reason}")
            }
            Self::SubmissionSkipped { student, reason } => {
                write!(f, "skipped submission for {student}: {reason}")
            }
        }
    }
}

/// Receives diagnostics from the matching pipeline.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::TokenizerFallback { reason } => {
                tracing::warn!(%reason, "linguistic tokenizer unavailable; falling back to whitespace split");
            }
            Diagnostic::ScoreSkipped { candidate, reason } => {
                tracing::warn!(%candidate, %reason, "similarity computation failed; skipping candidate");
            }
            Diagnostic::SubmissionSkipped { student, reason } => {
                tracing::warn!(%student, %reason, "could not read submission; skipping");
            }
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}
