use crate::normalize::normalize;
use sift_core::{Diagnostic, DiagnosticSink, TokenizerKind};
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into comparable word tokens.
///
/// Implementations normalize their input first, so callers pass raw lines.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &'static str;
}

/// Word tokenizer driven by Unicode word boundaries (UAX #29).
#[derive(Debug, Default, Clone, Copy)]
pub struct LinguisticTokenizer;

impl Tokenizer for LinguisticTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        normalize(text)
            .unicode_words()
            .map(str::to_string)
            .collect()
    }

    fn name(&self) -> &'static str {
        "linguistic"
    }
}

/// Splits on maximal runs of whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

const PROBE_TEXT: &str = "The quick, brown fox jumps over 2 lazy dogs.";
const PROBE_EXPECTED: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "2", "lazy", "dogs",
];

/// Check that the linguistic tokenizer segments a known sentence correctly.
pub fn probe_linguistic() -> Result<(), String> {
    let tokens = LinguisticTokenizer.tokenize(PROBE_TEXT);
    if tokens == PROBE_EXPECTED {
        Ok(())
    } else {
        Err(format!(
            "unexpected segmentation of probe sentence: {tokens:?}"
        ))
    }
}

/// Pick the tokenizer for `kind`, probing the linguistic one when `kind` is `Auto`.
pub fn select_tokenizer(kind: TokenizerKind, sink: &dyn DiagnosticSink) -> Box<dyn Tokenizer> {
    select_with_probe(kind, sink, probe_linguistic)
}

/// As [`select_tokenizer`], with the capability probe supplied by the caller.
///
/// A failed probe emits exactly one [`Diagnostic::TokenizerFallback`].
pub fn select_with_probe(
    kind: TokenizerKind,
    sink: &dyn DiagnosticSink,
    probe: impl FnOnce() -> Result<(), String>,
) -> Box<dyn Tokenizer> {
    match kind {
        TokenizerKind::Linguistic => Box::new(LinguisticTokenizer),
        TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        TokenizerKind::Auto => match probe() {
            Ok(()) => Box::new(LinguisticTokenizer),
            Err(reason) => {
                sink.emit(Diagnostic::TokenizerFallback { reason });
                Box::new(WhitespaceTokenizer)
            }
        },
    }
}
