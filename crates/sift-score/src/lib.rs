//! Text normalization, tokenization, and BLEU similarity for matching
//! submission lines against known question phrasings.

pub mod bleu;
mod matcher;
mod normalize;
mod tokenizer;

pub use bleu::ScoreError;
pub use matcher::{Matcher, Phrasings, ScoredCandidate};
pub use normalize::normalize;
pub use tokenizer::{
    LinguisticTokenizer, Tokenizer, WhitespaceTokenizer, probe_linguistic, select_tokenizer,
    select_with_probe,
};

/// Tokenize both sides with `tokenizer` and score `line` against `question`.
pub fn similarity(
    tokenizer: &dyn Tokenizer,
    line: &str,
    question: &str,
) -> Result<f64, ScoreError> {
    bleu::score(&tokenizer.tokenize(line), &tokenizer.tokenize(question))
}
