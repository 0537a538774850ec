use crate::bleu;
use crate::tokenizer::Tokenizer;
use sift_core::{DEFAULT_THRESHOLD, Diagnostic, DiagnosticSink};

/// The phrasing a line was matched to, with its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'c> {
    pub candidate: &'c str,
    pub score: f64,
}

/// The usable phrasings of one question, tokenized once.
#[derive(Debug, Clone, Default)]
pub struct Phrasings<'c> {
    entries: Vec<(&'c str, Vec<String>)>,
}

impl Phrasings<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Selects which phrasing of a question, if any, a line restates.
pub struct Matcher<'a> {
    tokenizer: &'a dyn Tokenizer,
    sink: &'a dyn DiagnosticSink,
    threshold: f64,
}

impl<'a> Matcher<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            tokenizer,
            sink,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Set the inclusive acceptance floor.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Tokenize `candidates` for repeated matching.
    ///
    /// Empty phrasings are dropped silently. A phrasing with no tokens is
    /// reported once as [`Diagnostic::ScoreSkipped`] and dropped.
    pub fn prepare<'c>(&self, candidates: &'c [String]) -> Phrasings<'c> {
        let entries = candidates
            .iter()
            .filter(|c| !c.is_empty())
            .filter_map(|candidate| {
                let tokens = self.tokenizer.tokenize(candidate);
                if tokens.is_empty() {
                    self.sink.emit(Diagnostic::ScoreSkipped {
                        candidate: candidate.clone(),
                        reason: bleu::ScoreError::EmptyReference.to_string(),
                    });
                    return None;
                }
                Some((candidate.as_str(), tokens))
            })
            .collect();
        Phrasings { entries }
    }

    /// The best-scoring phrasing of `candidates` for `line`, if it clears the threshold.
    pub fn best_match<'c>(&self, line: &str, candidates: &'c [String]) -> Option<&'c str> {
        self.best_scored(line, candidates).map(|m| m.candidate)
    }

    /// As [`Matcher::best_match`], keeping the winning score.
    pub fn best_scored<'c>(
        &self,
        line: &str,
        candidates: &'c [String],
    ) -> Option<ScoredCandidate<'c>> {
        if line.is_empty() || candidates.is_empty() {
            return None;
        }
        self.best_prepared(line, &self.prepare(candidates))
    }

    /// As [`Matcher::best_scored`], against phrasings from [`Matcher::prepare`].
    ///
    /// Only a strictly higher score replaces the current best, so ties go to
    /// the earliest phrasing. Phrasings that fail to score are skipped.
    pub fn best_prepared<'c>(
        &self,
        line: &str,
        phrasings: &Phrasings<'c>,
    ) -> Option<ScoredCandidate<'c>> {
        if line.is_empty() || phrasings.is_empty() {
            return None;
        }

        let line_tokens = self.tokenizer.tokenize(line);
        if line_tokens.is_empty() {
            return None;
        }

        let mut best: Option<ScoredCandidate<'c>> = None;
        let mut best_score = 0.0;

        for (candidate, reference) in &phrasings.entries {
            let score = match bleu::score(&line_tokens, reference) {
                Ok(s) => s,
                Err(err) => {
                    self.sink.emit(Diagnostic::ScoreSkipped {
                        candidate: candidate.to_string(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            if score > best_score {
                best_score = score;
                best = Some(ScoredCandidate {
                    candidate: *candidate,
                    score,
                });
            }
        }

        best.filter(|m| m.score >= self.threshold)
    }
}
