use std::collections::HashMap;

/// Highest n-gram order considered; each order is weighted equally.
pub const MAX_ORDER: usize = 4;

/// Added to the numerator of an n-gram order with no overlap, so sparse
/// matches still produce a non-zero geometric mean.
const EPSILON: f64 = 0.1;

/// Why similarity could not be computed for one candidate/reference pair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("candidate has no tokens")]
    EmptyCandidate,

    #[error("reference has no tokens")]
    EmptyReference,

    #[error("score is not finite: {0}")]
    NonFinite(f64),
}

/// Clipped n-gram precision for one order.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Precision {
    matched: usize,
    total: usize,
}

/// Sentence-level BLEU of `candidate` against a single `reference`.
///
/// Uses uniform weights over orders 1..=4, the brevity penalty, and
/// epsilon smoothing of empty orders. A candidate sharing no unigram with
/// the reference scores exactly `0.0`. Returns a value in `[0, 1]`.
pub fn score<C, R>(candidate: &[C], reference: &[R]) -> Result<f64, ScoreError>
where
    C: AsRef<str>,
    R: AsRef<str>,
{
    if candidate.is_empty() {
        return Err(ScoreError::EmptyCandidate);
    }
    if reference.is_empty() {
        return Err(ScoreError::EmptyReference);
    }

    let candidate: Vec<&str> = candidate.iter().map(AsRef::as_ref).collect();
    let reference: Vec<&str> = reference.iter().map(AsRef::as_ref).collect();

    let precisions: Vec<Precision> = (1..=MAX_ORDER)
        .map(|n| modified_precision(&candidate, &reference, n))
        .collect();

    // No unigram overlap means no overlap at any order
    if precisions[0].matched == 0 {
        return Ok(0.0);
    }

    let weight = 1.0 / MAX_ORDER as f64;
    let log_sum: f64 = precisions
        .iter()
        .map(|p| {
            let numerator = if p.matched == 0 {
                EPSILON
            } else {
                p.matched as f64
            };
            weight * (numerator / p.total as f64).ln()
        })
        .sum();

    let result = brevity_penalty(reference.len(), candidate.len()) * log_sum.exp();
    if !result.is_finite() {
        return Err(ScoreError::NonFinite(result));
    }
    Ok(result.clamp(0.0, 1.0))
}

/// Candidate n-grams clipped by their count in the reference.
///
/// `total` is at least 1 so orders longer than the candidate stay defined.
fn modified_precision(candidate: &[&str], reference: &[&str], n: usize) -> Precision {
    let candidate_counts = ngram_counts(candidate, n);
    let reference_counts = ngram_counts(reference, n);

    let matched = candidate_counts
        .iter()
        .map(|(gram, &count)| count.min(reference_counts.get(gram).copied().unwrap_or(0)))
        .sum();
    let total = candidate_counts.values().sum::<usize>().max(1);

    Precision { matched, total }
}

fn ngram_counts<'a>(tokens: &[&'a str], n: usize) -> HashMap<Vec<&'a str>, usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for window in tokens.windows(n) {
            *counts.entry(window.to_vec()).or_default() += 1;
        }
    }
    counts
}

/// `1` when the candidate is longer than the reference, `exp(1 - r/c)` otherwise.
fn brevity_penalty(reference_len: usize, candidate_len: usize) -> f64 {
    if candidate_len > reference_len {
        1.0
    } else if candidate_len == 0 {
        0.0
    } else {
        (1.0 - reference_len as f64 / candidate_len as f64).exp()
    }
}
