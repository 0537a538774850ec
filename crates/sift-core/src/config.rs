use crate::SiftError;
use std::fmt;
use std::str::FromStr;

/// Default similarity floor for accepting a line as a restated question.
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Which word tokenizer backs similarity scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenizerKind {
    /// Probe the linguistic tokenizer and fall back to whitespace if it is unusable.
    #[default]
    Auto,
    /// Unicode word-boundary segmentation.
    Linguistic,
    /// Split on runs of whitespace.
    Whitespace,
}

impl TokenizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Linguistic => "linguistic",
            Self::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenizerKind {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "linguistic" => Ok(Self::Linguistic),
            "whitespace" => Ok(Self::Whitespace),
            other => Err(SiftError::Config(format!("unknown tokenizer: {other}"))),
        }
    }
}

/// Tunables for line-to-question matching.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub threshold: f64,
    pub tokenizer: TokenizerKind,
    pub parallel: bool,
}

impl MatchConfig {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            tokenizer: TokenizerKind::default(),
            parallel: true,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Scan question ids one after another instead of on the rayon pool.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Reject thresholds outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), SiftError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SiftError::Config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
