use crate::SiftError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A known question and the phrasings it may be restated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub question_id: u64,
    pub questions: Vec<String>,
}

impl QuestionSpec {
    pub fn new(question_id: u64, questions: Vec<String>) -> Self {
        Self {
            question_id,
            questions,
        }
    }

    /// Incomplete entries (id of zero, or no phrasings) are never matched.
    pub fn is_complete(&self) -> bool {
        self.question_id > 0 && !self.questions.is_empty()
    }
}

/// The authoritative set of questions matched against a submission.
///
/// Iteration order is the order the entries were supplied in; extraction
/// output follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionBank {
    specs: Vec<QuestionSpec>,
}

impl QuestionBank {
    pub fn new(specs: Vec<QuestionSpec>) -> Self {
        Self { specs }
    }

    /// Parse a JSON-encoded bank: an array of
    /// `{"question_id": <int>, "questions": [<string>, ...]}` objects.
    ///
    /// A missing or null `question_id` / `questions` yields an incomplete
    /// entry that extraction skips. Anything else that does not have this
    /// shape is rejected.
    pub fn from_json(input: &str) -> Result<Self, SiftError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, SiftError> {
        let entries = value
            .as_array()
            .ok_or_else(|| SiftError::Bank("expected a JSON array of questions".to_string()))?;

        let specs = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| spec_from_value(i, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { specs })
    }

    /// Build a bank whose phrasings are the model answer file's own question texts.
    pub fn from_model_answers(answers: &[ModelAnswer]) -> Self {
        let specs = answers
            .iter()
            .map(|a| QuestionSpec::new(a.question_id, vec![a.question_text.clone()]))
            .collect();
        Self { specs }
    }

    pub fn specs(&self) -> &[QuestionSpec] {
        &self.specs
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.specs.iter()
    }

    /// Entries eligible for matching, in bank order.
    pub fn complete(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.specs.iter().filter(|s| s.is_complete())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn spec_from_value(index: usize, entry: &Value) -> Result<QuestionSpec, SiftError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| SiftError::Bank(format!("entry {index} is not an object")))?;

    let question_id = match obj.get("question_id") {
        None | Some(Value::Null) => 0,
        Some(v) => v.as_u64().ok_or_else(|| {
            SiftError::Bank(format!(
                "entry {index}: question_id must be a non-negative integer, got {v}"
            ))
        })?,
    };

    let questions = match obj.get("questions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    SiftError::Bank(format!(
                        "entry {index}: questions must contain only strings, got {item}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(SiftError::Bank(format!(
                "entry {index}: questions must be an array, got {other}"
            )));
        }
    };

    Ok(QuestionSpec {
        question_id,
        questions,
    })
}

/// One located answer. When a question was restated several times the
/// matched phrasings are space-joined and the answers newline-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAnswer {
    pub question_id: u64,
    pub question_text: String,
    pub answer_text: String,
}

/// A question and its reference answer, as parsed from a model answer file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAnswer {
    pub question_id: u64,
    pub question_text: String,
    pub answer_text: String,
}

/// An answer whose line was explicitly labeled `N.` by the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledAnswer {
    pub question_id: u64,
    pub student_answer: String,
}

/// The question / model answer / student answer triple handed to a grader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingItem {
    pub question_id: u64,
    pub question: String,
    pub model_answer: String,
    pub student_answer: String,
}
