use sift_core::{ExtractedAnswer, GradingItem, LabeledAnswer, ModelAnswer};
use std::collections::HashMap;

/// Anything that carries a student's answer to a numbered question.
pub trait StudentAnswer {
    fn question_id(&self) -> u64;

    fn answer(&self) -> &str;
}

impl StudentAnswer for ExtractedAnswer {
    fn question_id(&self) -> u64 {
        self.question_id
    }

    fn answer(&self) -> &str {
        &self.answer_text
    }
}

impl StudentAnswer for LabeledAnswer {
    fn question_id(&self) -> u64 {
        self.question_id
    }

    fn answer(&self) -> &str {
        &self.student_answer
    }
}

/// Join a student's answers with the model answers sharing their question id.
///
/// Output follows the student's order. Answers to questions the model does
/// not cover are dropped; with duplicate model ids the first one wins.
pub fn pair_with_model<A: StudentAnswer>(model: &[ModelAnswer], answers: &[A]) -> Vec<GradingItem> {
    let mut by_id: HashMap<u64, &ModelAnswer> = HashMap::new();
    for entry in model {
        by_id.entry(entry.question_id).or_insert(entry);
    }

    answers
        .iter()
        .filter_map(|answer| {
            let reference = by_id.get(&answer.question_id())?;
            Some(GradingItem {
                question_id: answer.question_id(),
                question: reference.question_text.clone(),
                model_answer: reference.answer_text.clone(),
                student_answer: answer.answer().to_string(),
            })
        })
        .collect()
}
