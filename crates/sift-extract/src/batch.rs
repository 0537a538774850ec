use crate::extractor::Extractor;
use crate::submissions::SubmissionScanner;
use sift_core::{Diagnostic, ExtractedAnswer, QuestionBank};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Extracted answers per student, ordered by student name.
pub type BatchReport = BTreeMap<String, Vec<ExtractedAnswer>>;

/// Orchestrates scan -> read -> extract for every submission in a course folder.
pub struct BatchRunner<'a> {
    root: &'a Path,
    extractor: &'a Extractor<'a>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(root: &'a Path, extractor: &'a Extractor<'a>) -> Self {
        Self { root, extractor }
    }

    /// Unreadable submissions are reported to the extractor's sink and left out.
    pub fn run(&self, bank: &QuestionBank) -> anyhow::Result<BatchReport> {
        let submissions = SubmissionScanner::new(self.root).scan()?;
        let mut report = BatchReport::new();

        for submission in submissions {
            let text = match fs::read_to_string(&submission.path) {
                Ok(t) => t,
                Err(err) => {
                    self.extractor.sink().emit(Diagnostic::SubmissionSkipped {
                        student: submission.student,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let answers = self.extractor.extract(&text, bank);
            tracing::info!(
                student = %submission.student,
                answers = answers.len(),
                "extracted submission"
            );
            report.insert(submission.student, answers);
        }

        Ok(report)
    }
}
