use serde::Serialize;
use sift_core::ExtractedAnswer;
use std::io::Write;

/// Writes extracted answers as JSONL: header, one line per answer, footer.
pub struct JsonlWriter {
    source: String,
    threshold: f64,
    questions: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Header {
    version: String,
    source: String,
    threshold: f64,
    questions: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Footer {
    total_answers: usize,
    answer_lines: usize,
}

impl JsonlWriter {
    pub fn new(source: &str, threshold: f64) -> Self {
        Self {
            source: source.to_string(),
            threshold,
            questions: 0,
        }
    }

    /// Number of questions in the bank the answers were matched against.
    pub fn questions(mut self, questions: usize) -> Self {
        self.questions = questions;
        self
    }

    /// Render answers as a JSONL string.
    pub fn render(&self, answers: &[ExtractedAnswer]) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, answers)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write JSONL output to a writer.
    pub fn write_to(
        &self,
        writer: &mut dyn Write,
        answers: &[ExtractedAnswer],
    ) -> anyhow::Result<()> {
        // Header
        let header = Header {
            version: "1".to_string(),
            source: self.source.clone(),
            threshold: self.threshold,
            questions: self.questions,
        };
        serde_json::to_writer(&mut *writer, &header)?;
        writeln!(writer)?;

        // Answers
        let mut answer_lines = 0usize;
        for answer in answers {
            serde_json::to_writer(&mut *writer, answer)?;
            writeln!(writer)?;
            answer_lines += answer.answer_text.lines().count();
        }

        // Footer
        let footer = Footer {
            total_answers: answers.len(),
            answer_lines,
        };
        serde_json::to_writer(&mut *writer, &footer)?;
        writeln!(writer)?;

        Ok(())
    }
}
