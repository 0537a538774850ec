use crate::boundary::{find_boundaries, next_boundary};
use crate::document::Document;
use rayon::prelude::*;
use sift_core::{
    DiagnosticSink, ExtractedAnswer, MatchConfig, QuestionBank, QuestionSpec, SiftError,
    TracingSink,
};
use sift_score::{Matcher, Tokenizer, select_tokenizer};
use std::collections::HashMap;

/// A line judged to restate one phrasing of a question.
#[derive(Debug, Clone, PartialEq)]
struct MatchRecord<'c> {
    line_index: usize,
    question_text: &'c str,
}

/// Locates the answer to every question of a bank inside a free-text submission.
///
/// Orchestrates boundary detection -> per-line matching -> span harvesting -> merge.
pub struct Extractor<'a> {
    config: MatchConfig,
    tokenizer: Box<dyn Tokenizer>,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Extractor<'a> {
    /// Validate `config` and select its tokenizer, reporting a fallback to `sink`.
    pub fn new(config: MatchConfig, sink: &'a dyn DiagnosticSink) -> Result<Self, SiftError> {
        config.validate()?;
        let tokenizer = select_tokenizer(config.tokenizer, sink);
        tracing::debug!(tokenizer = tokenizer.name(), threshold = config.threshold, "extractor ready");
        Ok(Self {
            config,
            tokenizer,
            sink,
        })
    }

    /// Use a specific tokenizer instead of the one `config` names.
    pub fn with_tokenizer(
        config: MatchConfig,
        tokenizer: Box<dyn Tokenizer>,
        sink: &'a dyn DiagnosticSink,
    ) -> Result<Self, SiftError> {
        config.validate()?;
        Ok(Self {
            config,
            tokenizer,
            sink,
        })
    }

    pub fn sink(&self) -> &'a dyn DiagnosticSink {
        self.sink
    }

    pub fn tokenizer_name(&self) -> &'static str {
        self.tokenizer.name()
    }

    /// Parse `bank_json` and extract; a malformed bank fails the whole call.
    pub fn extract_json(
        &self,
        text: &str,
        bank_json: &str,
    ) -> Result<Vec<ExtractedAnswer>, SiftError> {
        let bank = QuestionBank::from_json(bank_json)?;
        Ok(self.extract(text, &bank))
    }

    /// One merged answer per question id that matched at least one line,
    /// in bank order.
    pub fn extract(&self, text: &str, bank: &QuestionBank) -> Vec<ExtractedAnswer> {
        let doc = Document::parse(text);
        let boundaries = find_boundaries(doc.stripped());
        let matcher = Matcher::new(self.tokenizer.as_ref(), self.sink)
            .with_threshold(self.config.threshold);

        let specs: Vec<&QuestionSpec> = bank.complete().collect();

        // Indexed collect keeps bank order on the parallel path
        let sections: Vec<Vec<ExtractedAnswer>> = if self.config.parallel {
            specs
                .par_iter()
                .map(|spec| scan_question(&doc, &boundaries, spec, &matcher))
                .collect()
        } else {
            specs
                .iter()
                .map(|spec| scan_question(&doc, &boundaries, spec, &matcher))
                .collect()
        };

        let merged = merge(sections.into_iter().flatten());
        tracing::debug!(
            lines = doc.len(),
            questions = specs.len(),
            answers = merged.len(),
            "extraction finished"
        );
        merged
    }
}

/// Extract with the default tokenizer, logging diagnostics through `tracing`.
pub fn extract(
    text: &str,
    bank: &QuestionBank,
    threshold: f64,
) -> Result<Vec<ExtractedAnswer>, SiftError> {
    let config = MatchConfig::new().with_threshold(threshold);
    Ok(Extractor::new(config, &TracingSink)?.extract(text, bank))
}

/// As [`extract`], with the bank given as JSON text.
pub fn extract_json(
    text: &str,
    bank_json: &str,
    threshold: f64,
) -> Result<Vec<ExtractedAnswer>, SiftError> {
    let config = MatchConfig::new().with_threshold(threshold);
    Extractor::new(config, &TracingSink)?.extract_json(text, bank_json)
}

/// Every answer section for one question, in line order.
fn scan_question(
    doc: &Document<'_>,
    boundaries: &[usize],
    spec: &QuestionSpec,
    matcher: &Matcher<'_>,
) -> Vec<ExtractedAnswer> {
    let phrasings = matcher.prepare(&spec.questions);
    if phrasings.is_empty() {
        return Vec::new();
    }

    let matches: Vec<MatchRecord<'_>> = doc
        .eligible_lines()
        .filter_map(|(line_index, line)| {
            let best = matcher.best_prepared(line, &phrasings)?;
            tracing::debug!(
                question_id = spec.question_id,
                line_index,
                score = best.score,
                "line matched question"
            );
            Some(MatchRecord {
                line_index,
                question_text: best.candidate,
            })
        })
        .collect();

    if matches.is_empty() {
        return Vec::new();
    }

    // Another restatement of the same question also closes a section
    let mut local: Vec<usize> = matches
        .iter()
        .map(|m| m.line_index)
        .chain(boundaries.iter().copied())
        .collect();
    local.sort_unstable();
    local.dedup();

    matches
        .iter()
        .filter_map(|m| {
            let end = next_boundary(&local, m.line_index, doc.len());
            let answer_text = doc.answer_between(m.line_index, end)?;
            Some(ExtractedAnswer {
                question_id: spec.question_id,
                question_text: m.question_text.to_string(),
                answer_text,
            })
        })
        .collect()
}

/// Fold sections sharing a question id into one answer, keeping first-seen order.
fn merge(sections: impl IntoIterator<Item = ExtractedAnswer>) -> Vec<ExtractedAnswer> {
    let mut merged: Vec<ExtractedAnswer> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for section in sections {
        match index.get(&section.question_id) {
            Some(&i) => {
                let entry = &mut merged[i];
                entry.question_text.push(' ');
                entry.question_text.push_str(&section.question_text);
                entry.answer_text.push('\n');
                entry.answer_text.push_str(&section.answer_text);
            }
            None => {
                index.insert(section.question_id, merged.len());
                merged.push(section);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::{Diagnostic, MemorySink, TokenizerKind};
    use sift_score::WhitespaceTokenizer;

    const CAPITALS: &str =
        "1. What is the capital of France?\nParis is the capital.\n\n2. What is 2+2?\nFour.";

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            QuestionSpec::new(1, vec!["What is the capital of France?".to_string()]),
            QuestionSpec::new(2, vec!["What is 2+2?".to_string()]),
        ])
    }

    fn extractor(sink: &MemorySink) -> Extractor<'_> {
        Extractor::new(MatchConfig::default(), sink).unwrap()
    }

    #[test]
    fn extracts_numbered_answers() {
        let sink = MemorySink::new();
        let answers = extractor(&sink).extract(CAPITALS, &bank());

        assert_eq!(
            answers,
            vec![
                ExtractedAnswer {
                    question_id: 1,
                    question_text: "What is the capital of France?".to_string(),
                    answer_text: "Paris is the capital.".to_string(),
                },
                ExtractedAnswer {
                    question_id: 2,
                    question_text: "What is 2+2?".to_string(),
                    answer_text: "Four.".to_string(),
                },
            ]
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn carriage_return_line_endings_are_split() {
        let sink = MemorySink::new();
        let text = CAPITALS.replace('\n', "\r");
        let answers = extractor(&sink).extract(&text, &bank());

        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].answer_text, "Paris is the capital.");
        assert_eq!(answers[1].answer_text, "Four.");
    }

    #[test]
    fn unscorable_phrasing_is_reported_once_per_question() {
        let sink = MemorySink::new();
        let bank = QuestionBank::new(vec![QuestionSpec::new(
            1,
            vec!["???".to_string(), "What is the capital of France?".to_string()],
        )]);
        let mut text = String::from("1. What is the capital of France?\nParis is the capital.\n");
        for i in 0..50 {
            text.push_str(&format!("Filler sentence number {i}.\n"));
        }

        let answers = extractor(&sink).extract(&text, &bank);
        assert_eq!(answers.len(), 1);
        assert_eq!(sink.len(), 1);
        assert!(matches!(
            &sink.events()[0],
            Diagnostic::ScoreSkipped { candidate, .. } if candidate == "???"
        ));
    }

    #[test]
    fn unrelated_text_yields_nothing() {
        let sink = MemorySink::new();
        let answers = extractor(&sink).extract(
            "Completely unrelated content with no question markers.",
            &bank(),
        );
        assert!(answers.is_empty());
    }

    #[test]
    fn empty_text_yields_nothing() {
        let sink = MemorySink::new();
        assert!(extractor(&sink).extract("", &bank()).is_empty());
    }

    #[test]
    fn matched_line_is_not_part_of_its_answer() {
        let sink = MemorySink::new();
        let answers = extractor(&sink).extract(CAPITALS, &bank());
        for answer in &answers {
            assert!(!answer.answer_text.contains("What is"));
        }
    }

    #[test]
    fn unnumbered_restatements_close_each_other() {
        let sink = MemorySink::new();
        let text = "What is the capital of France?\nParis.\nWhat is 2+2?\nFour.";
        let answers = extractor(&sink).extract(text, &bank());

        // No numbered markers: each match ends only at the document end,
        // except where another match of the same question intervenes
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].answer_text, "Paris.\nWhat is 2+2?\nFour.");
        assert_eq!(answers[1].answer_text, "Four.");
    }

    #[test]
    fn repeated_question_sections_are_merged() {
        let sink = MemorySink::new();
        let bank = QuestionBank::new(vec![QuestionSpec::new(
            7,
            vec!["Explain the offside rule in rugby".to_string()],
        )]);
        let text = "1. Explain the offside rule in rugby\nA\n2. Something else entirely\nignored\n\
                    3. Explain the offside rule in rugby\nB";
        let answers = extractor(&sink).extract(text, &bank);

        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].question_id, 7);
        assert_eq!(answers[0].answer_text, "A\nB");
        assert_eq!(
            answers[0].question_text,
            "Explain the offside rule in rugby Explain the offside rule in rugby"
        );
    }

    #[test]
    fn duplicate_ids_in_bank_merge_in_bank_order() {
        let sink = MemorySink::new();
        let bank = QuestionBank::new(vec![
            QuestionSpec::new(4, vec!["What is 2+2?".to_string()]),
            QuestionSpec::new(1, vec!["What is the capital of France?".to_string()]),
            QuestionSpec::new(4, vec!["What is the capital of France?".to_string()]),
        ]);
        let answers = extractor(&sink).extract(CAPITALS, &bank);

        let ids: Vec<u64> = answers.iter().map(|a| a.question_id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert_eq!(answers[0].answer_text, "Four.\nParis is the capital.");
    }

    #[test]
    fn empty_answer_span_is_discarded() {
        let sink = MemorySink::new();
        let text = "1. What is the capital of France?\n\n2. What is 2+2?\nFour.";
        let answers = extractor(&sink).extract(text, &bank());
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].question_id, 2);
    }

    #[test]
    fn url_lines_are_never_matched_or_harvested() {
        let sink = MemorySink::new();
        let bank = QuestionBank::new(vec![QuestionSpec::new(
            1,
            vec!["What is the capital of France? https://example.com".to_string()],
        )]);
        let text = "What is the capital of France? https://example.com\nParis\n\
                    1. What is the capital of France?\nParis\nhttps://example.com\n\
                    read https://example.com";
        let answers = extractor(&sink).extract(text, &bank);

        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].answer_text, "Paris");
        assert!(!answers.iter().any(|a| a.answer_text.contains("example.com")));
    }

    #[test]
    fn incomplete_bank_entries_are_skipped() {
        let sink = MemorySink::new();
        let bank = QuestionBank::new(vec![
            QuestionSpec::new(0, vec!["What is the capital of France?".to_string()]),
            QuestionSpec::new(2, Vec::new()),
        ]);
        assert!(extractor(&sink).extract(CAPITALS, &bank).is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn low_similarity_line_is_rejected() {
        let sink = MemorySink::new();
        let bank = QuestionBank::new(vec![QuestionSpec::new(
            1,
            vec!["What is the capital of France?".to_string()],
        )]);
        // "2. What is 2+2?" scores about 0.10 against this phrasing
        let answers = extractor(&sink).extract("2. What is 2+2?\nFour.", &bank);
        assert!(answers.is_empty());
    }

    #[test]
    fn lower_threshold_admits_paraphrase() {
        let sink = MemorySink::new();
        let bank = QuestionBank::new(vec![QuestionSpec::new(
            1,
            vec!["What is the capital of France?".to_string()],
        )]);
        let config = MatchConfig::new().with_threshold(0.1);
        let answers = Extractor::new(config, &sink)
            .unwrap()
            .extract("2. What is 2+2?\nFour.", &bank);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].answer_text, "Four.");
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let sink = MemorySink::new();
        let mut specs = Vec::new();
        let mut text = String::new();
        for i in 1..=40u64 {
            specs.push(QuestionSpec::new(
                i,
                vec![format!("Describe topic number {i} in detail")],
            ));
            text.push_str(&format!(
                "{i}. Describe topic number {i} in detail\nAnswer for {i}\n\n"
            ));
        }
        let bank = QuestionBank::new(specs);

        let parallel = Extractor::new(MatchConfig::new(), &sink)
            .unwrap()
            .extract(&text, &bank);
        let sequential = Extractor::new(MatchConfig::new().sequential(), &sink)
            .unwrap()
            .extract(&text, &bank);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.len(), 40);
        assert_eq!(parallel[0].question_id, 1);
        assert_eq!(parallel[39].answer_text, "Answer for 40");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let sink = MemorySink::new();
        let ex = extractor(&sink);
        let first = ex.extract(CAPITALS, &bank());
        for _ in 0..5 {
            assert_eq!(ex.extract(CAPITALS, &bank()), first);
        }
    }

    #[test]
    fn whitespace_tokenizer_gives_same_result_on_plain_text() {
        let sink = MemorySink::new();
        let ex = Extractor::with_tokenizer(
            MatchConfig::new().with_tokenizer(TokenizerKind::Whitespace),
            Box::new(WhitespaceTokenizer),
            &sink,
        )
        .unwrap();
        assert_eq!(ex.tokenizer_name(), "whitespace");
        assert_eq!(ex.extract(CAPITALS, &bank()), extractor(&sink).extract(CAPITALS, &bank()));
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let sink = MemorySink::new();
        let err = Extractor::new(MatchConfig::new().with_threshold(2.0), &sink)
            .err()
            .unwrap();
        assert!(matches!(err, SiftError::Config(_)));
    }

    #[test]
    fn extract_json_rejects_malformed_bank() {
        let sink = MemorySink::new();
        let ex = extractor(&sink);
        assert!(matches!(
            ex.extract_json(CAPITALS, "not json"),
            Err(SiftError::Parse(_))
        ));
        assert!(matches!(
            ex.extract_json(CAPITALS, r#"{"question_id": 1}"#),
            Err(SiftError::Bank(_))
        ));
    }

    #[test]
    fn free_function_matches_extractor() {
        let bank_json = r#"[{"question_id":1,"questions":["What is the capital of France?"]},
                            {"question_id":2,"questions":["What is 2+2?"]}]"#;
        let answers = extract_json(CAPITALS, bank_json, 0.25).unwrap();
        assert_eq!(answers, extract(CAPITALS, &bank(), 0.25).unwrap());
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn merge_joins_in_encounter_order() {
        let merged = merge(vec![
            ExtractedAnswer {
                question_id: 7,
                question_text: "q1".to_string(),
                answer_text: "A".to_string(),
            },
            ExtractedAnswer {
                question_id: 3,
                question_text: "other".to_string(),
                answer_text: "X".to_string(),
            },
            ExtractedAnswer {
                question_id: 7,
                question_text: "q2".to_string(),
                answer_text: "B".to_string(),
            },
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].question_text, "q1 q2");
        assert_eq!(merged[0].answer_text, "A\nB");
        assert_eq!(merged[1].question_id, 3);
    }
}
