use super::{open_output, read_input, source_label};
use anyhow::{Context, Result};
use sift_core::{MatchConfig, QuestionBank, TracingSink};
use sift_extract::Extractor;
use sift_render::{JsonWriter, JsonlWriter, OutputFormat};
use std::io::Write;
use std::path::Path;

pub fn run(
    submission: &Path,
    bank_path: &Path,
    config: MatchConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let bank_json = std::fs::read_to_string(bank_path)
        .with_context(|| format!("failed to read question bank {}", bank_path.display()))?;
    let bank = QuestionBank::from_json(&bank_json)
        .with_context(|| format!("invalid question bank {}", bank_path.display()))?;
    let text = read_input(submission)?;

    let sink = TracingSink;
    let threshold = config.threshold;
    let extractor = Extractor::new(config, &sink)?;
    let answers = extractor.extract(&text, &bank);

    tracing::info!(
        source = %source_label(submission),
        tokenizer = extractor.tokenizer_name(),
        questions = bank.len(),
        answers = answers.len(),
        "extraction complete"
    );

    let mut out = open_output(output)?;
    match format {
        OutputFormat::Json => JsonWriter::new().write_to(&mut out, &answers)?,
        OutputFormat::Jsonl => JsonlWriter::new(&source_label(submission), threshold)
            .questions(bank.len())
            .write_to(&mut out, &answers)?,
    }
    out.flush()?;
    Ok(())
}
