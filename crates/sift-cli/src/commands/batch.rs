use super::open_output;
use anyhow::{Context, Result};
use sift_core::{MatchConfig, QuestionBank, TracingSink};
use sift_extract::{BatchRunner, Extractor, find_model_file, parse_model_answers};
use sift_render::JsonWriter;
use std::io::Write;
use std::path::Path;

pub fn run(
    folder: &Path,
    bank_path: Option<&Path>,
    config: MatchConfig,
    output: Option<&Path>,
) -> Result<()> {
    let bank = match bank_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read question bank {}", path.display()))?;
            QuestionBank::from_json(&json)
                .with_context(|| format!("invalid question bank {}", path.display()))?
        }
        None => {
            let model_path = find_model_file(folder)?;
            let text = std::fs::read_to_string(&model_path)
                .with_context(|| format!("failed to read {}", model_path.display()))?;
            tracing::debug!(model = %model_path.display(), "deriving question bank");
            QuestionBank::from_model_answers(&parse_model_answers(&text))
        }
    };

    if bank.is_empty() {
        anyhow::bail!("question bank for {} is empty", folder.display());
    }

    let sink = TracingSink;
    let extractor = Extractor::new(config, &sink)?;
    let report = BatchRunner::new(folder, &extractor).run(&bank)?;

    let answers: usize = report.values().map(Vec::len).sum();
    tracing::info!(
        students = report.len(),
        answers,
        "batch complete"
    );

    let mut out = open_output(output)?;
    JsonWriter::new().write_to(&mut out, &report)?;
    out.flush()?;
    Ok(())
}
