use super::{open_output, read_input, source_label};
use anyhow::{Context, Result};
use sift_core::{MatchConfig, QuestionBank, TracingSink};
use sift_extract::{Extractor, pair_with_model, parse_labeled_answers, parse_model_answers};
use sift_render::JsonWriter;
use std::io::Write;
use std::path::Path;

pub fn run(
    submission: &Path,
    model_path: &Path,
    labeled: bool,
    config: MatchConfig,
    output: Option<&Path>,
) -> Result<()> {
    let model_text = std::fs::read_to_string(model_path)
        .with_context(|| format!("failed to read model answers {}", model_path.display()))?;
    let model = parse_model_answers(&model_text);
    if model.is_empty() {
        anyhow::bail!("no numbered questions found in {}", model_path.display());
    }

    let text = read_input(submission)?;
    let items = if labeled {
        pair_with_model(&model, &parse_labeled_answers(&text))
    } else {
        let sink = TracingSink;
        let extractor = Extractor::new(config, &sink)?;
        let bank = QuestionBank::from_model_answers(&model);
        pair_with_model(&model, &extractor.extract(&text, &bank))
    };

    tracing::info!(
        source = %source_label(submission),
        paired = items.len(),
        "pairing complete"
    );

    let mut out = open_output(output)?;
    JsonWriter::new().write_to(&mut out, &items)?;
    out.flush()?;
    Ok(())
}
