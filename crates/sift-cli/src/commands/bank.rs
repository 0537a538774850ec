use super::{open_output, read_input};
use anyhow::Result;
use sift_core::QuestionBank;
use sift_extract::parse_model_answers;
use sift_render::JsonWriter;
use std::io::Write;
use std::path::Path;

pub fn run(model: &Path, answers: bool, output: Option<&Path>) -> Result<()> {
    let text = read_input(model)?;
    let parsed = parse_model_answers(&text);
    tracing::debug!(entries = parsed.len(), "parsed model answers");

    let mut out = open_output(output)?;
    if answers {
        JsonWriter::new().write_to(&mut out, &parsed)?;
    } else {
        JsonWriter::new().write_to(&mut out, &QuestionBank::from_model_answers(&parsed))?;
    }
    out.flush()?;
    Ok(())
}
