use regex::Regex;
use sift_core::ModelAnswer;
use std::sync::LazyLock;

static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("block separator pattern is valid"));

/// `N)` or `N.` opening a question line, capturing the id and the question.
static QUESTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)[).](.*)").expect("question line pattern is valid"));

/// Parse a model answer document into numbered question/answer pairs.
///
/// Blocks are separated by blank lines. Anything before the first numbered
/// block is treated as preamble. Within a numbered block the first line is
/// the question and the rest is the answer.
pub fn parse_model_answers(text: &str) -> Vec<ModelAnswer> {
    let text = text.replace("\r\n", "\n");

    BLOCK_SEPARATOR
        .split(&text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .skip_while(|block| !QUESTION_LINE.is_match(block))
        .filter_map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Option<ModelAnswer> {
    let (question_line, answer) = match block.split_once('\n') {
        Some((first, rest)) => (first, rest.trim()),
        None => (block, ""),
    };

    let caps = QUESTION_LINE.captures(question_line)?;
    let question_id = caps[1].parse::<u64>().ok()?;
    Some(ModelAnswer {
        question_id,
        question_text: caps[2].trim().to_string(),
        answer_text: answer.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "Rugby Football Club\nAssessment 1\n\n\
                         1) What is a scrum?\nA set piece restart.\nEight players bind.\n\n\
                         2. Explain the offside rule\nPlayers ahead of the ball are out of play.\n\n\n\
                         A stray note without a number\n\n\
                         3) Name the governing body\n";

    #[test]
    fn skips_preamble_and_parses_blocks() {
        let model = parse_model_answers(MODEL);
        assert_eq!(model.len(), 3);

        assert_eq!(model[0].question_id, 1);
        assert_eq!(model[0].question_text, "What is a scrum?");
        assert_eq!(model[0].answer_text, "A set piece restart.\nEight players bind.");

        assert_eq!(model[1].question_id, 2);
        assert_eq!(model[1].question_text, "Explain the offside rule");
    }

    #[test]
    fn question_without_answer_has_empty_answer() {
        let model = parse_model_answers(MODEL);
        assert_eq!(model[2].question_id, 3);
        assert_eq!(model[2].answer_text, "");
    }

    #[test]
    fn unnumbered_blocks_after_first_question_are_dropped() {
        let model = parse_model_answers(MODEL);
        assert!(!model.iter().any(|m| m.question_text.contains("stray")));
    }

    #[test]
    fn windows_line_endings() {
        let model = parse_model_answers("1. Q one\r\nA one\r\n\r\n2. Q two\r\nA two\r\n");
        assert_eq!(model.len(), 2);
        assert_eq!(model[1].answer_text, "A two");
    }

    #[test]
    fn no_numbered_blocks_yields_nothing() {
        assert!(parse_model_answers("just prose\n\nmore prose").is_empty());
    }
}
