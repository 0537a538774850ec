use crate::document::split_lines;
use regex::Regex;
use sift_core::LabeledAnswer;
use std::sync::LazyLock;

/// `N.` followed by the answer on the same line.
static LABELED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.(.*)").expect("labeled line pattern is valid"));

/// Answers a student labeled with their question number, one per line.
///
/// Only lines of the form `N. answer` count; continuation lines are ignored.
pub fn parse_labeled_answers(text: &str) -> Vec<LabeledAnswer> {
    split_lines(text)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let caps = LABELED_LINE.captures(line)?;
            let question_id = caps[1].parse::<u64>().ok()?;
            Some(LabeledAnswer {
                question_id,
                student_answer: caps[2].trim().to_string(),
            })
        })
        .collect()
}
