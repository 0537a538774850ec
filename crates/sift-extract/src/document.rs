use regex::Regex;
use std::sync::LazyLock;

/// Every line terminator a submission may use, `\r\n` first so it splits once.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]")
        .expect("line break pattern is valid")
});

/// Substrings that disqualify a line from being matched as a question.
const URL_MARKERS: &[&str] = &["http://", "https://"];

/// Prefix that drops a line from a harvested answer.
const URL_PREFIX: &str = "http";

/// A submission split into lines, kept both as written and trimmed.
///
/// Trimmed lines drive matching; raw lines are what answers are harvested from.
#[derive(Debug, Clone)]
pub struct Document<'t> {
    raw: Vec<&'t str>,
    stripped: Vec<&'t str>,
}

impl<'t> Document<'t> {
    pub fn parse(text: &'t str) -> Self {
        let raw = split_lines(text);
        let stripped = raw.iter().map(|line| line.trim()).collect();
        Self { raw, stripped }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn raw(&self) -> &[&'t str] {
        &self.raw
    }

    pub fn stripped(&self) -> &[&'t str] {
        &self.stripped
    }

    /// Lines that may restate a question: non-empty and free of URLs.
    pub fn eligible_lines(&self) -> impl Iterator<Item = (usize, &'t str)> + '_ {
        self.stripped
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, line)| is_eligible(line))
    }

    /// Answer text strictly between `start` and `end` (both line indices).
    ///
    /// Lines are trimmed; blank lines, lines starting with `http`, and lines
    /// carrying a URL anywhere are left out. Returns `None` when nothing remains.
    pub fn answer_between(&self, start: usize, end: usize) -> Option<String> {
        let end = end.min(self.raw.len());
        if start + 1 >= end {
            return None;
        }

        let lines: Vec<&str> = self.raw[start + 1..end]
            .iter()
            .map(|line| line.trim())
            .filter(|line| is_eligible(line) && !line.starts_with(URL_PREFIX))
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

/// Split on any line terminator, including lone `\r`, form feeds and the
/// Unicode line and paragraph separators. A trailing terminator does not
/// open an extra empty line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

fn is_eligible(line: &str) -> bool {
    !line.is_empty() && !URL_MARKERS.iter().any(|marker| line.contains(marker))
}
