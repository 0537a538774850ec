use regex::Regex;
use std::sync::LazyLock;

/// A numbered item marker at the start of a line: `1.`, `2)`, `10. `.
static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("numbered marker pattern is valid"));

/// Whether a trimmed line opens a numbered section.
pub fn is_numbered_marker(line: &str) -> bool {
    NUMBERED_MARKER.is_match(line)
}

/// Line indices where numbered sections begin, ascending.
///
/// The end-of-document index (`lines.len()`) is always the last entry, so
/// every section has a terminal boundary.
pub fn find_boundaries<S: AsRef<str>>(lines: &[S]) -> Vec<usize> {
    let mut boundaries: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_numbered_marker(line.as_ref()))
        .map(|(i, _)| i)
        .collect();

    if boundaries.last() != Some(&lines.len()) {
        boundaries.push(lines.len());
    }
    boundaries
}

/// The first boundary strictly after `line_index`, or `fallback` if there is none.
pub fn next_boundary(boundaries: &[usize], line_index: usize, fallback: usize) -> usize {
    let pos = boundaries.partition_point(|&b| b <= line_index);
    boundaries.get(pos).copied().unwrap_or(fallback)
}
