/// Lowercase `text` and drop ASCII punctuation. Whitespace is left as is.
///
/// `None` normalizes to the empty string.
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(s) => s
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect(),
        None => String::new(),
    }
}
