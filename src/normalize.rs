//! Byline stripping and paragraph flattening.

/// Drop a leading byline such as `記者王小明／台北報導`.
///
/// The text is split on `delimiter`; when at least one delimiter is present
/// only the segment right after the first one is kept, otherwise the text is
/// returned unchanged.
pub fn strip_byline(text: &str, delimiter: &str) -> String {
    let mut segments = text.split(delimiter);
    let first = segments.next().unwrap_or_default();
    segments.next().unwrap_or(first).to_string()
}

/// Flatten paragraphs into one line, with `joiner` after every paragraph.
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S], joiner: &str) -> String {
    paragraphs.iter().fold(String::new(), |mut line, p| {
        line.push_str(p.as_ref());
        line.push_str(joiner);
        line
    })
}
