//! Pure formatting of the composite status line

/// One renderable entry of the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Display prefix, usually an icon glyph; may be empty
    pub prefix: String,
    /// The value to show
    pub value: String,
}

/// Join segments into the final status string
///
/// Empty input yields an empty string; the result carries no leading or
/// trailing whitespace.
pub fn render(segments: &[Segment], separator: &str) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|segment| {
            if segment.prefix.is_empty() {
                segment.value.clone()
            } else {
                format!("{} {}", segment.prefix, segment.value)
            }
        })
        .collect();

    parts.join(separator).trim().to_string()
}
