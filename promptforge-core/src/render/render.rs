use regex::Regex;

/// Section lines look like "C – Kontext: ..." with an uppercase-letter run
/// before the dash. Only a match at the very start of the line counts.
pub(crate) const SECTION_HEADER_PATTERN: &str = r"^([A-Z]+) – ";

/// One display line derived from the prompt body. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedLine {
    Plain(String),
    Sectioned {
        /// Matched prefix including the dash, e.g. "C – "
        header: String,
        content: String,
    },
}

/// Lazily turn a prompt body into display lines: trim each line, drop
/// empties, split section headers from their content. Recomputed from
/// scratch for every new body.
pub fn format_body(body: &str) -> impl Iterator<Item = FormattedLine> + '_ {
    let header = Regex::new(SECTION_HEADER_PATTERN).unwrap();

    body.lines().filter_map(move |line| {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(match header.find(trimmed) {
            Some(m) => FormattedLine::Sectioned {
                header: trimmed[..m.end()].to_string(),
                content: trimmed[m.end()..].trim().to_string(),
            },
            None => FormattedLine::Plain(trimmed.to_string()),
        })
    })
}
