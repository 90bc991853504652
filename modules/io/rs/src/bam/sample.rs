use eyre::Result;
use noodles::sam;

use super::header::header_text;

const SAMPLE_MARKER: &str = "SM:";

/// Find the first `SM:` marker among tab/newline separated header tokens and return the rest of
/// the token. Falls back to `default` when no token carries the marker. No validation is done.
pub fn extract_sample_name(header_text: &str, default: &str) -> String {
    header_text
        .split(['\t', '\n'])
        .filter(|token| !token.is_empty())
        .find_map(|token| {
            token
                .find(SAMPLE_MARKER)
                .map(|pos| token[pos + SAMPLE_MARKER.len()..].to_string())
        })
        .unwrap_or_else(|| default.to_string())
}

/// Sample label of a parsed alignment header.
pub fn sample_name(header: &sam::Header, default: &str) -> Result<String> {
    Ok(extract_sample_name(&header_text(header)?, default))
}
