//! Tag replacement over a sequence of lines.

use super::types::{
    line_key, ConfigLine, MatchPolicy, RewriteError, RewriteRequest, RewriteResult,
    KEY_DELIMITER, TAG_DELIMITER,
};
use tracing::debug;

/// Replace the tag on a single candidate line.
///
/// The line must split on `/` into exactly two parts, and the text left of the
/// first `=` must equal the key once trimmed. A key that is only a prefix of the
/// line's key (`DB` against `DB_HOST=...`) fails here.
pub fn replace_tag(
    line: &[u8],
    line_number: usize,
    request: &RewriteRequest,
) -> Result<Vec<u8>, RewriteError> {
    let malformed = || RewriteError::MalformedLine {
        line_number,
        key: line_key(line),
    };

    let mut parts = line.split(|b| *b == TAG_DELIMITER);
    let (Some(head), Some(_old_tag), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let file_key = head
        .split(|b| *b == KEY_DELIMITER)
        .next()
        .unwrap_or(head);
    if file_key.trim_ascii() != request.key().as_bytes() {
        return Err(malformed());
    }

    let mut updated = head.to_vec();
    updated.push(TAG_DELIMITER);
    updated.extend_from_slice(request.new_tag().as_bytes());
    Ok(updated)
}

/// Rewrite every line whose key matches the request.
///
/// Comment lines and lines that do not start with the key are copied as-is.
/// Any candidate line that fails to parse aborts the whole scan, so callers
/// never see partial output.
pub fn rewrite_lines<I, S>(
    lines: I,
    request: &RewriteRequest,
    policy: MatchPolicy,
) -> Result<RewriteResult, RewriteError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut result = RewriteResult::default();
    let key = request.key().as_bytes();

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let line_number = idx.saturating_add(1);
        let done = policy == MatchPolicy::First && !result.modified.is_empty();

        match ConfigLine::classify(line, key) {
            ConfigLine::Candidate(candidate) if !done => {
                let updated = replace_tag(candidate, line_number, request)?;
                debug!("Replaced tag of {} on line {}", request.key(), line_number);
                result.lines.push(updated);
                result.modified.push(line_number);
            }
            ConfigLine::Comment(other) | ConfigLine::Candidate(other) | ConfigLine::Other(other) => {
                result.lines.push(other.to_vec());
            }
        }
    }

    Ok(result)
}
