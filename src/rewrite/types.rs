//! Line rewrite types and error types.
//!
//! Lines are handled as raw bytes: only the key and tag are required to be
//! text, so files with non-UTF-8 comments or values pass through untouched.

use thiserror::Error;

/// Prefix marking a comment line.
pub const COMMENT_PREFIX: u8 = b'#';

/// Separator between the `KEY=VALUE` part of a line and its tag.
pub const TAG_DELIMITER: u8 = b'/';

/// Separator between a key and its value.
pub const KEY_DELIMITER: u8 = b'=';

/// Classification of a single input line relative to a target key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLine<'line> {
    /// Starts with `#`; always passed through.
    Comment(&'line [u8]),
    /// Starts with the raw target key; must parse as `KEY=VALUE/TAG`.
    Candidate(&'line [u8]),
    /// Anything else; passed through.
    Other(&'line [u8]),
}

impl<'line> ConfigLine<'line> {
    /// Classify `line` against an already-trimmed `key`.
    #[must_use]
    pub fn classify(line: &'line [u8], key: &[u8]) -> Self {
        if line.first() == Some(&COMMENT_PREFIX) {
            Self::Comment(line)
        } else if line.starts_with(key) {
            Self::Candidate(line)
        } else {
            Self::Other(line)
        }
    }
}

/// How many prefix-matching lines a single scan rewrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Every candidate line is parsed and rewritten.
    #[default]
    All,
    /// Candidates after the first successful rewrite are passed through.
    First,
}

/// A key/tag pair, trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    key: String,
    new_tag: String,
}

impl RewriteRequest {
    /// Build a request from raw user input.
    ///
    /// Both values are trimmed. An empty key would prefix-match every line and is rejected.
    pub fn new(key: &str, new_tag: &str) -> Result<Self, RewriteError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(RewriteError::EmptyKey);
        }
        Ok(Self {
            key: key.to_string(),
            new_tag: new_tag.trim().to_string(),
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn new_tag(&self) -> &str {
        &self.new_tag
    }
}

/// Output of a successful scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteResult {
    /// Every output line without its terminator, in input order.
    pub lines: Vec<Vec<u8>>,
    /// 1-based numbers of the lines whose tag was replaced.
    pub modified: Vec<usize>,
}

impl RewriteResult {
    /// True when the scan changed nothing (no match, or an empty input).
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.modified.is_empty() || self.lines.is_empty()
    }

    /// Render the lines back to file content, newline-terminating each one.
    #[must_use]
    pub fn to_content(&self) -> Vec<u8> {
        self.lines.iter().fold(Vec::new(), |mut acc, line| {
            acc.extend_from_slice(line);
            acc.push(b'\n');
            acc
        })
    }
}

/// Line rewrite errors
///
/// Only the key of an offending line is kept; its value may be a secret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("Key cannot be empty")]
    EmptyKey,

    #[error("Unable to find the tag on line {line_number} (key '{key}')")]
    MalformedLine { line_number: usize, key: String },
}

/// The key portion of a line: text before the first `=` or `/`, trimmed.
#[must_use]
pub fn line_key(line: &[u8]) -> String {
    let head = line
        .split(|b| *b == KEY_DELIMITER || *b == TAG_DELIMITER)
        .next()
        .unwrap_or(line);
    String::from_utf8_lossy(head.trim_ascii()).into_owned()
}
