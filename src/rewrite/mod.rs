//! Key lookup and tag replacement for `KEY=VALUE/TAG` files.
mod rewriter;
mod types;

pub use rewriter::{replace_tag, rewrite_lines};
pub use types::{
    line_key, ConfigLine, MatchPolicy, RewriteError, RewriteRequest, RewriteResult, COMMENT_PREFIX,
    KEY_DELIMITER, TAG_DELIMITER,
};

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod tests;
