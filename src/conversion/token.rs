use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one `{...}` span. Nested or empty braces never form a token.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// The right-hand side of a conversion token.
///
/// `Default` means no `>` delimiter was present and the paired unit (or the
/// guild's timezones) should be used. `Explicit` carries a user-named target.
/// `Suppress` means the delimiter was present but the right side trimmed to
/// nothing; such a token produces no output at all, not even an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Default,
    Explicit(String),
    Suppress,
}

/// One `{left > target}` span pulled out of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub left: String,
    pub target: Target,
}

/// Scans message text for `{...}` conversion tokens.
///
/// Each span is split on the first `>` into a left-hand expression and an
/// optional target. Spans whose left side trims to nothing are skipped.
///
/// # Arguments
/// - `text`: raw message content
///
/// # Returns
/// A lazy iterator over the tokens found in `text`, in message order.
pub fn extract_tokens(text: &str) -> impl Iterator<Item = Token> + '_ {
    TOKEN_PATTERN.captures_iter(text).filter_map(|captures| {
        let body = &captures[1];
        let (left, target) = match body.split_once('>') {
            None => (body.trim(), Target::Default),
            Some((left, right)) => {
                let right = right.trim();
                let target = if right.is_empty() {
                    Target::Suppress
                } else {
                    Target::Explicit(right.to_string())
                };
                (left.trim(), target)
            }
        };
        if left.is_empty() {
            return None;
        }
        Some(Token {
            left: left.to_string(),
            target,
        })
    })
}
