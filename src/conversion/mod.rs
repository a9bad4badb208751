//! The inline conversion engine.
//!
//! Message text flows through the token extractor, then each token is tried
//! as a time first and a quantity second. Time parsing failing is the
//! expected fallthrough, not an error; a message with no recognizable
//! tokens simply produces no reply.

pub mod notices;
pub mod time_convert;
pub mod time_parse;
pub mod token;
pub mod unit_convert;
pub mod units;

#[cfg(test)]
mod test;

use crate::error::conversion::ConversionError;
use crate::profile::{ProfileStore, StoreError, UserId};

use notices::Notices;
use time_convert::{convert_times, TimeJob, TimezoneRow};
use token::{extract_tokens, Target, Token};
use unit_convert::convert_quantities;
use units::UnitRegistry;

/// Everything one message's tokens produced, ready for rendering.
#[derive(Debug, Default)]
pub struct Reply {
    /// `(original, converted)` quantity lines, in message order.
    pub quantity_lines: Vec<(String, String)>,
    /// Per-timezone time rows, ascending by UTC offset.
    pub time_rows: Vec<TimezoneRow>,
    /// Informational asides (resolved timezones, runner-ups).
    pub notes: Vec<String>,
    /// Reportable per-token failures.
    pub errors: Vec<ConversionError>,
}

impl Reply {
    /// True when there is nothing at all to send back.
    pub fn is_empty(&self) -> bool {
        self.quantity_lines.is_empty()
            && self.time_rows.is_empty()
            && self.notes.is_empty()
            && self.errors.is_empty()
    }
}

/// Runs the whole engine over one message.
///
/// # Arguments
/// - `store`: profile store collaborator
/// - `registry`: the unit registry
/// - `author`: the message author
/// - `members`: user ids of the guild the message was sent in
/// - `content`: raw message text
///
/// # Returns
/// - `Ok(Reply)`: may be empty, meaning no reply should be sent
/// - `Err(StoreError)`: the profile store was unreachable; the caller
///   should surface a retryable failure instead of staying silent
pub async fn convert_message(
    store: &dyn ProfileStore,
    registry: &UnitRegistry,
    author: UserId,
    members: &[UserId],
    content: &str,
) -> Result<Reply, StoreError> {
    let mut time_jobs: Vec<TimeJob> = Vec::new();
    let mut quantity_tokens: Vec<Token> = Vec::new();

    for token in extract_tokens(content) {
        // Explicit-empty target: fully silent, no fallback to defaults.
        if token.target == Target::Suppress {
            continue;
        }
        match time_parse::parse_time(&token.left) {
            Ok(parsed) => {
                let target = match token.target {
                    Target::Explicit(target) => Some(target),
                    _ => None,
                };
                time_jobs.push(TimeJob { parsed, target });
            }
            Err(time_parse::NotATime) => quantity_tokens.push(token),
        }
    }

    if time_jobs.is_empty() && quantity_tokens.is_empty() {
        return Ok(Reply::default());
    }

    let mut notices = Notices::new();
    let time_rows = convert_times(store, author, members, time_jobs, &mut notices).await?;
    let quantity_lines = convert_quantities(registry, &quantity_tokens, &mut notices);

    Ok(Reply {
        quantity_lines,
        time_rows,
        notes: notices.info,
        errors: notices.errors,
    })
}
