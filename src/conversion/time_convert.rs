use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::conversion::ConversionError;
use crate::profile::{ProfileStore, StoreError, UserId};
use crate::timezone::{fuzzy_match_timezone, FuzzySettings};

use super::notices::Notices;
use super::time_parse::{Moment, ParsedTime};

/// Fuzzy-matching knobs used for inline hint/target resolution.
const HINT_SETTINGS: FuzzySettings = FuzzySettings {
    best_match_threshold: 50,
    score_cutoff: 50,
    limit: 5,
};

/// One time token awaiting conversion: the parsed time plus the token's
/// explicit output timezone text, if any.
#[derive(Debug, Clone)]
pub struct TimeJob {
    pub parsed: ParsedTime,
    pub target: Option<String>,
}

/// One line of the reply: a timezone and every converted time in it, in
/// token order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimezoneRow {
    pub zone: &'static str,
    pub times: Vec<DateTime<Tz>>,
}

/// Resolves free text to a timezone, reporting failure and surfacing the
/// choice (plus close runner-ups) as asides.
fn resolve_timezone(text: &str, notices: &mut Notices) -> Option<Tz> {
    let matches = fuzzy_match_timezone(text, HINT_SETTINGS);
    let Some(best) = matches.best_match else {
        tracing::debug!("No timezone match for {text:?}");
        notices.push_error(ConversionError::TimezoneNotFound(text.to_string()));
        return None;
    };

    let mut aside = format!("Using timezone **{best}**");
    let runner_ups: Vec<&str> = matches
        .matches
        .iter()
        .skip(1)
        .take(4)
        .map(|(name, _)| *name)
        .collect();
    if !runner_ups.is_empty() {
        // A tie for the top score means the pick was arbitrary; say so.
        let label = if matches.has_multiple_best_matches {
            "equally good matches"
        } else {
            "other matches"
        };
        aside.push_str(&format!(" ({label}: {})", runner_ups.join(", ")));
    }
    notices.push_info(aside);
    Some(best)
}

/// Localizes a parsed time in a source timezone, producing a UTC instant.
///
/// Clock times get today's date as seen from the source timezone. A clock
/// time that doesn't exist there (DST spring-forward gap) is skipped.
fn localize(moment: Moment, source: Tz) -> Option<DateTime<Utc>> {
    match moment {
        Moment::Now => Some(Utc::now()),
        Moment::Clock(time) => {
            let today = Utc::now().with_timezone(&source).date_naive();
            let local = source.from_local_datetime(&today.and_time(time)).earliest();
            if local.is_none() {
                tracing::warn!("Local time {time} doesn't exist in {source} today");
            }
            local.map(|dt| dt.to_utc())
        }
    }
}

fn row_mut<'a>(rows: &'a mut Vec<TimezoneRow>, zone: Tz) -> &'a mut TimezoneRow {
    let position = rows.iter().position(|row| row.zone == zone.name());
    match position {
        Some(index) => &mut rows[index],
        None => {
            rows.push(TimezoneRow {
                zone: zone.name(),
                times: Vec::new(),
            });
            rows.last_mut().unwrap()
        }
    }
}

/// Converts a message's time tokens into per-timezone rows.
///
/// The guild's public timezones are fetched once per message and used as
/// the output set for every token without an explicit target; tokens with
/// an explicit target project into that single timezone instead. The
/// asking user's stored timezone is fetched lazily at most once, and the
/// missing-timezone notice is reported at most once per message. Rows come
/// back sorted ascending by the UTC offset of their first time (stable).
///
/// # Arguments
/// - `store`: profile store collaborator
/// - `author`: the asking user
/// - `members`: user ids of the invoking guild's members
/// - `jobs`: parsed time tokens in message order
/// - `notices`: per-message accumulator for asides and errors
///
/// # Returns
/// - `Ok(rows)`: possibly empty; empty means nothing to say, not an error
/// - `Err(StoreError)`: the profile store was unreachable
pub async fn convert_times(
    store: &dyn ProfileStore,
    author: UserId,
    members: &[UserId],
    jobs: Vec<TimeJob>,
    notices: &mut Notices,
) -> Result<Vec<TimezoneRow>, StoreError> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    // The output timezone set, computed once per message.
    let guild_zones = store.public_timezones(members).await?;
    tracing::debug!("Guild public timezones: {guild_zones:?}");

    // The author's stored timezone, fetched at most once.
    let mut author_zone: Option<Option<Tz>> = None;

    let mut rows: Vec<TimezoneRow> = Vec::new();
    for job in jobs {
        let source = match &job.parsed.hint {
            Some(hint) => match resolve_timezone(hint, notices) {
                Some(zone) => Some(zone),
                None => continue,
            },
            None => match job.parsed.moment {
                // `now` is already an instant; no source needed.
                Moment::Now => None,
                Moment::Clock(_) => {
                    let zone = match author_zone {
                        Some(zone) => zone,
                        None => {
                            let fetched = store.timezone_of(author).await?;
                            author_zone = Some(fetched);
                            fetched
                        }
                    };
                    match zone {
                        Some(zone) => Some(zone),
                        None => {
                            notices.push_error_once(ConversionError::UserTimezoneUnset);
                            continue;
                        }
                    }
                }
            },
        };

        let Some(instant) = localize(job.parsed.moment, source.unwrap_or(chrono_tz::UTC)) else {
            continue;
        };

        match &job.target {
            Some(target) => {
                let Some(zone) = resolve_timezone(target, notices) else {
                    continue;
                };
                row_mut(&mut rows, zone)
                    .times
                    .push(instant.with_timezone(&zone));
            }
            None => {
                for &zone in &guild_zones {
                    row_mut(&mut rows, zone)
                        .times
                        .push(instant.with_timezone(&zone));
                }
            }
        }
    }

    // Ascending by UTC offset of the first time in each row; the sort is
    // stable, so equal offsets keep insertion order.
    rows.sort_by_key(|row| {
        row.times
            .first()
            .map(|time| time.offset().fix().local_minus_utc())
    });

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests a clear fuzzy match leaves an aside naming the chosen zone.
    #[test]
    fn city_hint_resolves_with_aside() {
        let mut notices = Notices::new();
        let zone = resolve_timezone("helsinki", &mut notices);
        assert_eq!(zone, Some(Tz::Europe__Helsinki));
        assert!(notices.info[0].starts_with("Using timezone **Europe/Helsinki**"));
        assert!(notices.errors.is_empty());
    }

    /// Tests a tie for the top score is called out instead of presented as
    /// a confident pick.
    #[test]
    fn tied_candidates_are_called_out() {
        let mut notices = Notices::new();
        let zone = resolve_timezone("mexico", &mut notices);
        assert!(zone.is_some());
        assert!(notices.info[0].contains("equally good matches"));
    }

    /// Tests an unresolvable hint is reported by its original text.
    #[test]
    fn unresolvable_hint_reports() {
        let mut notices = Notices::new();
        assert_eq!(resolve_timezone("qqqqxx", &mut notices), None);
        assert_eq!(
            notices.errors,
            vec![ConversionError::TimezoneNotFound("qqqqxx".to_string())]
        );
    }
}
