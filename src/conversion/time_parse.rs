use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// Grammar for a clock time with an optional trailing timezone hint.
///
/// The minute group is split by whether a colon was present; the ambiguity
/// rule below needs to know the difference.
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<hour>\d{1,2})(?:(?P<colon>:)(?P<colon_minute>\d{2})|(?P<bare_minute>\d{2}))?(?: ?(?P<period>am|pm))?(?: +(?P<hint>\S.*))?$",
    )
    .unwrap()
});

/// The time-of-day part of a parsed time token.
///
/// `Now` is already an instant and skips localization entirely; `Clock` stays
/// naive until the orchestrator attaches a source timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Clock(NaiveTime),
    Now,
}

/// A successfully parsed time expression, with the raw timezone hint text
/// that followed it (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTime {
    pub moment: Moment,
    pub hint: Option<String>,
}

/// The expected failure case: the string is not a time and should be handed
/// to the quantity parser instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotATime;

fn clock(hour: u32, minute: u32, hint: Option<String>) -> Result<ParsedTime, NotATime> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or(NotATime)?;
    Ok(ParsedTime {
        moment: Moment::Clock(time),
        hint,
    })
}

/// Parses a token's left-hand string as a time of day.
///
/// Accepted forms are the keywords `now`, `noon` and `midnight`, plus `H`,
/// `HMM`/`HHMM`, `H:MM`, each with an optional case-insensitive AM/PM marker.
/// Trailing text after the time is a free-text timezone hint.
///
/// A hint is only accepted when the string carries a colon or an AM/PM
/// marker: a bare `20 helsinki` would collide with quantity shorthand like
/// `20 km`, so it is rejected here and falls through to unit conversion.
///
/// # Returns
/// - `Ok(ParsedTime)`: the parsed time plus any hint text
/// - `Err(NotATime)`: not parseable as a time; try quantity parsing
pub fn parse_time(input: &str) -> Result<ParsedTime, NotATime> {
    let input = input.trim();

    // Keyword shortcuts, optionally followed by a hint.
    let (keyword, rest) = match input.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, Some(rest.trim().to_string())),
        None => (input, None),
    };
    match keyword.to_ascii_lowercase().as_str() {
        "now" => {
            return Ok(ParsedTime {
                moment: Moment::Now,
                hint: rest,
            })
        }
        "noon" => return clock(12, 0, rest),
        "midnight" => return clock(0, 0, rest),
        _ => {}
    }

    let captures = TIME_PATTERN.captures(input).ok_or(NotATime)?;

    let hour: u32 = captures["hour"].parse().map_err(|_| NotATime)?;
    let minute: u32 = captures
        .name("colon_minute")
        .or_else(|| captures.name("bare_minute"))
        .map(|m| m.as_str().parse().map_err(|_| NotATime))
        .transpose()?
        .unwrap_or(0);
    let period = captures.name("period").map(|m| m.as_str().to_lowercase());
    let hint = captures.name("hint").map(|m| m.as_str().to_string());

    // A trailing hint without a colon or AM/PM is ambiguous with a unit
    // expression, so it is not a time.
    if hint.is_some() && period.is_none() && captures.name("colon").is_none() {
        return Err(NotATime);
    }

    if minute > 59 {
        return Err(NotATime);
    }
    let hour = match period.as_deref() {
        Some(period) => {
            if !(1..=12).contains(&hour) {
                return Err(NotATime);
            }
            match period {
                "pm" => hour % 12 + 12,
                _ => hour % 12,
            }
        }
        None => {
            if hour > 23 {
                return Err(NotATime);
            }
            hour
        }
    };

    clock(hour, minute, hint)
}
