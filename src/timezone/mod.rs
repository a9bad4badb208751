//! Fuzzy resolution of free-text timezone names.
//!
//! Users write things like `new york` or `helsinki`; the IANA database
//! calls them `America/New_York` and `Europe/Helsinki`. Candidates are
//! scored 0-100 with an indel-based similarity over separator-normalized
//! lowercase names, which lets a bare city name score well against its
//! region-qualified zone.

use chrono_tz::{Tz, TZ_VARIANTS};

/// Knobs for [`fuzzy_match_timezone`].
#[derive(Debug, Clone, Copy)]
pub struct FuzzySettings {
    /// Score the top candidate must reach to count as the best match.
    pub best_match_threshold: u32,
    /// Candidates scoring below this are dropped entirely.
    pub score_cutoff: u32,
    /// Maximum number of candidates kept.
    pub limit: usize,
}

impl Default for FuzzySettings {
    fn default() -> Self {
        Self {
            best_match_threshold: 75,
            score_cutoff: 50,
            limit: 5,
        }
    }
}

/// Scored candidates for one lookup.
#[derive(Debug, Clone)]
pub struct TimezoneMatches {
    /// Candidate zone names with scores, best first. Ties keep the zone
    /// table's order.
    pub matches: Vec<(&'static str, u32)>,
    pub best_match: Option<Tz>,
    pub has_multiple_best_matches: bool,
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '_' => ' ',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Longest common subsequence length over chars; zone names are short
/// enough that the quadratic table is irrelevant.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Similarity ratio 0-100: matched characters over total characters, the
/// classic sequence-matcher formula.
fn ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0;
    }
    (200 * lcs_length(&a, &b) / total) as u32
}

/// Fuzzily matches free text against the IANA zone list.
///
/// # Arguments
/// - `text`: the user's timezone guess
/// - `settings`: threshold/cutoff/limit knobs
///
/// # Returns
/// The kept candidates plus the best match, if any candidate cleared the
/// threshold.
pub fn fuzzy_match_timezone(text: &str, settings: FuzzySettings) -> TimezoneMatches {
    let needle = normalize(text);

    let mut matches: Vec<(&'static str, u32)> = TZ_VARIANTS
        .iter()
        .filter_map(|tz| {
            let name = tz.name();
            let score = ratio(&needle, &normalize(name));
            (score >= settings.score_cutoff).then_some((name, score))
        })
        .collect();
    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches.truncate(settings.limit);

    let best_match = matches
        .first()
        .filter(|(_, score)| *score >= settings.best_match_threshold)
        .and_then(|(name, _)| name.parse().ok());
    let has_multiple_best_matches = best_match.is_some()
        && matches.len() > 1
        && matches[1].1 == matches[0].1;

    TimezoneMatches {
        matches,
        best_match,
        has_multiple_best_matches,
    }
}
