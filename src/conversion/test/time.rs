use chrono::Utc;
use chrono_tz::Tz;

use super::*;

/// A plain clock time from a user with a set timezone should produce one
/// row per distinct public timezone in the guild, ascending by UTC offset.
#[tokio::test]
async fn clock_time_fans_out_to_guild_timezones() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(&store, &registry, DUTCH, &MEMBERS, "dinner at {9pm}?")
        .await
        .unwrap();

    assert_eq!(
        zone_names(&reply),
        vec!["America/New_York", "Europe/London", "Europe/Amsterdam"]
    );
    // Author is in Amsterdam, so the Amsterdam row reads back the input.
    assert_eq!(clock(&reply.time_rows[2].times[0]), "9:00 PM");
    // London is one hour behind Amsterdam the whole year round.
    assert_eq!(clock(&reply.time_rows[1].times[0]), "8:00 PM");
    assert!(reply.quantity_lines.is_empty());
    assert!(reply.errors.is_empty());
}

/// Several time tokens land in the same rows, one column per token, in
/// message order.
#[tokio::test]
async fn multiple_times_share_rows_in_message_order() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(
        &store,
        &registry,
        BRITISH,
        &MEMBERS,
        "free between {14} and {5:45 pm}",
    )
    .await
    .unwrap();

    assert_eq!(reply.time_rows.len(), 3);
    for row in &reply.time_rows {
        assert_eq!(row.times.len(), 2);
    }
    let london = &reply.time_rows[1];
    assert_eq!(london.zone, "Europe/London");
    assert_eq!(clock(&london.times[0]), "2:00 PM");
    assert_eq!(clock(&london.times[1]), "5:45 PM");
}

/// An input timezone hint overrides the author's own timezone and leaves
/// a note about the fuzzy resolution.
#[tokio::test]
async fn input_hint_overrides_author_timezone() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(&store, &registry, AMERICAN, &MEMBERS, "{8:00 helsinki}")
        .await
        .unwrap();

    assert!(reply
        .notes
        .iter()
        .any(|note| note.contains("Europe/Helsinki")));
    // Helsinki is two hours ahead of London and one ahead of Amsterdam.
    assert_eq!(clock(&reply.time_rows[1].times[0]), "6:00 AM");
    assert_eq!(clock(&reply.time_rows[2].times[0]), "7:00 AM");
    assert!(reply.errors.is_empty());
}

/// An explicit output timezone narrows the reply to a single row.
#[tokio::test]
async fn explicit_output_timezone_yields_single_row() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(&store, &registry, BRITISH, &MEMBERS, "{11am > new york}")
        .await
        .unwrap();

    assert_eq!(zone_names(&reply), vec!["America/New_York"]);
    assert_eq!(reply.time_rows[0].times.len(), 1);
}

/// A hint that matches nothing in the tz database is a reported error,
/// not a silent drop.
#[tokio::test]
async fn unresolvable_hint_is_reported() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(&store, &registry, DUTCH, &MEMBERS, "{10:00 qqqqxx}")
        .await
        .unwrap();

    assert!(reply.time_rows.is_empty());
    assert_eq!(
        reply.errors,
        vec![ConversionError::TimezoneNotFound("qqqqxx".into())]
    );
}

/// `now` keyword converts the current instant; every row holds the same
/// instant viewed from a different zone.
#[tokio::test]
async fn now_keyword_converts_current_instant() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();
    let before = Utc::now();

    let reply = convert_message(&store, &registry, AMERICAN, &MEMBERS, "{now}")
        .await
        .unwrap();

    let after = Utc::now();
    assert_eq!(reply.time_rows.len(), 3);
    let instant = reply.time_rows[0].times[0].with_timezone(&Utc);
    assert!(instant >= before && instant <= after);
    for row in &reply.time_rows {
        assert_eq!(row.times[0].with_timezone(&Utc), instant);
    }
}

/// An author with no timezone set gets exactly one error no matter how
/// many of their tokens needed it.
#[tokio::test]
async fn missing_author_timezone_reported_once() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();
    let stranger: UserId = 99;

    let reply = convert_message(
        &store,
        &registry,
        stranger,
        &MEMBERS,
        "{9pm} or maybe {10pm}",
    )
    .await
    .unwrap();

    assert!(reply.time_rows.is_empty());
    assert_eq!(reply.errors, vec![ConversionError::UserTimezoneUnset]);
}

/// A token with an input hint does not need the author's timezone at all.
#[tokio::test]
async fn hinted_token_ignores_unset_author_timezone() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();
    let stranger: UserId = 99;

    let reply = convert_message(&store, &registry, stranger, &MEMBERS, "{8:00 pm london}")
        .await
        .unwrap();

    assert!(reply.errors.is_empty());
    assert_eq!(reply.time_rows.len(), 3);
}

/// Noon and midnight keywords parse as fixed clock times.
#[tokio::test]
async fn noon_and_midnight_keywords() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(&store, &registry, BRITISH, &MEMBERS, "{noon} {midnight}")
        .await
        .unwrap();

    let london = &reply.time_rows[1];
    assert_eq!(clock(&london.times[0]), "12:00 PM");
    assert_eq!(clock(&london.times[1]), "12:00 AM");
}

/// Rows come back ascending by UTC offset even when the author's own zone
/// sits at the top of the offset range.
#[tokio::test]
async fn rows_sorted_by_offset_regardless_of_author() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(&store, &registry, AMERICAN, &MEMBERS, "{3:30pm}")
        .await
        .unwrap();

    let offsets: Vec<i64> = reply
        .time_rows
        .iter()
        .map(|row| {
            let local = reply.time_rows[0].times[0]
                .with_timezone(&row.zone.parse::<Tz>().unwrap())
                .naive_local();
            (local - reply.time_rows[0].times[0].naive_utc()).num_minutes()
        })
        .collect();
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets, sorted);
}
