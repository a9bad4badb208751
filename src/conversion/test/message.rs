use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;

use super::*;

/// Quantity and time tokens in one message each take their own path and
/// both land in the reply.
#[tokio::test]
async fn mixed_tokens_produce_both_sections() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(
        &store,
        &registry,
        DUTCH,
        &MEMBERS,
        "run {5km} with me at {7am}?",
    )
    .await
    .unwrap();

    assert_eq!(
        reply.quantity_lines,
        vec![("3.11 mi".to_string(), "5.00 km".to_string())]
    );
    assert_eq!(reply.time_rows.len(), 3);
}

/// A bare number with a trailing word that is neither a valid time hint
/// nor a known unit reports the word as an unknown unit.
#[tokio::test]
async fn bare_hour_with_hint_falls_through_to_units() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(&store, &registry, DUTCH, &MEMBERS, "{20 helsinki}")
        .await
        .unwrap();

    assert!(reply.time_rows.is_empty());
    assert_eq!(
        reply.errors,
        vec![ConversionError::UnknownUnit("helsinki".into())]
    );
}

/// A token whose right side of `>` is empty is dropped without any
/// default handling, errors included.
#[tokio::test]
async fn suppressed_tokens_yield_no_reply() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(
        &store,
        &registry,
        DUTCH,
        &MEMBERS,
        "{8:00 > } and {nonsenseunit > }",
    )
    .await
    .unwrap();

    assert!(reply.is_empty());
}

/// Text without braces, or with empty braces, produces an empty reply.
#[tokio::test]
async fn plain_text_produces_empty_reply() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    for content in ["no tokens here", "{}", "{ }", ""] {
        let reply = convert_message(&store, &registry, DUTCH, &MEMBERS, content)
            .await
            .unwrap();
        assert!(reply.is_empty(), "expected empty reply for {content:?}");
    }
}

/// One bad token does not poison its neighbours.
#[tokio::test]
async fn failures_are_per_token() {
    let store = three_zone_store().await;
    let registry = UnitRegistry::standard();

    let reply = convert_message(
        &store,
        &registry,
        BRITISH,
        &MEMBERS,
        "{100 blorps} but also {26c} and {4pm}",
    )
    .await
    .unwrap();

    assert_eq!(
        reply.quantity_lines,
        vec![("78.80 °F".to_string(), "26.00 °C".to_string())]
    );
    assert_eq!(reply.time_rows.len(), 3);
    assert_eq!(
        reply.errors,
        vec![ConversionError::UnknownUnit("blorps".into())]
    );
}

/// A store that cannot be reached at all.
struct DownStore;

#[async_trait]
impl ProfileStore for DownStore {
    async fn preferred_name(&self, _: UserId) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn set_preferred_name(&self, _: UserId, _: Option<String>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn pronouns(&self, _: UserId) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn set_pronouns(&self, _: UserId, _: Option<String>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn birthday(&self, _: UserId) -> Result<Option<NaiveDate>, StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn set_birthday(&self, _: UserId, _: Option<NaiveDate>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn timezone_of(&self, _: UserId) -> Result<Option<Tz>, StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn set_timezone(&self, _: UserId, _: Option<Tz>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn privacy_of(&self, _: UserId, _: ProfileField) -> Result<Privacy, StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn set_privacy(
        &self,
        _: UserId,
        _: ProfileField,
        _: Privacy,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn public_timezones(&self, _: &[UserId]) -> Result<Vec<Tz>, StoreError> {
        Err(StoreError::Unavailable)
    }
    async fn birthdays_on(&self, _: u32, _: u32) -> Result<Vec<UserId>, StoreError> {
        Err(StoreError::Unavailable)
    }
}

/// Store trouble surfaces as an error so the caller can tell the user to
/// retry, rather than silently skipping the reply.
#[tokio::test]
async fn unreachable_store_propagates() {
    let registry = UnitRegistry::standard();

    let result = convert_message(&DownStore, &registry, DUTCH, &MEMBERS, "{9pm}").await;

    assert_eq!(result.unwrap_err(), StoreError::Unavailable);
}

/// Quantity tokens never touch the store, so they still convert while it
/// is down.
#[tokio::test]
async fn quantities_survive_store_outage() {
    let registry = UnitRegistry::standard();

    let reply = convert_message(&DownStore, &registry, DUTCH, &MEMBERS, "{5km}")
        .await
        .unwrap();

    assert_eq!(
        reply.quantity_lines,
        vec![("3.11 mi".to_string(), "5.00 km".to_string())]
    );
}
