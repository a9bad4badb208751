//! Per-user profile data behind a collaborator seam.
//!
//! The conversion engine only consumes timezones from here, but the store
//! carries the full profile surface: preferred name, pronouns, birthday,
//! timezone, and a privacy flag per field. How the data is persisted is
//! deliberately outside this crate's scope; [`memory::MemoryStore`] is the
//! bundled implementation.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use thiserror::Error;

pub type UserId = u64;

/// Visibility of one profile field to other guild members. A user's own
/// fields are always visible to themself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privacy {
    #[default]
    Private,
    Public,
}

/// The profile fields a privacy flag can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    PreferredName,
    Pronouns,
    Birthday,
    Timezone,
}

/// Profile store failure. `Unavailable` is retryable: the caller should
/// tell the user to try again rather than drop the request silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("The profile store is unavailable right now. Try again in a bit.")]
    Unavailable,
}

/// Read/write access to user profiles.
///
/// `public_timezones` powers the conversion engine's output-timezone set:
/// it must deduplicate and keep first-seen order, and only include members
/// whose timezone field is public. `timezone_of` ignores privacy because it
/// is only ever called for the asking user themself.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn preferred_name(&self, user: UserId) -> Result<Option<String>, StoreError>;
    async fn set_preferred_name(&self, user: UserId, name: Option<String>)
        -> Result<(), StoreError>;

    async fn pronouns(&self, user: UserId) -> Result<Option<String>, StoreError>;
    async fn set_pronouns(&self, user: UserId, pronouns: Option<String>)
        -> Result<(), StoreError>;

    async fn birthday(&self, user: UserId) -> Result<Option<NaiveDate>, StoreError>;
    async fn set_birthday(&self, user: UserId, birthday: Option<NaiveDate>)
        -> Result<(), StoreError>;

    async fn timezone_of(&self, user: UserId) -> Result<Option<Tz>, StoreError>;
    async fn set_timezone(&self, user: UserId, timezone: Option<Tz>) -> Result<(), StoreError>;

    async fn privacy_of(&self, user: UserId, field: ProfileField) -> Result<Privacy, StoreError>;
    async fn set_privacy(
        &self,
        user: UserId,
        field: ProfileField,
        privacy: Privacy,
    ) -> Result<(), StoreError>;

    /// Distinct public timezones among `members`, in first-seen order.
    async fn public_timezones(&self, members: &[UserId]) -> Result<Vec<Tz>, StoreError>;

    /// Users with a public birthday on the given month/day.
    async fn birthdays_on(&self, month: u32, day: u32) -> Result<Vec<UserId>, StoreError>;
}
