use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use tokio::sync::RwLock;

use super::{Privacy, ProfileField, ProfileStore, StoreError, UserId};

#[derive(Debug, Default, Clone)]
struct Profile {
    preferred_name: Option<String>,
    pronouns: Option<String>,
    birthday: Option<NaiveDate>,
    timezone: Option<Tz>,
    privacy: HashMap<ProfileField, Privacy>,
}

impl Profile {
    fn privacy_of(&self, field: ProfileField) -> Privacy {
        self.privacy.get(&field).copied().unwrap_or_default()
    }
}

/// In-memory profile store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, user: UserId, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Profile),
    {
        let mut profiles = self.profiles.write().await;
        apply(profiles.entry(user).or_default());
        Ok(())
    }

    async fn read<T, F>(&self, user: UserId, get: F) -> Result<T, StoreError>
    where
        T: Default,
        F: FnOnce(&Profile) -> T,
    {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&user).map(get).unwrap_or_default())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn preferred_name(&self, user: UserId) -> Result<Option<String>, StoreError> {
        self.read(user, |p| p.preferred_name.clone()).await
    }

    async fn set_preferred_name(
        &self,
        user: UserId,
        name: Option<String>,
    ) -> Result<(), StoreError> {
        self.update(user, |p| p.preferred_name = name).await
    }

    async fn pronouns(&self, user: UserId) -> Result<Option<String>, StoreError> {
        self.read(user, |p| p.pronouns.clone()).await
    }

    async fn set_pronouns(&self, user: UserId, pronouns: Option<String>) -> Result<(), StoreError> {
        self.update(user, |p| p.pronouns = pronouns).await
    }

    async fn birthday(&self, user: UserId) -> Result<Option<NaiveDate>, StoreError> {
        self.read(user, |p| p.birthday).await
    }

    async fn set_birthday(
        &self,
        user: UserId,
        birthday: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        self.update(user, |p| p.birthday = birthday).await
    }

    async fn timezone_of(&self, user: UserId) -> Result<Option<Tz>, StoreError> {
        self.read(user, |p| p.timezone).await
    }

    async fn set_timezone(&self, user: UserId, timezone: Option<Tz>) -> Result<(), StoreError> {
        self.update(user, |p| p.timezone = timezone).await
    }

    async fn privacy_of(&self, user: UserId, field: ProfileField) -> Result<Privacy, StoreError> {
        self.read(user, |p| p.privacy_of(field)).await
    }

    async fn set_privacy(
        &self,
        user: UserId,
        field: ProfileField,
        privacy: Privacy,
    ) -> Result<(), StoreError> {
        self.update(user, |p| {
            p.privacy.insert(field, privacy);
        })
        .await
    }

    async fn public_timezones(&self, members: &[UserId]) -> Result<Vec<Tz>, StoreError> {
        let profiles = self.profiles.read().await;
        let mut timezones = Vec::new();
        for member in members {
            let Some(profile) = profiles.get(member) else {
                continue;
            };
            if profile.privacy_of(ProfileField::Timezone) != Privacy::Public {
                continue;
            }
            if let Some(tz) = profile.timezone {
                if !timezones.contains(&tz) {
                    timezones.push(tz);
                }
            }
        }
        Ok(timezones)
    }

    async fn birthdays_on(&self, month: u32, day: u32) -> Result<Vec<UserId>, StoreError> {
        let profiles = self.profiles.read().await;
        let mut users: Vec<UserId> = profiles
            .iter()
            .filter(|(_, profile)| {
                profile.privacy_of(ProfileField::Birthday) == Privacy::Public
                    && profile
                        .birthday
                        .is_some_and(|b| b.month() == month && b.day() == day)
            })
            .map(|(&user, _)| user)
            .collect();
        users.sort_unstable();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests field get/set round-trips through the store.
    #[tokio::test]
    async fn field_round_trip() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        assert_eq!(store.preferred_name(1).await?, None);

        store
            .set_preferred_name(1, Some("Sam".to_string()))
            .await?;
        store.set_pronouns(1, Some("they/them".to_string())).await?;
        store
            .set_timezone(1, Some(Tz::Europe__Amsterdam))
            .await?;

        assert_eq!(store.preferred_name(1).await?.as_deref(), Some("Sam"));
        assert_eq!(store.pronouns(1).await?.as_deref(), Some("they/them"));
        assert_eq!(store.timezone_of(1).await?, Some(Tz::Europe__Amsterdam));
        Ok(())
    }

    /// Tests fields default to private and the public-timezone listing
    /// honors the flag, deduplicates, and keeps first-seen order.
    #[tokio::test]
    async fn public_timezone_listing() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        for (user, tz) in [
            (1, Tz::America__New_York),
            (2, Tz::Europe__London),
            (3, Tz::Europe__London),
            (4, Tz::Europe__Amsterdam),
        ] {
            store.set_timezone(user, Some(tz)).await?;
            store
                .set_privacy(user, ProfileField::Timezone, Privacy::Public)
                .await?;
        }
        // Private timezone stays hidden.
        store.set_timezone(5, Some(Tz::Asia__Tokyo)).await?;

        let zones = store.public_timezones(&[1, 2, 3, 4, 5, 99]).await?;
        assert_eq!(
            zones,
            vec![
                Tz::America__New_York,
                Tz::Europe__London,
                Tz::Europe__Amsterdam
            ]
        );

        // Only members of the asking guild are considered.
        let zones = store.public_timezones(&[2, 3]).await?;
        assert_eq!(zones, vec![Tz::Europe__London]);
        Ok(())
    }

    /// Tests the birthday range query filters by month/day and privacy.
    #[tokio::test]
    async fn birthdays_on_day() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(1995, 6, 1).unwrap();
        store.set_birthday(1, Some(date)).await?;
        store
            .set_privacy(1, ProfileField::Birthday, Privacy::Public)
            .await?;
        store.set_birthday(2, Some(date)).await?; // private
        store
            .set_birthday(3, NaiveDate::from_ymd_opt(1990, 6, 2))
            .await?;
        store
            .set_privacy(3, ProfileField::Birthday, Privacy::Public)
            .await?;

        assert_eq!(store.birthdays_on(6, 1).await?, vec![1]);
        assert_eq!(store.birthdays_on(6, 2).await?, vec![3]);
        assert_eq!(store.birthdays_on(1, 1).await?, Vec::<UserId>::new());
        Ok(())
    }
}
