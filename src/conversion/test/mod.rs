use chrono::DateTime;
use chrono_tz::Tz;

use super::*;
use crate::profile::memory::MemoryStore;
use crate::profile::{Privacy, ProfileField};

mod message;
mod time;

const AMERICAN: UserId = 1;
const BRITISH: UserId = 2;
const DUTCH: UserId = 3;
const MEMBERS: [UserId; 3] = [AMERICAN, BRITISH, DUTCH];

/// A store with three users whose public timezones span three offsets.
async fn three_zone_store() -> MemoryStore {
    let store = MemoryStore::new();
    for (user, tz) in [
        (AMERICAN, Tz::America__New_York),
        (BRITISH, Tz::Europe__London),
        (DUTCH, Tz::Europe__Amsterdam),
    ] {
        store.set_timezone(user, Some(tz)).await.unwrap();
        store
            .set_privacy(user, ProfileField::Timezone, Privacy::Public)
            .await
            .unwrap();
    }
    store
}

fn clock(time: &DateTime<Tz>) -> String {
    time.format("%-I:%M %p").to_string()
}

fn zone_names(reply: &Reply) -> Vec<&'static str> {
    reply.time_rows.iter().map(|row| row.zone).collect()
}
