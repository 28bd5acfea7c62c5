//! Common types

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

/// Current calendar date in UTC. Every date-window comparison in the
/// workspace is made against this basis.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
