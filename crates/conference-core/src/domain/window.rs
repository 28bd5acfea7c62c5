//! Inclusive calendar-date windows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed `[start, end]` range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

/// Fails with a description of the first window whose start is after its end.
pub(crate) fn ensure_ordered(name: &str, window: &DateWindow) -> Result<(), String> {
    if window.is_ordered() {
        Ok(())
    } else {
        Err(format!("{} starts {} after it ends {}", name, window.start, window.end))
    }
}
