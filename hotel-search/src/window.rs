//! One-night stay window anchored at a calendar date.

use chrono::{Days, Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayWindow {
    /// Check-in on `date`, check-out the next day.
    pub fn starting(date: NaiveDate) -> Self {
        Self {
            check_in: date,
            check_out: date.checked_add_days(Days::new(1)).unwrap_or(date),
        }
    }

    /// Tonight in the local timezone.
    pub fn tonight() -> Self {
        Self::starting(Local::now().date_naive())
    }
}
