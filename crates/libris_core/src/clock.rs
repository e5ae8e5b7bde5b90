//! Date sources for the ledger.

use chrono::{Local, NaiveDate, TimeDelta};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Supplies "today" to the ledger.
pub trait Clock: fmt::Debug {
    /// Returns the current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same date, so a test can keep one handle and advance the
/// clock the library is using.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Rc<Cell<NaiveDate>>,
}

impl ManualClock {
    /// Creates a clock fixed at `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Rc::new(Cell::new(date)),
        }
    }

    /// Moves the clock to `date`.
    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// Moves the clock forward (or backward for negative values) by `days`.
    ///
    /// Returns `false` and leaves the clock untouched if the result would leave
    /// the supported calendar range.
    pub fn advance(&self, days: i64) -> bool {
        match shift_days(self.date.get(), days) {
            Some(next) => {
                self.date.set(next);
                true
            }
            None => false,
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

/// Adds a signed number of days to `date`, or `None` on calendar overflow.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}
