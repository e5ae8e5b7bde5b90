//! Library configuration.

/// How the ledger decides whether a lending record is overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverduePolicy {
    /// Overdue when today is strictly after the due date, whether or not the
    /// item has been returned. A late return therefore stays overdue forever.
    #[default]
    DueDateOnly,
    /// Overdue only while the record is still active.
    ActiveOnly,
}

/// Configuration for a [`Library`](crate::Library).
#[derive(Debug, Clone)]
pub struct Config {
    /// Loan length used by `Library::borrow_default`.
    pub default_loan_days: i64,

    /// Field delimiter used by the CSV helpers when the caller has no preference.
    pub csv_delimiter: String,

    /// Overdue rule used by the ledger, statistics and overdue queries.
    pub overdue_policy: OverduePolicy,

    /// Refuse to remove an item while an active lending record references it.
    pub guard_active_loans: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_loan_days: 14,
            csv_delimiter: ";".to_string(),
            overdue_policy: OverduePolicy::DueDateOnly,
            guard_active_loans: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default loan length in days.
    #[must_use]
    pub const fn default_loan_days(mut self, days: i64) -> Self {
        self.default_loan_days = days;
        self
    }

    /// Sets the default CSV field delimiter.
    #[must_use]
    pub fn csv_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.csv_delimiter = delimiter.into();
        self
    }

    /// Sets the overdue policy.
    #[must_use]
    pub const fn overdue_policy(mut self, policy: OverduePolicy) -> Self {
        self.overdue_policy = policy;
        self
    }

    /// Sets whether removal of items on loan is refused.
    #[must_use]
    pub const fn guard_active_loans(mut self, value: bool) -> Self {
        self.guard_active_loans = value;
        self
    }
}
