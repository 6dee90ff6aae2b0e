use chrono::NaiveDate;

use crate::quantity::energy::KilowattHours;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUsage {
    #[error("usage cannot be negative, got {0}")]
    Negative(KilowattHours),

    #[error("usage {0} is too large to bill")]
    TooLarge(KilowattHours),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    #[error("meter reading cannot be negative, got {0}")]
    NegativeReading(KilowattHours),

    #[error("current reading {current} is less than previous reading {previous}")]
    ReadingDecreased { previous: KilowattHours, current: KilowattHours },

    #[error("billing period ends on {end} before it starts on {start}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("bill `{0}` is already paid")]
    AlreadyPaid(String),

    #[error("there is no bill `{0}`")]
    UnknownBill(String),

    #[error("totals are too large to add up")]
    AmountOverflow,

    #[error(transparent)]
    InvalidUsage(#[from] InvalidUsage),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("expected exactly 3 tiers, got {0}")]
    TierCount(usize),

    #[error("tier {0} must have an upper bound")]
    MissingUpperBound(usize),

    #[error("the top tier must be open-ended")]
    UnexpectedUpperBound,

    #[error("tier upper bounds must be positive and strictly ascending")]
    NonAscendingBounds,

    #[error("tier {0} has a negative rate")]
    NegativeRate(usize),
}
