mod bill;
mod breakdown;
mod calculator;
mod error;
mod tariff;

pub use self::{
    bill::{Bill, MeterReadings, PAYMENT_TERM, PaymentStatus},
    breakdown::{TierBreakdown, TierCharge},
    calculator::TieredBillCalculator,
    error::{BillingError, InvalidUsage, ScheduleError},
    tariff::{Band, N_TIERS, RateSchedule, Tier},
};
