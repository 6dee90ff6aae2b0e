use std::fmt::{Display, Formatter};

use bon::bon;
use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{
    billing::{
        breakdown::TierBreakdown,
        calculator::TieredBillCalculator,
        error::BillingError,
    },
    quantity::{currency::Maloti, energy::KilowattHours},
};

/// Days between the end of the billing period and the due date.
pub const PAYMENT_TERM: TimeDelta = TimeDelta::days(15);

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpaid => write!(f, "UNPAID"),
            Self::Paid => write!(f, "PAID"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MeterReadings {
    pub previous: KilowattHours,
    pub current: KilowattHours,
}

impl MeterReadings {
    pub fn usage(self) -> Result<KilowattHours, BillingError> {
        if self.previous < KilowattHours::ZERO {
            return Err(BillingError::NegativeReading(self.previous));
        }
        if self.current < self.previous {
            return Err(BillingError::ReadingDecreased {
                previous: self.previous,
                current: self.current,
            });
        }
        Ok(self.current - self.previous)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Bill {
    pub number: String,
    pub customer_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub due_date: NaiveDate,
    pub payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,

    pub readings: MeterReadings,
    pub breakdown: TierBreakdown,
}

#[bon]
impl Bill {
    /// Bill the customer for the usage between two meter readings.
    ///
    /// `sequence` is the one-based number of the bill within the ledger.
    #[builder]
    pub fn issue(
        calculator: &TieredBillCalculator,
        #[builder(into)] customer_id: String,
        readings: MeterReadings,
        period_start: NaiveDate,
        period_end: NaiveDate,
        sequence: usize,
        issued_on: NaiveDate,
    ) -> Result<Self, BillingError> {
        if period_end < period_start {
            return Err(BillingError::InvalidPeriod { start: period_start, end: period_end });
        }
        let breakdown = calculator.calculate(readings.usage()?)?;
        Ok(Self {
            number: format!("BILL-{}-{sequence:05}", issued_on.year()),
            customer_id,
            period_start,
            period_end,
            due_date: period_end + PAYMENT_TERM,
            payment_status: PaymentStatus::Unpaid,
            payment_date: None,
            readings,
            breakdown,
        })
    }
}

impl Bill {
    pub const fn usage(&self) -> KilowattHours {
        self.breakdown.total_usage()
    }

    pub const fn amount(&self) -> Maloti {
        self.breakdown.total_amount()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid() && today > self.due_date
    }

    pub fn mark_paid(&mut self, on: NaiveDate) -> Result<(), BillingError> {
        if self.is_paid() {
            return Err(BillingError::AlreadyPaid(self.number.clone()));
        }
        self.payment_status = PaymentStatus::Paid;
        self.payment_date = Some(on);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn readings(previous: rust_decimal::Decimal, current: rust_decimal::Decimal) -> MeterReadings {
        MeterReadings { previous: KilowattHours(previous), current: KilowattHours(current) }
    }

    fn issue(readings: MeterReadings) -> Result<Bill, BillingError> {
        Bill::issue()
            .calculator(&TieredBillCalculator::default())
            .customer_id("CUST-001")
            .readings(readings)
            .period_start(date(2025, 1, 1))
            .period_end(date(2025, 1, 31))
            .sequence(7)
            .issued_on(date(2025, 2, 1))
            .call()
    }

    #[test]
    fn test_readings_usage() {
        assert_eq!(readings(dec!(1200), dec!(1350)).usage(), Ok(KilowattHours(dec!(150))));
        assert_eq!(readings(dec!(1200), dec!(1200)).usage(), Ok(KilowattHours::ZERO));
    }

    #[test]
    fn test_readings_decreased() {
        assert_eq!(
            readings(dec!(1350), dec!(1200)).usage(),
            Err(BillingError::ReadingDecreased {
                previous: KilowattHours(dec!(1350)),
                current: KilowattHours(dec!(1200)),
            }),
        );
    }

    #[test]
    fn test_readings_negative() {
        assert_eq!(
            readings(dec!(-500), dec!(-350)).usage(),
            Err(BillingError::NegativeReading(KilowattHours(dec!(-500)))),
        );
        assert!(matches!(
            readings(dec!(0), dec!(-1)).usage(),
            Err(BillingError::ReadingDecreased { .. }),
        ));
        assert!(matches!(
            issue(readings(dec!(-500), dec!(-350))),
            Err(BillingError::NegativeReading(_)),
        ));
    }

    #[test]
    fn test_issue() {
        let bill = issue(readings(dec!(1200), dec!(1350))).unwrap();
        assert_eq!(bill.number, "BILL-2025-00007");
        assert_eq!(bill.customer_id, "CUST-001");
        assert_eq!(bill.due_date, date(2025, 2, 15));
        assert_eq!(bill.payment_status, PaymentStatus::Unpaid);
        assert_eq!(bill.payment_date, None);
        assert_eq!(bill.usage(), KilowattHours(dec!(150)));
        assert_eq!(bill.amount(), Maloti(dec!(195)));
        assert_eq!(bill.breakdown.tier2_usage(), KilowattHours(dec!(50)));
    }

    #[test]
    fn test_issue_decreased_readings() {
        assert!(matches!(
            issue(readings(dec!(10), dec!(5))),
            Err(BillingError::ReadingDecreased { .. }),
        ));
    }

    #[test]
    fn test_issue_invalid_period() {
        let result = Bill::issue()
            .calculator(&TieredBillCalculator::default())
            .customer_id("CUST-001")
            .readings(readings(dec!(0), dec!(1)))
            .period_start(date(2025, 2, 1))
            .period_end(date(2025, 1, 1))
            .sequence(1)
            .issued_on(date(2025, 2, 1))
            .call();
        assert_eq!(
            result,
            Err(BillingError::InvalidPeriod { start: date(2025, 2, 1), end: date(2025, 1, 1) }),
        );
    }

    #[test]
    fn test_overdue() {
        let mut bill = issue(readings(dec!(0), dec!(10))).unwrap();
        assert!(!bill.is_overdue(date(2025, 2, 15)));
        assert!(bill.is_overdue(date(2025, 2, 16)));

        bill.mark_paid(date(2025, 2, 20)).unwrap();
        assert!(!bill.is_overdue(date(2025, 2, 21)));
    }

    #[test]
    fn test_mark_paid() {
        let mut bill = issue(readings(dec!(0), dec!(10))).unwrap();
        bill.mark_paid(date(2025, 2, 10)).unwrap();
        assert!(bill.is_paid());
        assert_eq!(bill.payment_date, Some(date(2025, 2, 10)));
        assert_eq!(
            bill.mark_paid(date(2025, 2, 11)),
            Err(BillingError::AlreadyPaid("BILL-2025-00007".to_owned())),
        );
    }
}
