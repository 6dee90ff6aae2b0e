use std::{
    collections::BTreeMap,
    fmt::{Debug, Display, Formatter},
    fs,
    path::Path,
};

use chrono::{Datelike, Days, Months, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    billing::{Bill, BillingError, MeterReadings, PaymentStatus, TieredBillCalculator},
    prelude::*,
    quantity::{currency::Maloti, energy::KilowattHours},
};

/// Issued bills in the order they were issued.
#[derive(Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    bills: Vec<Bill>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutstandingSummary {
    pub n_unpaid: usize,
    pub n_overdue: usize,
    pub amount: Maloti,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DashboardStats {
    pub n_customers: usize,
    pub n_bills: usize,
    pub n_unpaid: usize,

    /// Collected from the paid bills.
    pub revenue: Maloti,

    /// Still owed on the unpaid bills.
    pub outstanding: Maloti,

    /// Billed for the periods starting this month, paid or not.
    pub billed_this_month: Maloti,
}

/// Calendar month a billing period starts in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillingMonth {
    pub year: i32,
    pub month: u32,
}

impl BillingMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl Display for BillingMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MonthlyRevenue {
    pub month: BillingMonth,
    pub n_bills: usize,
    pub usage: KilowattHours,
    pub amount: Maloti,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerConsumption {
    pub customer_id: String,
    pub n_bills: usize,
    pub usage: KilowattHours,
    pub amount: Maloti,
}

impl Ledger {
    #[instrument(name = "reading the ledger…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            toml::from_str(&text).with_context(|| format!("failed to parse `{}`", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    #[instrument(skip(self), name = "writing the ledger…")]
    pub fn write_to<P: AsRef<Path> + Debug>(&self, path: P) -> Result {
        let path = path.as_ref();
        fs::write(path, toml::to_string(self)?)
            .with_context(|| format!("failed to write `{}`", path.display()))
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Issue a new bill and append it to the ledger.
    pub fn issue(
        &mut self,
        calculator: &TieredBillCalculator,
        customer_id: &str,
        readings: MeterReadings,
        period: (NaiveDate, NaiveDate),
        issued_on: NaiveDate,
    ) -> Result<&Bill, BillingError> {
        let bill = Bill::issue()
            .calculator(calculator)
            .customer_id(customer_id)
            .readings(readings)
            .period_start(period.0)
            .period_end(period.1)
            .sequence(self.bills.len() + 1)
            .issued_on(issued_on)
            .call()?;
        info!(number = %bill.number, customer_id = %bill.customer_id, amount = %bill.amount(), "issued");
        self.bills.push(bill);
        Ok(&self.bills[self.bills.len() - 1])
    }

    pub fn mark_paid(&mut self, number: &str, on: NaiveDate) -> Result<&Bill, BillingError> {
        let bill = self
            .bills
            .iter_mut()
            .find(|bill| bill.number == number)
            .ok_or_else(|| BillingError::UnknownBill(number.to_owned()))?;
        bill.mark_paid(on)?;
        info!(number = %bill.number, amount = %bill.amount(), "paid");
        Ok(bill)
    }

    /// Customer's bills, the latest billing period first.
    pub fn customer_bills<'a>(&'a self, customer_id: &'a str) -> impl Iterator<Item = &'a Bill> {
        self.bills
            .iter()
            .filter(move |bill| bill.customer_id == customer_id)
            .sorted_by(|lhs, rhs| rhs.period_start.cmp(&lhs.period_start))
    }

    pub fn outstanding(&self, today: NaiveDate) -> Result<OutstandingSummary, BillingError> {
        let unpaid = self.bills.iter().filter(|bill| !bill.is_paid()).collect_vec();
        Ok(OutstandingSummary {
            n_unpaid: unpaid.len(),
            n_overdue: unpaid.iter().filter(|bill| bill.is_overdue(today)).count(),
            amount: total_amount(unpaid)?,
        })
    }

    pub fn status_distribution(&self) -> BTreeMap<PaymentStatus, usize> {
        self.bills.iter().counts_by(|bill| bill.payment_status).into_iter().collect()
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<DashboardStats, BillingError> {
        let (paid, unpaid): (Vec<&Bill>, Vec<&Bill>) =
            self.bills.iter().partition(|bill| bill.is_paid());
        let month_start = today - Days::new(u64::from(today.day0()));
        Ok(DashboardStats {
            n_customers: self.bills.iter().map(|bill| &bill.customer_id).unique().count(),
            n_bills: self.bills.len(),
            n_unpaid: unpaid.len(),
            revenue: total_amount(paid)?,
            outstanding: total_amount(unpaid)?,
            billed_this_month: total_amount(
                self.bills.iter().filter(|bill| bill.period_start >= month_start),
            )?,
        })
    }

    /// Billed usage and amounts per month over the last `n_months`, the latest month first.
    pub fn monthly_revenue(
        &self,
        n_months: u32,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyRevenue>, BillingError> {
        let since = today.checked_sub_months(Months::new(n_months)).unwrap_or(NaiveDate::MIN);
        let mut report = self
            .bills
            .iter()
            .filter(|bill| bill.period_start >= since)
            .into_group_map_by(|bill| BillingMonth::of(bill.period_start))
            .into_iter()
            .map(|(month, bills)| -> Result<MonthlyRevenue, BillingError> {
                Ok(MonthlyRevenue {
                    month,
                    n_bills: bills.len(),
                    usage: total_usage(bills.iter().copied())?,
                    amount: total_amount(bills)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        report.sort_unstable_by(|lhs, rhs| rhs.month.cmp(&lhs.month));
        Ok(report)
    }

    /// Customers with the highest total usage first.
    pub fn top_consumers(&self, limit: usize) -> Result<Vec<CustomerConsumption>, BillingError> {
        let mut consumers = self
            .bills
            .iter()
            .into_group_map_by(|bill| bill.customer_id.as_str())
            .into_iter()
            .map(|(customer_id, bills)| -> Result<CustomerConsumption, BillingError> {
                Ok(CustomerConsumption {
                    customer_id: customer_id.to_owned(),
                    n_bills: bills.len(),
                    usage: total_usage(bills.iter().copied())?,
                    amount: total_amount(bills)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        consumers.sort_unstable_by(|lhs, rhs| {
            rhs.usage.cmp(&lhs.usage).then_with(|| lhs.customer_id.cmp(&rhs.customer_id))
        });
        consumers.truncate(limit);
        Ok(consumers)
    }
}

fn total_amount<'a>(bills: impl IntoIterator<Item = &'a Bill>) -> Result<Maloti, BillingError> {
    bills
        .into_iter()
        .map(Bill::amount)
        .try_fold(Maloti::ZERO, Maloti::checked_add)
        .ok_or(BillingError::AmountOverflow)
}

fn total_usage<'a>(
    bills: impl IntoIterator<Item = &'a Bill>,
) -> Result<KilowattHours, BillingError> {
    bills
        .into_iter()
        .map(Bill::usage)
        .try_fold(KilowattHours::ZERO, KilowattHours::checked_add)
        .ok_or(BillingError::AmountOverflow)
}
