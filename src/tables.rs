use std::collections::BTreeMap;

use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    billing::{Bill, PaymentStatus, RateSchedule, TierBreakdown},
    ledger::{CustomerConsumption, DashboardStats, MonthlyRevenue, OutstandingSummary},
    quantity::{currency::Maloti, energy::KilowattHours},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

#[must_use]
pub fn build_breakdown_table(breakdown: &TierBreakdown) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tier", "Rate", "Usage", "Amount"]);
    for tier in breakdown.tiers() {
        let is_reached = tier.usage > KilowattHours::ZERO;
        table.add_row(vec![
            Cell::new(tier.band),
            Cell::new(tier.band.rate).set_alignment(CellAlignment::Right),
            Cell::new(tier.usage).set_alignment(CellAlignment::Right),
            if is_reached {
                Cell::new(tier.amount).set_alignment(CellAlignment::Right)
            } else {
                Cell::new(tier.amount)
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Dim)
            },
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(breakdown.total_usage()).set_alignment(CellAlignment::Right),
        Cell::new(breakdown.total_amount())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

#[must_use]
pub fn build_rates_table(schedule: &RateSchedule) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tier", "From", "To", "Rate"]);
    for band in schedule.bands() {
        table.add_row(vec![
            Cell::new(band.number),
            Cell::new(band.lower_bound).set_alignment(CellAlignment::Right),
            band.upper_bound.map_or_else(
                || Cell::new("∞").set_alignment(CellAlignment::Right),
                |upper_bound| Cell::new(upper_bound).set_alignment(CellAlignment::Right),
            ),
            Cell::new(band.rate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_bills_table<'a>(bills: impl IntoIterator<Item = &'a Bill>, today: NaiveDate) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Number", "Customer", "Start", "End", "Usage", "Amount", "Due", "Status", "Paid",
    ]);
    for bill in bills {
        let status_color = match bill.payment_status {
            PaymentStatus::Paid => Color::Green,
            PaymentStatus::Unpaid if bill.is_overdue(today) => Color::Red,
            PaymentStatus::Unpaid => Color::DarkYellow,
        };
        table.add_row(vec![
            Cell::new(&bill.number),
            Cell::new(&bill.customer_id),
            Cell::new(bill.period_start),
            Cell::new(bill.period_end).add_attribute(Attribute::Dim),
            Cell::new(bill.usage()).set_alignment(CellAlignment::Right),
            Cell::new(bill.amount()).set_alignment(CellAlignment::Right),
            Cell::new(bill.due_date),
            Cell::new(bill.payment_status).fg(status_color),
            bill.payment_date.map_or_else(|| Cell::new(""), Cell::new),
        ]);
    }
    table
}

#[must_use]
pub fn build_outstanding_table(
    summary: OutstandingSummary,
    distribution: &BTreeMap<PaymentStatus, usize>,
) -> Table {
    let n_bills = |status: PaymentStatus| distribution.get(&status).copied().unwrap_or_default();
    let mut table = new_table();
    table.set_header(vec!["Paid", "Unpaid", "Overdue", "Outstanding"]);
    table.add_row(vec![
        Cell::new(n_bills(PaymentStatus::Paid))
            .set_alignment(CellAlignment::Right)
            .fg(Color::Green),
        Cell::new(n_bills(PaymentStatus::Unpaid)).set_alignment(CellAlignment::Right),
        Cell::new(summary.n_overdue).set_alignment(CellAlignment::Right).fg(
            if summary.n_overdue == 0 { Color::Green } else { Color::Red },
        ),
        Cell::new(summary.amount).set_alignment(CellAlignment::Right).fg(
            if summary.amount > Maloti::ZERO { Color::DarkYellow } else { Color::Green },
        ),
    ]);
    table
}

#[must_use]
pub fn build_dashboard_table(stats: DashboardStats) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Customers", "Bills", "Unpaid", "Revenue", "Outstanding", "This month"]);
    table.add_row(vec![
        Cell::new(stats.n_customers).set_alignment(CellAlignment::Right),
        Cell::new(stats.n_bills).set_alignment(CellAlignment::Right),
        Cell::new(stats.n_unpaid).set_alignment(CellAlignment::Right),
        Cell::new(stats.revenue).set_alignment(CellAlignment::Right).fg(Color::Green),
        Cell::new(stats.outstanding).set_alignment(CellAlignment::Right).fg(
            if stats.outstanding > Maloti::ZERO { Color::DarkYellow } else { Color::Green },
        ),
        Cell::new(stats.billed_this_month).set_alignment(CellAlignment::Right),
    ]);
    table
}

#[must_use]
pub fn build_monthly_revenue_table(report: &[MonthlyRevenue]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Bills", "Usage", "Amount"]);
    for month in report {
        table.add_row(vec![
            Cell::new(month.month),
            Cell::new(month.n_bills).set_alignment(CellAlignment::Right),
            Cell::new(month.usage).set_alignment(CellAlignment::Right),
            Cell::new(month.amount).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_top_consumers_table(consumers: &[CustomerConsumption]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Customer", "Bills", "Usage", "Amount"]);
    for (rank, consumer) in consumers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).add_attribute(Attribute::Dim),
            Cell::new(&consumer.customer_id),
            Cell::new(consumer.n_bills).set_alignment(CellAlignment::Right),
            Cell::new(consumer.usage).set_alignment(CellAlignment::Right),
            Cell::new(consumer.amount).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
