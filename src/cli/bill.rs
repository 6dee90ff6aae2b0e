use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::{
    billing::MeterReadings,
    cli::tariff::TariffArgs,
    ledger::Ledger,
    prelude::*,
    quantity::energy::KilowattHours,
    tables::{
        build_bills_table,
        build_dashboard_table,
        build_monthly_revenue_table,
        build_outstanding_table,
        build_top_consumers_table,
    },
};

#[derive(Parser)]
pub struct BillArgs {
    /// Bill ledger TOML file.
    #[clap(long = "ledger-path", env = "LEDGER_PATH", default_value = "bills.toml", global = true)]
    ledger_path: PathBuf,

    #[command(subcommand)]
    command: BillCommand,
}

impl BillArgs {
    pub fn run(self) -> Result {
        let mut ledger = Ledger::read_from(&self.ledger_path)?;
        let today = Local::now().date_naive();

        match self.command {
            BillCommand::Issue(args) => {
                let calculator = args.tariff.calculator()?;
                let bill = ledger.issue(
                    &calculator,
                    &args.customer_id,
                    MeterReadings { previous: args.previous_reading, current: args.current_reading },
                    (args.period_start, args.period_end),
                    args.issued_on.unwrap_or(today),
                )?;
                print!("{}", bill.breakdown);
                println!("{}", build_bills_table([bill], today));
                ledger.write_to(&self.ledger_path)?;
            }

            BillCommand::Pay(args) => {
                let bill = ledger.mark_paid(&args.number, args.paid_on.unwrap_or(today))?;
                println!("{}", build_bills_table([bill], today));
                ledger.write_to(&self.ledger_path)?;
            }

            BillCommand::List(args) => {
                let table = match &args.customer_id {
                    Some(customer_id) => build_bills_table(ledger.customer_bills(customer_id), today),
                    None => build_bills_table(ledger.bills(), today),
                };
                println!("{table}");
            }

            BillCommand::Outstanding => {
                let distribution = ledger.status_distribution();
                for (status, n_bills) in &distribution {
                    debug!(%status, n_bills);
                }
                println!("{}", build_outstanding_table(ledger.outstanding(today)?, &distribution));
            }

            BillCommand::Dashboard => {
                println!("{}", build_dashboard_table(ledger.dashboard(today)?));
            }

            BillCommand::Monthly(args) => {
                println!(
                    "{}",
                    build_monthly_revenue_table(&ledger.monthly_revenue(args.months, today)?),
                );
            }

            BillCommand::TopConsumers(args) => {
                println!("{}", build_top_consumers_table(&ledger.top_consumers(args.limit)?));
            }
        }

        Ok(())
    }
}

#[derive(Subcommand)]
pub enum BillCommand {
    /// Bill a customer for the usage between two meter readings.
    Issue(BillIssueArgs),

    /// Mark a bill as paid.
    Pay(BillPayArgs),

    /// List the bills, the latest billing period first when filtered by customer.
    List(BillListArgs),

    /// Summarise unpaid bills.
    Outstanding,

    /// Show bill counts, revenue, and the amount still owed.
    Dashboard,

    /// Show billed usage and amounts per month.
    Monthly(BillMonthlyArgs),

    /// Show the customers with the highest usage.
    TopConsumers(BillTopConsumersArgs),
}

#[derive(Parser)]
pub struct BillIssueArgs {
    #[clap(long)]
    customer_id: String,

    /// Meter reading at the start of the billing period, in kilowatt-hours.
    #[clap(long)]
    previous_reading: KilowattHours,

    /// Meter reading at the end of the billing period, in kilowatt-hours.
    #[clap(long)]
    current_reading: KilowattHours,

    /// First day of the billing period, for example: `2025-01-01`.
    #[clap(long)]
    period_start: NaiveDate,

    /// Last day of the billing period, for example: `2025-01-31`.
    #[clap(long)]
    period_end: NaiveDate,

    /// Issue date, defaults to today.
    #[clap(long)]
    issued_on: Option<NaiveDate>,

    #[clap(flatten)]
    tariff: TariffArgs,
}

#[derive(Parser)]
pub struct BillPayArgs {
    /// Bill number, for example: `BILL-2025-00001`.
    number: String,

    /// Payment date, defaults to today.
    #[clap(long)]
    paid_on: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct BillListArgs {
    /// Only list the bills of this customer.
    #[clap(long)]
    customer_id: Option<String>,
}

#[derive(Parser)]
pub struct BillMonthlyArgs {
    /// Number of months to look back.
    #[clap(long, default_value = "12")]
    months: u32,
}

#[derive(Parser)]
pub struct BillTopConsumersArgs {
    /// Number of customers to show.
    #[clap(long, default_value = "10")]
    limit: usize,
}
