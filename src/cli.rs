mod bill;
mod calculate;
mod rates;
mod tariff;

use clap::{Parser, Subcommand};

use crate::{
    cli::{bill::BillArgs, calculate::CalculateArgs, rates::RatesArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        match self.command {
            Command::Calculate(args) => args.run(),
            Command::Rates(args) => args.run(),
            Command::Bill(args) => args.run(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the bill for the specified usage.
    Calculate(CalculateArgs),

    /// Show the tiered rate schedule.
    Rates(RatesArgs),

    /// Issue, pay, and list bills.
    Bill(Box<BillArgs>),
}
