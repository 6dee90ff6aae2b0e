use clap::Parser;

use crate::{
    cli::tariff::TariffArgs,
    prelude::*,
    quantity::energy::KilowattHours,
    tables::build_breakdown_table,
};

#[derive(Parser)]
pub struct CalculateArgs {
    /// Electricity usage in kilowatt-hours.
    #[clap(allow_negative_numbers = true)]
    usage: KilowattHours,

    /// Print the plain-text receipt instead of the table.
    #[clap(long, conflicts_with = "json")]
    report: bool,

    /// Print the breakdown as JSON.
    #[clap(long)]
    json: bool,

    #[clap(flatten)]
    tariff: TariffArgs,
}

impl CalculateArgs {
    #[instrument(skip_all, fields(usage = %self.usage))]
    pub fn run(self) -> Result {
        let breakdown = self.tariff.calculator()?.calculate(self.usage)?;
        info!(summary = %breakdown.summary(), "calculated");
        if self.json {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        } else if self.report {
            print!("{breakdown}");
        } else {
            println!("{}", build_breakdown_table(&breakdown));
        }
        Ok(())
    }
}
