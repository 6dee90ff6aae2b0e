use clap::Parser;

use crate::{cli::tariff::TariffArgs, prelude::*, tables::build_rates_table};

#[derive(Parser)]
pub struct RatesArgs {
    /// Print plain-text pricing information instead of the table.
    #[clap(long)]
    text: bool,

    #[clap(flatten)]
    tariff: TariffArgs,
}

impl RatesArgs {
    pub fn run(self) -> Result {
        let schedule = self.tariff.schedule()?;
        if self.text {
            print!("{schedule}");
        } else {
            println!("{}", build_rates_table(&schedule));
        }
        Ok(())
    }
}
