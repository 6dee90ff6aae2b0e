use std::path::PathBuf;

use clap::Parser;

use crate::{
    billing::{RateSchedule, TieredBillCalculator},
    prelude::*,
};

#[derive(Parser)]
pub struct TariffArgs {
    /// Rate schedule TOML file, the built-in tariff is used when omitted.
    #[clap(long = "tariff-path", env = "TARIFF_PATH")]
    path: Option<PathBuf>,
}

impl TariffArgs {
    pub fn schedule(&self) -> Result<RateSchedule> {
        self.path.as_ref().map_or_else(|| Ok(RateSchedule::default()), RateSchedule::read_from)
    }

    pub fn calculator(&self) -> Result<TieredBillCalculator> {
        Ok(TieredBillCalculator::new(self.schedule()?))
    }
}
