use std::array;

use crate::{
    billing::{
        breakdown::{TierBreakdown, TierCharge},
        error::InvalidUsage,
        tariff::{N_TIERS, RateSchedule},
    },
    prelude::*,
    quantity::{currency::Maloti, energy::KilowattHours},
};

/// Progressive (marginal) pricing: only the usage inside a band is charged at that band's rate.
#[derive(Copy, Clone, Debug, Default)]
#[must_use]
pub struct TieredBillCalculator {
    schedule: RateSchedule,
}

impl TieredBillCalculator {
    pub const fn new(schedule: RateSchedule) -> Self {
        Self { schedule }
    }

    pub const fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    pub fn calculate(&self, usage: KilowattHours) -> Result<TierBreakdown, InvalidUsage> {
        if usage < KilowattHours::ZERO {
            return Err(InvalidUsage::Negative(usage));
        }

        let bands = self.schedule.bands();
        let mut usages = [KilowattHours::ZERO; N_TIERS];
        let mut remaining = usage;

        // Peel the usage off from the top band down:
        for (band, band_usage) in bands.iter().zip(&mut usages).rev() {
            if remaining > band.lower_bound {
                *band_usage = remaining - band.lower_bound;
                remaining = band.lower_bound;
            }
        }

        let mut amounts = [Maloti::ZERO; N_TIERS];
        for ((amount, band_usage), band) in amounts.iter_mut().zip(usages).zip(&bands) {
            *amount = band_usage.checked_mul(band.rate).ok_or(InvalidUsage::TooLarge(usage))?;
        }
        let breakdown = TierBreakdown::try_new(
            usage,
            array::from_fn(|index| TierCharge {
                band: bands[index],
                usage: usages[index],
                amount: amounts[index],
            }),
        )
        .ok_or(InvalidUsage::TooLarge(usage))?;
        debug!(%usage, total_amount = %breakdown.total_amount(), "calculated");
        Ok(breakdown)
    }

    /// Calculate the billed amount when the breakdown is not needed.
    pub fn total(&self, usage: KilowattHours) -> Result<Maloti, InvalidUsage> {
        Ok(self.calculate(usage)?.total_amount())
    }
}
