use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    billing::tariff::{Band, N_TIERS},
    quantity::{currency::Maloti, energy::KilowattHours},
};

const RULE: &str = "==============================";

/// Portion of the usage that falls into a single band.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TierCharge {
    pub band: Band,
    pub usage: KilowattHours,
    pub amount: Maloti,
}

/// Result of a single bill calculation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[must_use]
pub struct TierBreakdown {
    total_usage: KilowattHours,
    tiers: [TierCharge; N_TIERS],
    total_amount: Maloti,
}

impl TierBreakdown {
    /// [`None`] when the tier amounts do not add up within the decimal range.
    pub(super) fn try_new(total_usage: KilowattHours, tiers: [TierCharge; N_TIERS]) -> Option<Self> {
        let total_amount =
            tiers.iter().map(|tier| tier.amount).try_fold(Maloti::ZERO, Maloti::checked_add)?;
        Some(Self { total_usage, tiers, total_amount })
    }

    pub const fn total_usage(&self) -> KilowattHours {
        self.total_usage
    }

    pub const fn total_amount(&self) -> Maloti {
        self.total_amount
    }

    pub const fn tiers(&self) -> &[TierCharge; N_TIERS] {
        &self.tiers
    }

    pub const fn tier1_usage(&self) -> KilowattHours {
        self.tiers[0].usage
    }

    pub const fn tier2_usage(&self) -> KilowattHours {
        self.tiers[1].usage
    }

    pub const fn tier3_usage(&self) -> KilowattHours {
        self.tiers[2].usage
    }

    pub const fn tier1_amount(&self) -> Maloti {
        self.tiers[0].amount
    }

    pub const fn tier2_amount(&self) -> Maloti {
        self.tiers[1].amount
    }

    pub const fn tier3_amount(&self) -> Maloti {
        self.tiers[2].amount
    }

    /// One-line summary, for example: `150.00 kWh = M195.00`.
    pub fn summary(&self) -> String {
        format!("{} = {}", self.total_usage, self.total_amount)
    }
}

/// Multi-line audit receipt.
impl Display for TierBreakdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Billing Calculation Breakdown:")?;
        writeln!(f, "{RULE}")?;
        for tier in &self.tiers {
            writeln!(
                f,
                "{}: {} × M{:.2} = {}",
                tier.band,
                tier.usage,
                tier.band.rate.round_to_cents().0,
                tier.amount,
            )?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total Usage: {}", self.total_usage)?;
        writeln!(f, "Total Amount: {}", self.total_amount)
    }
}
