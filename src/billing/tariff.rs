use std::{
    array,
    fmt::{Debug, Display, Formatter},
    fs,
    path::Path,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    billing::error::ScheduleError,
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

pub const N_TIERS: usize = 3;

/// Tier as it is configured: the rate applies to the usage up to `upper_bound`
/// that the lower tiers did not take.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tier {
    /// Inclusive, [`None`] for the open-ended top tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<KilowattHours>,

    pub rate: KilowattHourRate,
}

impl Tier {
    pub const fn bounded(upper_bound: KilowattHours, rate: KilowattHourRate) -> Self {
        Self { upper_bound: Some(upper_bound), rate }
    }

    pub const fn open_ended(rate: KilowattHourRate) -> Self {
        Self { upper_bound: None, rate }
    }
}

/// Tier resolved against its neighbours, so that it knows both of its bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Band {
    /// One-based.
    pub number: usize,

    /// Exclusive.
    pub lower_bound: KilowattHours,

    /// Inclusive, [`None`] for the top band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<KilowattHours>,

    pub rate: KilowattHourRate,
}

/// Legend in the form of `Tier 2 (101–300 kWh)`.
impl Display for Band {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lower_bound = self.lower_bound.0.normalize();
        match self.upper_bound {
            None => write!(f, "Tier {} (Above {lower_bound} kWh)", self.number),
            Some(upper_bound) if self.lower_bound == KilowattHours::ZERO => {
                write!(f, "Tier {} (0–{} kWh)", self.number, upper_bound.0.normalize())
            }
            Some(upper_bound) => {
                // An integer bound reads as the next whole kilowatt-hour:
                let from =
                    if lower_bound.fract().is_zero() { lower_bound + Decimal::ONE } else { lower_bound };
                write!(f, "Tier {} ({from}–{} kWh)", self.number, upper_bound.0.normalize())
            }
        }
    }
}

/// Progressive rate schedule: three tiers with ascending bounds, the last one open-ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct RateSchedule([Tier; N_TIERS]);

/// Lesotho Electricity Company tariff.
impl Default for RateSchedule {
    fn default() -> Self {
        Self([
            Tier::bounded(KilowattHours(Decimal::ONE_HUNDRED), KilowattHourRate(Decimal::new(120, 2))),
            Tier::bounded(KilowattHours(Decimal::new(300, 0)), KilowattHourRate(Decimal::new(150, 2))),
            Tier::open_ended(KilowattHourRate(Decimal::TWO)),
        ])
    }
}

#[derive(Deserialize)]
struct ScheduleFile {
    tiers: Vec<Tier>,
}

impl RateSchedule {
    pub fn try_new(tiers: [Tier; N_TIERS]) -> Result<Self, ScheduleError> {
        let [first, second, third] = tiers;
        let first_bound = first.upper_bound.ok_or(ScheduleError::MissingUpperBound(1))?;
        let second_bound = second.upper_bound.ok_or(ScheduleError::MissingUpperBound(2))?;
        if third.upper_bound.is_some() {
            return Err(ScheduleError::UnexpectedUpperBound);
        }
        if first_bound <= KilowattHours::ZERO || second_bound <= first_bound {
            return Err(ScheduleError::NonAscendingBounds);
        }
        if let Some(index) = tiers.iter().position(|tier| tier.rate < KilowattHourRate::ZERO) {
            return Err(ScheduleError::NegativeRate(index + 1));
        }
        Ok(Self(tiers))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let file: ScheduleFile = toml::from_str(text).context("failed to parse the rate schedule")?;
        Ok(Self::try_from(file.tiers)?)
    }

    #[instrument(name = "reading the rate schedule…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let schedule = Self::from_toml(&text)?;
        debug!(?schedule, "loaded");
        Ok(schedule)
    }

    pub const fn tiers(&self) -> &[Tier; N_TIERS] {
        &self.0
    }

    /// Resolve the lower bound of each tier.
    pub fn bands(&self) -> [Band; N_TIERS] {
        let mut lower_bound = KilowattHours::ZERO;
        array::from_fn(|index| {
            let tier = self.0[index];
            let band = Band {
                number: index + 1,
                lower_bound,
                upper_bound: tier.upper_bound,
                rate: tier.rate,
            };
            if let Some(upper_bound) = tier.upper_bound {
                lower_bound = upper_bound;
            }
            band
        })
    }
}

impl TryFrom<Vec<Tier>> for RateSchedule {
    type Error = ScheduleError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        let tiers: [Tier; N_TIERS] =
            tiers.try_into().map_err(|tiers: Vec<Tier>| ScheduleError::TierCount(tiers.len()))?;
        Self::try_new(tiers)
    }
}

/// Pricing information for the operators.
impl Display for RateSchedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tiered Pricing Rates:")?;
        for band in self.bands() {
            writeln!(f, "{band}: M{:.2} per kWh", band.rate.round_to_cents().0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_default_bands() {
        let [first, second, third] = RateSchedule::default().bands();
        assert_eq!(first.lower_bound, KilowattHours::ZERO);
        assert_eq!(first.upper_bound, Some(KilowattHours(dec!(100))));
        assert_eq!(second.lower_bound, KilowattHours(dec!(100)));
        assert_eq!(second.rate, KilowattHourRate(dec!(1.50)));
        assert_eq!(third.lower_bound, KilowattHours(dec!(300)));
        assert_eq!(third.upper_bound, None);
        assert_eq!(third.rate, KilowattHourRate(dec!(2.00)));
    }

    #[test]
    fn test_legend() {
        let legends = RateSchedule::default().bands().map(|band| band.to_string());
        assert_eq!(legends, ["Tier 1 (0–100 kWh)", "Tier 2 (101–300 kWh)", "Tier 3 (Above 300 kWh)"]);
    }

    #[test]
    fn test_legend_fractional_bound() {
        let rate = KilowattHourRate(dec!(1));
        let schedule = RateSchedule::try_new([
            Tier::bounded(KilowattHours(dec!(100.5)), rate),
            Tier::bounded(KilowattHours(dec!(300)), rate),
            Tier::open_ended(rate),
        ])
        .unwrap();
        let legends = schedule.bands().map(|band| band.to_string());
        assert_eq!(
            legends,
            ["Tier 1 (0–100.5 kWh)", "Tier 2 (100.5–300 kWh)", "Tier 3 (Above 300 kWh)"],
        );
    }

    #[test]
    fn test_pricing_info() {
        assert_eq!(
            RateSchedule::default().to_string(),
            "Tiered Pricing Rates:\n\
             Tier 1 (0–100 kWh): M1.20 per kWh\n\
             Tier 2 (101–300 kWh): M1.50 per kWh\n\
             Tier 3 (Above 300 kWh): M2.00 per kWh\n",
        );
    }

    #[test]
    fn test_from_toml() {
        let schedule = RateSchedule::from_toml(
            r#"
            [[tiers]]
            upper_bound = "50"
            rate = "0.90"

            [[tiers]]
            upper_bound = "200"
            rate = "1.10"

            [[tiers]]
            rate = "1.75"
            "#,
        )
        .unwrap();
        assert_eq!(
            schedule.tiers(),
            &[
                Tier::bounded(KilowattHours(dec!(50)), KilowattHourRate(dec!(0.90))),
                Tier::bounded(KilowattHours(dec!(200)), KilowattHourRate(dec!(1.10))),
                Tier::open_ended(KilowattHourRate(dec!(1.75))),
            ],
        );
    }

    #[test]
    fn test_from_toml_wrong_tier_count() {
        let error = RateSchedule::from_toml("[[tiers]]\nrate = \"1\"\n").unwrap_err();
        assert_eq!(error.downcast_ref::<ScheduleError>(), Some(&ScheduleError::TierCount(1)));
    }

    #[test]
    fn test_missing_upper_bound() {
        let rate = KilowattHourRate(dec!(1));
        let result = RateSchedule::try_new([
            Tier::bounded(KilowattHours(dec!(100)), rate),
            Tier::open_ended(rate),
            Tier::open_ended(rate),
        ]);
        assert_eq!(result, Err(ScheduleError::MissingUpperBound(2)));
    }

    #[test]
    fn test_bounded_top_tier() {
        let rate = KilowattHourRate(dec!(1));
        let result = RateSchedule::try_new([
            Tier::bounded(KilowattHours(dec!(100)), rate),
            Tier::bounded(KilowattHours(dec!(300)), rate),
            Tier::bounded(KilowattHours(dec!(500)), rate),
        ]);
        assert_eq!(result, Err(ScheduleError::UnexpectedUpperBound));
    }

    #[test]
    fn test_non_ascending_bounds() {
        let rate = KilowattHourRate(dec!(1));
        let result = RateSchedule::try_new([
            Tier::bounded(KilowattHours(dec!(300)), rate),
            Tier::bounded(KilowattHours(dec!(300)), rate),
            Tier::open_ended(rate),
        ]);
        assert_eq!(result, Err(ScheduleError::NonAscendingBounds));
    }

    #[test]
    fn test_negative_rate() {
        let result = RateSchedule::try_new([
            Tier::bounded(KilowattHours(dec!(100)), KilowattHourRate(dec!(1))),
            Tier::bounded(KilowattHours(dec!(300)), KilowattHourRate(dec!(1))),
            Tier::open_ended(KilowattHourRate(dec!(-1))),
        ]);
        assert_eq!(result, Err(ScheduleError::NegativeRate(3)));
    }
}
