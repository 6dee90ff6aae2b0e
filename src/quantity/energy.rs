use std::ops::Mul;

use crate::quantity::{currency::Maloti, rate::KilowattHourRate};

quantity!(KilowattHours, prefix: "", suffix: " kWh");

impl KilowattHours {
    /// Price the energy, [`None`] when the amount does not fit into a decimal.
    pub fn checked_mul(self, rate: KilowattHourRate) -> Option<Maloti> {
        self.0.checked_mul(rate.0).map(Maloti)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Maloti;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Maloti(self.0 * rhs.0)
    }
}
