quantity!(
    /// Amount of money in [maloti][1].
    ///
    /// [1]: https://en.wikipedia.org/wiki/Lesotho_loti
    Maloti, prefix: "M", suffix: ""
);

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Maloti(dec!(120.005)).to_string(), "M120.01");
        assert_eq!(Maloti(dec!(120.00015)).to_string(), "M120.00");
        assert_eq!(Maloti(dec!(-0.125)).to_string(), "M-0.13");
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Maloti(dec!(60)).to_string(), "M60.00");
        assert_eq!(Maloti::ZERO.to_string(), "M0.00");
    }

    #[test]
    fn test_sum_is_exact() {
        let total: Maloti = std::iter::repeat_n(Maloti(dec!(0.1)), 10).sum();
        assert_eq!(total, Maloti(dec!(1)));
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Maloti(dec!(0.1)).checked_add(Maloti(dec!(0.2))), Some(Maloti(dec!(0.3))));
        assert_eq!(Maloti(rust_decimal::Decimal::MAX).checked_add(Maloti(dec!(1))), None);
    }
}
