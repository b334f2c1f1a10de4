//! ROI-based labelers.
//!
//! Both strategies here designate short/long by comparing the plain
//! percentage gain of each leg over the window, not gain versus the moving
//! average. This is a different rule from `stats::pair::short_long_split` and
//! is kept separate deliberately.
//!
//! Invariant: `offset >= n`, since the realized outcome is read from the
//! pre-window `[offset - n, offset]`. Violations label as NaN; configuration
//! validation rejects them before this point in the normal pipeline.

use crate::classify::TradeLabeler;
use crate::domain::TimeSeries;
use crate::stats::single::gain;

/// Short the leg with the larger plain percentage gain over the window.
fn plain_gain_split<'a>(
    a: &'a TimeSeries,
    b: &'a TimeSeries,
    n: usize,
    offset: usize,
) -> (&'a TimeSeries, &'a TimeSeries) {
    if gain(a, n, offset) > gain(b, n, offset) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Continuous label in `(-1, 1)`: the combined short+long ROI over the
/// holding window `[offset - n, offset]`, squashed through `tanh(5x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedRoi;

impl TradeLabeler for BoundedRoi {
    fn name(&self) -> &'static str {
        "bounded_roi"
    }

    fn label(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64 {
        let Some(exit) = offset.checked_sub(n) else {
            return f64::NAN;
        };
        let (short, long) = plain_gain_split(a, b, n, offset);

        let roi_short = (short.close(offset) - short.close(exit)) / short.close(offset);
        let roi_long = (long.close(exit) - long.close(offset)) / long.close(offset);

        (5.0 * (roi_short + roi_long)).tanh()
    }
}

/// Binary label: 1 iff the shorted leg fell and the long leg rose over the
/// holding window, else 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinningTrade;

impl TradeLabeler for WinningTrade {
    fn name(&self) -> &'static str {
        "winning_trade"
    }

    fn label(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64 {
        let Some(exit) = offset.checked_sub(n) else {
            return f64::NAN;
        };
        let (short, long) = plain_gain_split(a, b, n, offset);

        let short_fell = short.close(offset) > short.close(exit);
        let long_rose = long.close(exit) > long.close(offset);
        if short_fell && long_rose {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two legs entered at offset 5 with n = 5. Leg A gained into the entry
    /// (shorted) and then fell to 99; leg B lost into the entry (long) and
    /// then rose to 105.
    fn reverting_pair() -> (TimeSeries, TimeSeries) {
        let mut a = vec![100.0; 11];
        a[0] = 99.0;
        a[5] = 110.0;
        a[10] = 100.0;
        let mut b = vec![100.0; 11];
        b[0] = 105.0;
        b[5] = 95.0;
        b[10] = 100.0;
        (
            TimeSeries::from_closes("A", a),
            TimeSeries::from_closes("B", b),
        )
    }

    #[test]
    fn test_bounded_roi_reverting_pair() {
        let (a, b) = reverting_pair();
        let roi_short: f64 = (110.0 - 99.0) / 110.0;
        let roi_long: f64 = (105.0 - 95.0) / 95.0;
        let expected = (5.0 * (roi_short + roi_long)).tanh();

        assert_relative_eq!(BoundedRoi.label(&a, &b, 5, 5), expected, epsilon = 1e-12);
        // Designation is value-driven, so argument order cannot change it
        assert_relative_eq!(BoundedRoi.label(&b, &a, 5, 5), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_bounded_roi_stays_in_open_unit_interval() {
        let (a, b) = reverting_pair();
        let label = BoundedRoi.label(&a, &b, 5, 5);
        assert!(label > -1.0 && label < 1.0);
    }

    #[test]
    fn test_bounded_roi_offset_smaller_than_window_is_nan() {
        let (a, b) = reverting_pair();
        assert!(BoundedRoi.label(&a, &b, 5, 2).is_nan());
    }

    #[test]
    fn test_winning_trade_requires_both_legs() {
        let (a, b) = reverting_pair();
        assert_eq!(WinningTrade.label(&a, &b, 5, 5), 1.0);

        // Same entry but the long leg keeps falling: not a winner
        let mut b_bad = vec![100.0; 11];
        b_bad[0] = 90.0;
        b_bad[5] = 95.0;
        b_bad[10] = 100.0;
        let b_bad = TimeSeries::from_closes("B", b_bad);
        assert_eq!(WinningTrade.label(&a, &b_bad, 5, 5), 0.0);
    }
}
