//! Pure calculation functions for the EtG model
//!
//! This module contains stateless functions for the single-curve model. All
//! times are in hours and all levels in ng/mL. [`EtgCurve`](super::curve::EtgCurve)
//! combines them for one or more sessions.

use super::error::EstimateError;
use super::types::ModelConstants;
use crate::data::GRAMS_PER_STANDARD_DRINK;

/// Peak urine EtG produced by `grams` of ethanol
#[inline]
pub fn peak_level(grams: f64, constants: &ModelConstants) -> f64 {
    grams * constants.peak_per_gram
}

/// Equivalent number of standard drinks
#[inline]
pub fn standard_drinks(grams: f64) -> f64 {
    grams / GRAMS_PER_STANDARD_DRINK
}

/// Hourly elimination fraction after physiological adjustment
///
/// `divisor` is the product of the sex and metabolism multipliers; larger
/// divisors mean slower elimination. The result must lie strictly between 0
/// and 1 for the decay to be defined.
pub fn elimination_rate(constants: &ModelConstants, divisor: f64) -> Result<f64, EstimateError> {
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(EstimateError::invalid("rate_divisor", divisor));
    }
    let k = constants.base_elimination_rate / divisor;
    if !(k > 0.0 && k < 1.0) {
        return Err(EstimateError::invalid("elimination_rate", k));
    }
    Ok(k)
}

/// Level `hours` after the end of drinking for a curve peaking at `peak`
///
/// Zero before drinking ends, a linear rise to `peak` over `hours_to_peak`,
/// then geometric decay by `(1 - k)` per hour.
#[inline]
pub fn level_after_end(peak: f64, hours: f64, hours_to_peak: f64, k: f64) -> f64 {
    let level = if hours <= 0.0 {
        0.0
    } else if hours < hours_to_peak {
        peak * (hours / hours_to_peak)
    } else {
        peak * (1.0 - k).powf(hours - hours_to_peak)
    };
    level.max(0.0)
}

/// Hours of decay needed to go from `peak` down to `target`
///
/// Zero when the peak is already at or below the target.
#[inline]
pub fn hours_to_decay(peak: f64, target: f64, k: f64) -> f64 {
    if peak <= target {
        return 0.0;
    }
    (target / peak).ln() / (1.0 - k).ln()
}

/// Hours from the end of drinking until the level is below `effective_zero`
///
/// Exact for a single curve. Superposed curves are inverted numerically by
/// [`EtgCurve::safe_time`](super::curve::EtgCurve::safe_time) instead.
pub fn total_elimination_hours(peak: f64, constants: &ModelConstants, k: f64) -> f64 {
    constants.hours_to_peak + hours_to_decay(peak, constants.effective_zero, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_peak_level() {
        let c = ModelConstants::default();
        // three standard drinks
        assert_relative_eq!(peak_level(42.0, &c), 1470.0);
        assert_relative_eq!(standard_drinks(42.0), 3.0);
    }

    #[test]
    fn test_elimination_rate_adjustment() {
        let c = ModelConstants::default();
        assert_relative_eq!(elimination_rate(&c, 1.0).unwrap(), 0.25);
        assert_relative_eq!(elimination_rate(&c, 0.8).unwrap(), 0.3125, epsilon = 1e-12);
        assert_relative_eq!(
            elimination_rate(&c, 1.15 * 1.3).unwrap(),
            0.25 / 1.495,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_elimination_rate_out_of_range() {
        let c = ModelConstants {
            base_elimination_rate: 0.9,
            ..Default::default()
        };
        assert!(elimination_rate(&c, 0.8).is_err());
        assert!(elimination_rate(&ModelConstants::default(), 0.0).is_err());
    }

    #[test]
    fn test_level_rise_and_decay() {
        let peak = 1470.0;
        assert_eq!(level_after_end(peak, -3.0, 5.0, 0.25), 0.0);
        assert_eq!(level_after_end(peak, 0.0, 5.0, 0.25), 0.0);
        assert_relative_eq!(level_after_end(peak, 2.5, 5.0, 0.25), 735.0);
        assert_relative_eq!(level_after_end(peak, 5.0, 5.0, 0.25), 1470.0);
        assert_relative_eq!(
            level_after_end(peak, 7.0, 5.0, 0.25),
            1470.0 * 0.5625,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_hours_to_decay_inverts_level() {
        let (peak, k) = (1470.0, 0.25);
        let h = hours_to_decay(peak, 500.0, k);
        assert_relative_eq!(level_after_end(peak, 5.0 + h, 5.0, k), 500.0, epsilon = 1e-9);
        assert_eq!(hours_to_decay(400.0, 500.0, k), 0.0);
    }

    #[test]
    fn test_total_elimination_hours() {
        let c = ModelConstants::default();
        // below effective zero: only the rise counts
        assert_eq!(total_elimination_hours(80.0, &c, 0.25), 5.0);
        let expected = 5.0 + (100.0_f64 / 1470.0).ln() / 0.75_f64.ln();
        assert_relative_eq!(
            total_elimination_hours(1470.0, &c, 0.25),
            expected,
            epsilon = 1e-12
        );
    }
}
