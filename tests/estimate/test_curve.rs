//! Tests for the EtG curve
//!
//! Shape of the rise and decay, and agreement between the numerical inversion
//! and the level function.

use approx::assert_relative_eq;
use etgcalc::estimate::*;

fn two_sessions() -> EtgCurve {
    EtgCurve::new(
        vec![
            CurveComponent {
                end: 0.0,
                peak: 1400.0,
            },
            CurveComponent {
                end: 8.0,
                peak: 700.0,
            },
        ],
        5.0,
        0.25,
    )
    .unwrap()
}

#[test]
fn test_decay_after_last_peak_is_monotone() {
    let curve = two_sessions();
    let peak = curve.last_peak_time().unwrap();
    assert_eq!(peak, 13.0);

    let points = curve.sample(peak, peak + 48.0, 0.5);
    assert!(points.windows(2).all(|w| w[1].1 <= w[0].1));
    assert!(points.last().unwrap().1 < 1.0);
}

#[test]
fn test_zero_before_drinking_ends() {
    let curve = two_sessions();
    for (_, level) in curve.sample(-10.0, 0.0, 1.0) {
        assert_eq!(level, 0.0);
    }
}

#[test]
fn test_safe_time_is_last_crossing() {
    let curve = two_sessions();
    for threshold in [100.0, 300.0, 500.0, 800.0] {
        let t = curve.safe_time(threshold).unwrap().unwrap();
        assert_relative_eq!(curve.level(t), threshold, epsilon = 1e-4);
        for (_, level) in curve.sample(t + 1e-3, t + 72.0, 0.25) {
            assert!(level <= threshold);
        }
    }
}

#[test]
fn test_safe_time_above_max_level() {
    let curve = two_sessions();
    assert!(curve.max_level() < 2000.0);
    assert_eq!(curve.safe_time(2000.0).unwrap(), None);
}

#[test]
fn test_safe_time_matches_calc_for_one_session() {
    let k = 0.25 / (1.15 * 1.3);
    let curve = EtgCurve::new(
        vec![CurveComponent {
            end: 0.0,
            peak: 1470.0,
        }],
        5.0,
        k,
    )
    .unwrap();
    let t = curve.safe_time(500.0).unwrap().unwrap();
    assert_relative_eq!(t, 5.0 + 5.8932487680059, epsilon = 1e-9);
    assert_relative_eq!(t, 5.0 + hours_to_decay(1470.0, 500.0, k), epsilon = 1e-12);
}

#[test]
fn test_total_elimination() {
    let c = ModelConstants::default();
    let h = total_elimination_hours(peak_level(42.0, &c), &c, 0.25);
    // the 5 hour rise plus about 9.3 hours of decay
    assert!(h > 14.0 && h < 15.0);
    assert_relative_eq!(
        level_after_end(1470.0, h, c.hours_to_peak, 0.25),
        c.effective_zero,
        epsilon = 1e-9
    );
}
