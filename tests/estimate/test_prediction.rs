//! Tests for safe-time estimates and test predictions
//!
//! Tests cover:
//! - Verdicts around the safe instant
//! - Repeated sessions under both curve models
//! - Option presets and cohorts

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use etgcalc::prelude::*;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Four drinks from 19:00 to 22:00 on three consecutive evenings
fn three_evenings() -> Drinker {
    Drinker::builder("three_evenings")
        .sex(Sex::Male)
        .drinks(at(12, 19), 4.0, 3.0)
        .repeat(2, 24.0)
        .build()
}

#[test]
fn test_verdict_at_the_safe_instant() {
    let drinker = Drinker::builder("boundary")
        .drinks(at(17, 20), 3.0, 2.0)
        .build();
    let options = EstimateOptions::default();
    let now = at(17, 23);

    let safe_at = drinker
        .estimate(&EstimateContext::new(now), &options)
        .unwrap()
        .clearance
        .safe_at
        .unwrap();

    let on_time = drinker
        .estimate(&EstimateContext::new(now).with_test_time(safe_at), &options)
        .unwrap();
    assert_eq!(on_time.test.unwrap().verdict, Verdict::Fail);

    let later = drinker
        .estimate(
            &EstimateContext::new(now).with_test_time(safe_at + TimeDelta::minutes(1)),
            &options,
        )
        .unwrap();
    let test = later.test.unwrap();
    assert_eq!(test.verdict, Verdict::Pass);
    assert!(test.estimated_level < 500.0);
}

#[test]
fn test_repeated_sessions() {
    let drinker = three_evenings();
    assert_eq!(drinker.len(), 3);

    // 12 hours after the last evening ends
    let test_time = at(15, 10);
    let context = EstimateContext::new(at(15, 0)).with_test_time(test_time);

    let aggregate = drinker
        .estimate(&context, &EstimateOptions::default())
        .unwrap();
    assert_relative_eq!(aggregate.intake.standard_drinks, 12.0);
    assert_eq!(aggregate.intake.first_start, at(12, 19));
    assert_eq!(aggregate.intake.drinking_end, at(14, 22));
    assert_relative_eq!(aggregate.levels.peak, 5880.0);
    assert_relative_eq!(
        aggregate.clearance.hours_until_safe,
        13.567457545981062 - 2.0,
        epsilon = 1e-9
    );
    assert_eq!(aggregate.test.unwrap().verdict, Verdict::Fail);

    let superposed = drinker
        .estimate(
            &context,
            &EstimateOptions::default().with_model(CurveModel::Superposition),
        )
        .unwrap();
    assert_relative_eq!(
        superposed.clearance.hours_until_safe,
        9.75210546195184 - 2.0,
        epsilon = 1e-4
    );
    assert_eq!(superposed.test.unwrap().verdict, Verdict::Pass);
}

#[test]
fn test_presets_order_safe_times() {
    let drinker = Drinker::builder("presets")
        .drinks(at(17, 20), 3.0, 2.0)
        .build();
    let context = EstimateContext::new(at(18, 3));

    let hours = |options: EstimateOptions| {
        drinker
            .estimate(&context, &options)
            .unwrap()
            .clearance
            .hours_until_safe
    };
    let conservative = hours(EstimateOptions::conservative());
    let default = hours(EstimateOptions::default());
    let optimistic = hours(EstimateOptions::optimistic());

    assert_relative_eq!(conservative, 4.988439192817136, epsilon = 1e-9);
    assert_relative_eq!(default, 3.748615866674644, epsilon = 1e-9);
    assert_relative_eq!(optimistic, 2.579018353163926, epsilon = 1e-9);
}

#[test]
fn test_threshold_changes_verdict() {
    let drinker = Drinker::builder("cutoffs")
        .drinks(at(17, 20), 3.0, 2.0)
        .build();
    let options = EstimateOptions::default();
    let context = EstimateContext::new(at(18, 9)).with_test_time(at(18, 12));

    let strict = drinker
        .estimate(&context.clone().with_threshold(100.0), &options)
        .unwrap();
    let lenient = drinker
        .estimate(&context.with_threshold(500.0), &options)
        .unwrap();

    assert_eq!(strict.test.unwrap().verdict, Verdict::Fail);
    assert_eq!(lenient.test.unwrap().verdict, Verdict::Pass);
    assert_eq!(strict.levels.current, lenient.levels.current);
}

#[test]
fn test_cohort_results_keep_order() {
    let mut cohort = Cohort::new(vec![three_evenings()]);
    for (id, sex, metabolism) in [
        ("f_slow", Sex::Female, MetabolismRate::Slow),
        ("m_fast", Sex::Male, MetabolismRate::Fast),
    ] {
        cohort.add_drinker(
            Drinker::builder(id)
                .sex(sex)
                .metabolism(metabolism)
                .drinks(at(17, 20), 3.0, 2.0)
                .build(),
        );
    }

    let results = cohort.estimate_all(
        &EstimateContext::new(at(18, 3)),
        &EstimateOptions::default(),
    );
    let ids: Vec<&str> = results.iter().map(|r| r.drinker_id.as_str()).collect();
    assert_eq!(ids, vec!["three_evenings", "f_slow", "m_fast"]);

    let slow = results[1].result.as_ref().unwrap();
    let fast = results[2].result.as_ref().unwrap();
    assert!(slow.clearance.hours_until_safe > fast.clearance.hours_until_safe);
    assert_eq!(slow.levels.current, fast.levels.current);
}
