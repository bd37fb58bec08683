//! Tests for intake conversion
//!
//! A standard pour of beer, wine or spirits should all come out close to one
//! standard drink (14 g of ethanol).

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use etgcalc::prelude::*;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

fn grams(input: DrinkInput) -> f64 {
    input
        .normalize(0)
        .expect("valid session")
        .expect("session is not skipped")
        .alcohol_grams
}

#[test]
fn test_standard_pours_are_one_drink() {
    let beer = DrinkInput::volume(DrinkType::Beer, 12.0, AmountUnit::Oz, start());
    let wine = DrinkInput::volume(DrinkType::Wine, 5.0, AmountUnit::Oz, start());
    let shot = DrinkInput::volume(DrinkType::Liquor, 1.5, AmountUnit::Oz, start());

    for input in [beer, wine, shot] {
        assert_relative_eq!(grams(input), 14.0, epsilon = 1e-3);
    }
}

#[test]
fn test_millilitres() {
    // a 500 ml can of 5% beer
    let can = DrinkInput::volume(DrinkType::Beer, 500.0, AmountUnit::Ml, start());
    assert_relative_eq!(grams(can), 19.725, epsilon = 1e-9);
}

#[test]
fn test_custom_abv() {
    let cider = DrinkInput::volume(DrinkType::Custom, 330.0, AmountUnit::Ml, start())
        .with_custom_abv(8.0);
    assert_relative_eq!(grams(cider), 330.0 * 0.08 * 0.789, epsilon = 1e-9);

    // standard drinks ignore the ABV, but a custom drink still needs one
    let mut counted = DrinkInput::standard_drinks(start(), 2.0, 1.0);
    counted.drink_type = DrinkType::Custom;
    assert_eq!(
        counted.normalize(4),
        Err(InputError::InvalidCustomAbv { session: 4 })
    );
    assert_relative_eq!(grams(counted.with_custom_abv(40.0)), 28.0);
}

#[test]
fn test_duration_units() {
    let session = DrinkInput::standard_drinks(start(), 2.0, 0.0)
        .with_duration(90.0, DurationUnit::Minutes)
        .normalize(0)
        .unwrap()
        .unwrap();
    assert_relative_eq!(session.duration_hours, 1.5);
    assert_eq!(
        session.end,
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap()
    );
}

#[test]
fn test_weight_in_pounds() {
    let drinker = Drinker::builder("lbs")
        .weight(180.0, WeightUnit::Lbs)
        .drinks(start(), 2.0, 1.0)
        .build();
    let result = drinker
        .estimate(
            &EstimateContext::new(start()),
            &EstimateOptions::default(),
        )
        .unwrap();
    assert_relative_eq!(result.weight_kg, 81.64656, epsilon = 1e-9);
}

#[test]
fn test_weight_does_not_change_levels() {
    let light = Drinker::builder("light")
        .weight(50.0, WeightUnit::Kg)
        .drinks(start(), 4.0, 2.0)
        .build();
    let heavy = Drinker::builder("heavy")
        .weight(120.0, WeightUnit::Kg)
        .drinks(start(), 4.0, 2.0)
        .build();
    let context = EstimateContext::new(start() + chrono::TimeDelta::hours(10));
    let options = EstimateOptions::default();
    let a = light.estimate(&context, &options).unwrap();
    let b = heavy.estimate(&context, &options).unwrap();
    assert_eq!(a.levels.current, b.levels.current);
    assert_eq!(a.clearance.safe_at, b.clearance.safe_at);
}
