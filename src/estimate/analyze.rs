//! Main estimation orchestrator
//!
//! This module contains the core function that turns validated sessions, a
//! personal profile and an evaluation context into a complete [`EtgEstimate`].

use super::calc;
use super::curve::EtgCurve;
use super::error::EstimateError;
use super::timeline::Timeline;
use super::types::*;
use crate::data::time::{hours_between, shift_hours};
use crate::data::{InputError, NormalizedSessions, PersonalProfile};

/// Perform a complete estimate
///
/// # Arguments
/// * `normalized` - Validated sessions (sorted, non-empty) and skip records
/// * `profile` - Personal physiology
/// * `context` - Evaluation instant, threshold and optional test time
/// * `options` - Model configuration
/// * `drinker_id` - Identifier attached to the result
pub(crate) fn analyze(
    normalized: &NormalizedSessions,
    profile: &PersonalProfile,
    context: &EstimateContext,
    options: &EstimateOptions,
    drinker_id: Option<&str>,
) -> Result<EtgEstimate, EstimateError> {
    options.validate()?;
    let weight_kg = profile.weight_kg()?;
    let threshold = context.threshold;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(InputError::InvalidThreshold { value: threshold }.into());
    }

    let sessions = &normalized.sessions;
    let (Some(first), Some(drinking_end)) = (
        sessions.iter().map(|s| s.start).min(),
        sessions.iter().map(|s| s.end).max(),
    ) else {
        return Err(InputError::NoValidSessions.into());
    };

    let now = context.now;
    let constants = &options.constants;

    // Intake
    let total_grams: f64 = sessions.iter().map(|s| s.alcohol_grams).sum();
    let intake = IntakeParams {
        total_grams,
        standard_drinks: calc::standard_drinks(total_grams),
        sessions: sessions.len(),
        first_start: first,
        drinking_end,
    };

    // Curve on an axis where 0 is now
    let k = calc::elimination_rate(constants, profile.rate_divisor())?;
    let curve = EtgCurve::from_sessions(sessions, now, options.model, constants, k)?;
    let hours_since_last_drink = hours_between(drinking_end, now);

    tracing::debug!(
        drinker = drinker_id.unwrap_or("-"),
        total_grams,
        elimination_rate = k,
        model = ?options.model,
        hours_since_last_drink,
        "estimating EtG curve"
    );

    let current = curve.level(0.0).max(0.0);
    let levels = LevelParams {
        peak: curve.max_level(),
        current,
        status: LevelStatus::classify(current, threshold, options.caution_factor),
        elimination_rate: k,
    };

    // Clearance
    let safe_hour = curve.safe_time(threshold)?;
    let hours_until_safe = safe_hour.map_or(0.0, |h| h.max(0.0));
    let safe_at = safe_hour
        .map(|h| {
            shift_hours(now, h).ok_or_else(|| EstimateError::TimeOutOfRange {
                what: "safe instant".to_string(),
            })
        })
        .transpose()?;

    let total_elimination_hours = match curve.components() {
        [only] => calc::total_elimination_hours(only.peak, constants, k),
        _ => match curve.safe_time(constants.effective_zero)? {
            Some(h) => (h + hours_since_last_drink).max(0.0),
            None => constants.hours_to_peak,
        },
    };

    let clearance = ClearanceParams {
        hours_since_last_drink,
        hours_until_safe,
        safe_at,
        total_elimination_hours,
    };

    // Test prediction
    let mut warnings: Vec<Warning> = normalized
        .skipped
        .iter()
        .map(|&(index, reason)| Warning::SkippedSession { index, reason })
        .collect();

    let test = context.test_time.map(|test_time| {
        let hours_until_test = hours_between(now, test_time);
        if hours_until_test < 0.0 {
            warnings.push(Warning::TestInPast);
        }
        if test_time < first {
            warnings.push(Warning::TestBeforeDrinking);
        }
        let verdict = match safe_at {
            Some(safe) if test_time <= safe => Verdict::Fail,
            _ => Verdict::Pass,
        };
        TestPrediction {
            test_time,
            hours_until_test,
            estimated_level: curve.level(hours_until_test),
            verdict,
        }
    });

    if hours_since_last_drink < 0.0 {
        warnings.push(Warning::FutureDrinking);
    } else if let Some(peak_hour) = curve.last_peak_time().filter(|&h| h > 0.0) {
        warnings.push(Warning::StillRising {
            hours_to_peak: peak_hour,
        });
    }

    let timeline = Timeline::build(
        hours_since_last_drink,
        hours_until_safe,
        total_elimination_hours,
        current > threshold,
    );

    Ok(EtgEstimate {
        drinker_id: drinker_id.map(|s| s.to_string()),
        evaluated_at: now,
        model: options.model,
        threshold,
        weight_kg,
        intake,
        levels,
        clearance,
        test,
        timeline,
        quality: Quality { warnings },
    })
}
