//! Estimation types: options, context and result structures
//!
//! This module defines all public types for EtG estimation including:
//! - [`EstimateOptions`]: model constants and curve model
//! - [`EstimateContext`]: the evaluation instant, test cutoff and test time
//! - [`EtgEstimate`]: complete structured results
//! - Parameter group structs

use std::{collections::HashMap, fmt};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::EstimateError;
use super::timeline::Timeline;
use crate::data::parser::ParseError;
use crate::data::time;
use crate::data::{SkipReason, DEFAULT_THRESHOLD};

// ============================================================================
// Configuration Types
// ============================================================================

/// Constants of the rise-then-decay EtG model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConstants {
    /// Peak urine EtG per gram of ethanol, in ng/mL (default: 35)
    ///
    /// Reported peaks range from about 25 to 50 ng/mL per gram.
    pub peak_per_gram: f64,
    /// Hours from the end of drinking to peak EtG (default: 5)
    pub hours_to_peak: f64,
    /// Fraction of EtG eliminated per hour after the peak, before
    /// physiological adjustment (default: 0.25)
    pub base_elimination_rate: f64,
    /// Level treated as fully eliminated, in ng/mL (default: 100)
    pub effective_zero: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            peak_per_gram: 35.0,
            hours_to_peak: 5.0,
            base_elimination_rate: 0.25,
            effective_zero: 100.0,
        }
    }
}

/// How multiple sessions combine into one curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveModel {
    /// All alcohol is lumped together and starts rising when the latest
    /// session ends
    #[default]
    Aggregate,
    /// Every session contributes its own curve and the curves are summed
    Superposition,
}

/// Complete estimation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateOptions {
    /// Model constants
    pub constants: ModelConstants,
    /// Session combination model (default: Aggregate)
    pub model: CurveModel,
    /// Levels below `threshold × caution_factor` are reported as
    /// [`LevelStatus::Caution`] rather than [`LevelStatus::Above`] (default: 1.5)
    pub caution_factor: f64,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            constants: ModelConstants::default(),
            model: CurveModel::Aggregate,
            caution_factor: 1.5,
        }
    }
}

impl EstimateOptions {
    /// Upper end of reported peaks (50 ng/mL per gram)
    pub fn conservative() -> Self {
        Self {
            constants: ModelConstants {
                peak_per_gram: 50.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Lower end of reported peaks (25 ng/mL per gram)
    pub fn optimistic() -> Self {
        Self {
            constants: ModelConstants {
                peak_per_gram: 25.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: CurveModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_constants(mut self, constants: ModelConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Set the peak level per gram of ethanol
    pub fn with_peak_per_gram(mut self, peak_per_gram: f64) -> Self {
        self.constants.peak_per_gram = peak_per_gram;
        self
    }

    pub fn with_hours_to_peak(mut self, hours: f64) -> Self {
        self.constants.hours_to_peak = hours;
        self
    }

    pub fn with_caution_factor(mut self, factor: f64) -> Self {
        self.caution_factor = factor;
        self
    }

    /// Check that every constant is usable
    pub fn validate(&self) -> Result<(), EstimateError> {
        let c = &self.constants;
        let positive = [
            ("peak_per_gram", c.peak_per_gram),
            ("hours_to_peak", c.hours_to_peak),
            ("base_elimination_rate", c.base_elimination_rate),
            ("effective_zero", c.effective_zero),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::invalid(name, value));
            }
        }
        if !self.caution_factor.is_finite() || self.caution_factor < 1.0 {
            return Err(EstimateError::invalid("caution_factor", self.caution_factor));
        }
        Ok(())
    }

    /// Parse options from JSON; absent fields keep their defaults
    pub fn from_json_str(text: &str) -> Result<Self, ParseError> {
        serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))
    }

    pub fn from_json_file(path: impl Into<String>) -> Result<Self, ParseError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }
}

/// When the estimate is evaluated, and against which test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateContext {
    /// The instant treated as "now"
    #[serde(with = "time::datetime")]
    pub now: NaiveDateTime,
    /// Test cutoff in ng/mL (default: 500)
    pub threshold: f64,
    /// Scheduled test, if any
    #[serde(default, with = "time::option_datetime")]
    pub test_time: Option<NaiveDateTime>,
}

impl EstimateContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            threshold: DEFAULT_THRESHOLD,
            test_time: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_test_time(mut self, test_time: NaiveDateTime) -> Self {
        self.test_time = Some(test_time);
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Complete EtG estimate with logical parameter grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtgEstimate {
    /// Drinker identifier
    pub drinker_id: Option<String>,
    /// The instant the estimate was evaluated at
    #[serde(with = "time::datetime")]
    pub evaluated_at: NaiveDateTime,
    /// Curve model used
    pub model: CurveModel,
    /// Test cutoff in ng/mL
    pub threshold: f64,
    /// Body weight in kg
    pub weight_kg: f64,

    /// What was drunk and when
    pub intake: IntakeParams,
    /// Estimated levels
    pub levels: LevelParams,
    /// Elimination timing
    pub clearance: ClearanceParams,
    /// Prediction for the scheduled test (if one was given)
    pub test: Option<TestPrediction>,
    /// Chart data
    pub timeline: Timeline,

    /// Quality metrics and warnings
    pub quality: Quality,
}

impl EtgEstimate {
    /// Whether the level is at or below the threshold now and stays there
    pub fn is_safe_now(&self) -> bool {
        self.clearance.hours_until_safe <= 0.0
    }

    /// Flatten result to parameter name-value pairs for export
    pub fn to_params(&self) -> HashMap<&'static str, f64> {
        let mut p = HashMap::new();

        p.insert("threshold", self.threshold);
        p.insert("weight_kg", self.weight_kg);

        p.insert("total_alcohol_g", self.intake.total_grams);
        p.insert("standard_drinks", self.intake.standard_drinks);
        p.insert("sessions", self.intake.sessions as f64);

        p.insert("peak_level", self.levels.peak);
        p.insert("current_level", self.levels.current);
        p.insert("elimination_rate", self.levels.elimination_rate);

        p.insert(
            "hours_since_last_drink",
            self.clearance.hours_since_last_drink,
        );
        p.insert("hours_until_safe", self.clearance.hours_until_safe);
        p.insert(
            "total_elimination_hours",
            self.clearance.total_elimination_hours,
        );

        if let Some(ref t) = self.test {
            p.insert("hours_until_test", t.hours_until_test);
            p.insert("test_level", t.estimated_level);
        }

        p
    }
}

impl fmt::Display for EtgEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════╗")?;
        writeln!(f, "║           EtG Estimate               ║")?;
        writeln!(f, "╠══════════════════════════════════════╣")?;

        if let Some(ref id) = self.drinker_id {
            writeln!(f, "║ Drinker: {:<27} ║", id)?;
        }
        writeln!(
            f,
            "║ Now: {:<31} ║",
            self.evaluated_at.format("%Y-%m-%d %H:%M").to_string()
        )?;

        writeln!(f, "╠══════════════════════════════════════╣")?;
        writeln!(f, "║ INTAKE                               ║")?;
        writeln!(
            f,
            "║   Alcohol: {:<25} ║",
            format!(
                "{:.1}g ({:.1} drinks)",
                self.intake.total_grams, self.intake.standard_drinks
            )
        )?;
        writeln!(
            f,
            "║   Ended:   {:<25} ║",
            self.intake.drinking_end.format("%Y-%m-%d %H:%M").to_string()
        )?;

        writeln!(f, "╠══════════════════════════════════════╣")?;
        writeln!(f, "║ LEVELS (ng/mL)                       ║")?;
        writeln!(f, "║   Peak:    {:>10.0}                ║", self.levels.peak)?;
        writeln!(
            f,
            "║   Current: {:>10.0} {:<14} ║",
            self.levels.current,
            format!("({})", self.levels.status)
        )?;
        writeln!(f, "║   Cutoff:  {:>10.0}                ║", self.threshold)?;

        writeln!(f, "╠══════════════════════════════════════╣")?;
        writeln!(f, "║ CLEARANCE                            ║")?;
        if self.is_safe_now() {
            writeln!(f, "║   Below cutoff now                   ║")?;
        } else {
            writeln!(
                f,
                "║   Safe in: {:<25} ║",
                format_hours(self.clearance.hours_until_safe)
            )?;
            if let Some(at) = self.clearance.safe_at {
                writeln!(
                    f,
                    "║   Safe at: {:<25} ║",
                    at.format("%Y-%m-%d %H:%M").to_string()
                )?;
            }
        }

        if let Some(ref t) = self.test {
            writeln!(f, "╠══════════════════════════════════════╣")?;
            writeln!(f, "║ TEST                                 ║")?;
            writeln!(
                f,
                "║   At:      {:<25} ║",
                t.test_time.format("%Y-%m-%d %H:%M").to_string()
            )?;
            writeln!(f, "║   Level:   {:>10.0}                ║", t.estimated_level)?;
            writeln!(f, "║   Verdict: {:<25} ║", t.verdict.to_string())?;
        }

        if !self.quality.warnings.is_empty() {
            writeln!(f, "╠══════════════════════════════════════╣")?;
            writeln!(f, "║ WARNINGS                             ║")?;
            for w in &self.quality.warnings {
                writeln!(f, "║   • {:<32} ║", format!("{}", w))?;
            }
        }

        writeln!(f, "╚══════════════════════════════════════╝")?;
        Ok(())
    }
}

/// Format a duration in hours as `2d 5h`, or `5h 30m` when under a day
pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "0m".to_string();
    }
    let total_minutes = (hours * 60.0).round() as u64;
    let days = total_minutes / (24 * 60);
    let h = (total_minutes / 60) % 24;
    let m = total_minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 && days == 0 {
        parts.push(format!("{}m", m));
    }
    if parts.is_empty() {
        // under half a minute
        parts.push("0m".to_string());
    }
    parts.join(" ")
}

/// Alcohol intake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeParams {
    /// Grams of pure ethanol across all sessions
    pub total_grams: f64,
    /// Equivalent standard drinks (14 g each)
    pub standard_drinks: f64,
    /// Number of sessions used
    pub sessions: usize,
    /// Start of the earliest session
    #[serde(with = "time::datetime")]
    pub first_start: NaiveDateTime,
    /// End of the latest-ending session
    #[serde(with = "time::datetime")]
    pub drinking_end: NaiveDateTime,
}

/// Estimated urine EtG levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelParams {
    /// Highest level the curve reaches, in ng/mL
    pub peak: f64,
    /// Level at the evaluation instant, in ng/mL
    pub current: f64,
    /// Current level relative to the threshold
    pub status: LevelStatus,
    /// Fraction eliminated per hour after the peak, after physiological adjustment
    pub elimination_rate: f64,
}

/// Elimination timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearanceParams {
    /// Hours from the end of drinking to now (negative while drinking)
    pub hours_since_last_drink: f64,
    /// Hours from now until the level stays at or below the threshold
    pub hours_until_safe: f64,
    /// Instant after which the level stays at or below the threshold
    ///
    /// `None` when the modeled level never exceeds the threshold.
    #[serde(with = "time::option_datetime")]
    pub safe_at: Option<NaiveDateTime>,
    /// Hours from the end of drinking until the level falls below the
    /// effective-zero level
    pub total_elimination_hours: f64,
}

/// Prediction for a scheduled test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPrediction {
    #[serde(with = "time::datetime")]
    pub test_time: NaiveDateTime,
    /// Hours from now until the test (negative for a past test)
    pub hours_until_test: f64,
    /// Modeled level at the test time, in ng/mL
    pub estimated_level: f64,
    pub verdict: Verdict,
}

/// Likely test outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "Likely PASS"),
            Verdict::Fail => write!(f, "Likely FAIL"),
        }
    }
}

/// Current level relative to the test cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    /// Below the threshold
    Below,
    /// At or above the threshold but below `threshold × caution_factor`
    Caution,
    /// At or above `threshold × caution_factor`
    Above,
}

impl LevelStatus {
    pub fn classify(level: f64, threshold: f64, caution_factor: f64) -> Self {
        if level < threshold {
            LevelStatus::Below
        } else if level < threshold * caution_factor {
            LevelStatus::Caution
        } else {
            LevelStatus::Above
        }
    }
}

impl fmt::Display for LevelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelStatus::Below => write!(f, "below"),
            LevelStatus::Caution => write!(f, "near cutoff"),
            LevelStatus::Above => write!(f, "above"),
        }
    }
}

/// Quality metrics and warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quality {
    /// List of warnings
    pub warnings: Vec<Warning>,
}

/// Estimation warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// A session was left out of the estimate
    SkippedSession {
        /// Position of the session in the reported order
        index: usize,
        reason: SkipReason,
    },
    /// Drinking ends after the evaluation instant
    FutureDrinking,
    /// Drinking has ended but the level has not peaked yet
    StillRising {
        /// Hours from now to the last peak
        hours_to_peak: f64,
    },
    /// The test is scheduled before the evaluation instant
    TestInPast,
    /// The test is scheduled before the first session starts
    TestBeforeDrinking,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::SkippedSession { index, reason } => {
                write!(f, "Session #{} skipped: {}", index + 1, reason)
            }
            Warning::FutureDrinking => write!(f, "Drinking ends in the future"),
            Warning::StillRising { hours_to_peak } => {
                write!(f, "Still rising, peak in {:.1}h", hours_to_peak)
            }
            Warning::TestInPast => write!(f, "Test time is in the past"),
            Warning::TestBeforeDrinking => write!(f, "Test is before any drinking"),
        }
    }
}
