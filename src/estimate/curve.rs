//! The EtG curve and its inversion
//!
//! An [`EtgCurve`] is a sum of rise-then-decay components on a time axis in
//! hours relative to a reference instant (the evaluation "now" in
//! [`analyze`](super::analyze)). Each component stays at zero until its
//! drinking ends, rises linearly to its peak over `hours_to_peak`, then
//! decays geometrically.
//!
//! # Inversion
//!
//! Between consecutive breakpoints (component ends and peaks) every
//! component is zero, linear or a decaying exponential, so the sum is convex
//! there and its sublevel sets are intervals. After the last peak the sum is
//! non-increasing. The last downward threshold crossing therefore lies between
//! the last breakpoint above the threshold and the breakpoint that follows
//! it, or a closed-form bound when no breakpoint follows. It is located with
//! Brent's method; a single component uses the closed form directly.

use argmin::core::{CostFunction, Error, Executor};
use argmin::solver::brent::BrentRoot;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::calc;
use super::error::EstimateError;
use super::types::{CurveModel, ModelConstants};
use crate::data::time::hours_between;
use crate::data::DrinkingSession;

const ROOT_TOLERANCE: f64 = 1e-9;
const MAX_ROOT_ITERS: u64 = 200;

/// One rise-then-decay contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveComponent {
    /// Hour at which drinking ends and the level starts rising
    pub end: f64,
    /// Level reached `hours_to_peak` after `end`
    pub peak: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtgCurve {
    components: Vec<CurveComponent>,
    hours_to_peak: f64,
    elimination_rate: f64,
}

impl EtgCurve {
    /// Build a curve from explicit components
    ///
    /// `elimination_rate` must lie strictly between 0 and 1, `hours_to_peak`
    /// must be positive, and every component needs a finite end and a
    /// non-negative peak.
    pub fn new(
        components: Vec<CurveComponent>,
        hours_to_peak: f64,
        elimination_rate: f64,
    ) -> Result<Self, EstimateError> {
        if !hours_to_peak.is_finite() || hours_to_peak <= 0.0 {
            return Err(EstimateError::invalid("hours_to_peak", hours_to_peak));
        }
        if !(elimination_rate > 0.0 && elimination_rate < 1.0) {
            return Err(EstimateError::invalid("elimination_rate", elimination_rate));
        }
        if let Some(bad) = components
            .iter()
            .find(|c| !c.end.is_finite() || !c.peak.is_finite() || c.peak < 0.0)
        {
            return Err(EstimateError::invalid("component_peak", bad.peak));
        }
        Ok(Self {
            components,
            hours_to_peak,
            elimination_rate,
        })
    }

    /// Build the curve for validated sessions on an axis centred at `reference`
    pub fn from_sessions(
        sessions: &[DrinkingSession],
        reference: NaiveDateTime,
        model: CurveModel,
        constants: &ModelConstants,
        elimination_rate: f64,
    ) -> Result<Self, EstimateError> {
        let components = match model {
            CurveModel::Aggregate => {
                let total: f64 = sessions.iter().map(|s| s.alcohol_grams).sum();
                sessions
                    .iter()
                    .map(|s| s.end)
                    .max()
                    .map(|end| CurveComponent {
                        end: hours_between(reference, end),
                        peak: calc::peak_level(total, constants),
                    })
                    .into_iter()
                    .collect()
            }
            CurveModel::Superposition => sessions
                .iter()
                .map(|s| CurveComponent {
                    end: hours_between(reference, s.end),
                    peak: calc::peak_level(s.alcohol_grams, constants),
                })
                .collect(),
        };
        Self::new(components, constants.hours_to_peak, elimination_rate)
    }

    pub fn components(&self) -> &[CurveComponent] {
        &self.components
    }

    pub fn hours_to_peak(&self) -> f64 {
        self.hours_to_peak
    }

    pub fn elimination_rate(&self) -> f64 {
        self.elimination_rate
    }

    /// Level at hour `t`
    pub fn level(&self, t: f64) -> f64 {
        self.components
            .iter()
            .map(|c| {
                calc::level_after_end(c.peak, t - c.end, self.hours_to_peak, self.elimination_rate)
            })
            .sum()
    }

    /// Hour of the latest component peak
    pub fn last_peak_time(&self) -> Option<f64> {
        self.components
            .iter()
            .map(|c| c.end + self.hours_to_peak)
            .max_by(f64::total_cmp)
    }

    /// Highest level the curve reaches
    ///
    /// Convexity between breakpoints puts the maximum on a breakpoint.
    pub fn max_level(&self) -> f64 {
        self.breakpoints()
            .into_iter()
            .map(|t| self.level(t))
            .fold(0.0, f64::max)
    }

    /// Sum of the component peaks, an upper bound on the level
    pub fn total_peak(&self) -> f64 {
        self.components.iter().map(|c| c.peak).sum()
    }

    /// Sample the curve from `from` to `to` (inclusive) every `step` hours
    pub fn sample(&self, from: f64, to: f64, step: f64) -> Vec<(f64, f64)> {
        if !(step > 0.0) || !from.is_finite() || !to.is_finite() || to < from {
            return Vec::new();
        }
        let n = ((to - from) / step).floor() as usize;
        let mut points: Vec<(f64, f64)> = (0..=n)
            .map(|i| {
                let t = from + step * i as f64;
                (t, self.level(t))
            })
            .collect();
        if points.last().is_some_and(|&(t, _)| t < to) {
            points.push((to, self.level(to)));
        }
        points
    }

    /// Sorted, de-duplicated component ends and peaks
    fn breakpoints(&self) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .components
            .iter()
            .flat_map(|c| [c.end, c.end + self.hours_to_peak])
            .collect();
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }

    /// Hour after which the level stays at or below `threshold`
    ///
    /// Returns `None` when the level never exceeds the threshold.
    pub fn safe_time(&self, threshold: f64) -> Result<Option<f64>, EstimateError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(EstimateError::invalid("threshold", threshold));
        }

        let points = self.breakpoints();
        let Some(last) = points.iter().rposition(|&t| self.level(t) > threshold) else {
            return Ok(None);
        };
        let lo = points[last];

        if last + 1 == points.len() {
            // Above threshold at the last peak; pure decay from here
            if let [only] = self.components.as_slice() {
                return Ok(Some(
                    lo + calc::hours_to_decay(only.peak, threshold, self.elimination_rate),
                ));
            }
            let bound =
                lo + calc::hours_to_decay(self.total_peak(), threshold, self.elimination_rate);
            return self.crossing(lo, bound + 1e-6, threshold).map(Some);
        }

        self.crossing(lo, points[last + 1], threshold).map(Some)
    }

    /// Root of `level(t) = threshold` in `[lo, hi]`, given `level(lo) > threshold >= level(hi)`
    fn crossing(&self, lo: f64, hi: f64, threshold: f64) -> Result<f64, EstimateError> {
        let problem = ThresholdCrossing {
            curve: self,
            threshold,
        };
        let solver = BrentRoot::new(lo, hi, ROOT_TOLERANCE);
        let res = Executor::new(problem, solver)
            .configure(|state| state.max_iters(MAX_ROOT_ITERS))
            .run()
            .map_err(|e| EstimateError::Inversion {
                reason: e.to_string(),
            })?;

        let state = res.state;
        state
            .best_param
            .or(state.param)
            .ok_or_else(|| EstimateError::Inversion {
                reason: format!("no root found in [{lo}, {hi}]"),
            })
    }
}

struct ThresholdCrossing<'a> {
    curve: &'a EtgCurve,
    threshold: f64,
}

impl CostFunction for ThresholdCrossing<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, t: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.curve.level(*t) - self.threshold)
    }
}
