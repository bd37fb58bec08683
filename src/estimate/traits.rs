//! Extension traits for EtG estimation on drinker data
//!
//! The [`Estimate`] trait adds estimation to [`Drinker`] without creating a
//! dependency from `data` → `estimate`.
//!
//! ```rust,ignore
//! use etgcalc::prelude::*;
//!
//! let result = drinker.estimate(&EstimateContext::new(now), &EstimateOptions::default())?;
//! ```

use chrono::NaiveDateTime;
use rayon::prelude::*;

use super::analyze::analyze;
use super::error::EstimateError;
use super::types::{EstimateContext, EstimateOptions, EtgEstimate};
use crate::data::{Cohort, Drinker, Scenario};

/// Structured estimate for a single drinker in a cohort
#[derive(Debug, Clone)]
pub struct DrinkerEstimate {
    pub drinker_id: String,
    pub result: Result<EtgEstimate, EstimateError>,
}

/// Extension trait for EtG estimation
pub trait Estimate {
    /// Estimate the curve and evaluate it in `context`
    fn estimate(
        &self,
        context: &EstimateContext,
        options: &EstimateOptions,
    ) -> Result<EtgEstimate, EstimateError>;
}

/// Extension trait for batch estimation
pub trait EstimatePopulation {
    /// Estimate every drinker in the same context, in parallel
    ///
    /// One failing drinker does not affect the others.
    fn estimate_all(
        &self,
        context: &EstimateContext,
        options: &EstimateOptions,
    ) -> Vec<DrinkerEstimate>;
}

impl Estimate for Drinker {
    fn estimate(
        &self,
        context: &EstimateContext,
        options: &EstimateOptions,
    ) -> Result<EtgEstimate, EstimateError> {
        let normalized = self.sessions_normalized()?;
        analyze(&normalized, self.profile(), context, options, Some(self.id()))
    }
}

impl EstimatePopulation for Cohort {
    fn estimate_all(
        &self,
        context: &EstimateContext,
        options: &EstimateOptions,
    ) -> Vec<DrinkerEstimate> {
        self.drinkers()
            .par_iter()
            .map(|drinker| DrinkerEstimate {
                drinker_id: drinker.id().clone(),
                result: drinker.estimate(context, options),
            })
            .collect()
    }
}

impl Scenario {
    /// Estimate this scenario as evaluated at `now`
    ///
    /// The threshold and test time come from the scenario itself.
    pub fn estimate_at(
        &self,
        now: NaiveDateTime,
        options: &EstimateOptions,
    ) -> Result<EtgEstimate, EstimateError> {
        let context = EstimateContext {
            now,
            threshold: self.threshold,
            test_time: self.test_time,
        };
        let normalized = self.to_drinker("scenario").sessions_normalized()?;
        analyze(&normalized, &self.profile, &context, options, None)
    }
}
