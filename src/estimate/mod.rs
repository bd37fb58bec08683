//! EtG estimation from reported drinking sessions
//!
//! This module turns drinking sessions into an estimated urine ethyl
//! glucuronide (EtG) curve and answers two questions: when does the level
//! drop below a test cutoff for good, and will a test at a given time pass.
//! It integrates with the crate's data structures ([`crate::Drinker`],
//! [`crate::Cohort`], [`crate::Scenario`]).
//!
//! # Model
//!
//! | Quantity | Rule |
//! |----------|------|
//! | Alcohol | standard drinks × 14 g, or volume × ABV × 0.789 g/ml |
//! | Peak | grams × 35 ng/mL |
//! | Rise | linear from the end of drinking to the peak 5 h later |
//! | Decay | × (1 − k) per hour after the peak |
//! | k | 0.25 / (sex multiplier × metabolism multiplier) |
//!
//! Sessions are either lumped together at the end of the latest session
//! ([`CurveModel::Aggregate`]) or summed as separate curves
//! ([`CurveModel::Superposition`]). The model is a simplified approximation,
//! not a clinical tool.
//!
//! # Usage
//!
//! ```rust,ignore
//! use etgcalc::prelude::*;
//!
//! let drinker = Drinker::builder("alex")
//!     .weight(80.0, WeightUnit::Kg)
//!     .drinks(friday_evening, 6.0, 3.0)
//!     .build();
//!
//! let context = EstimateContext::new(now)
//!     .with_threshold(500.0)
//!     .with_test_time(monday_morning);
//! let result = drinker.estimate(&context, &EstimateOptions::default())?;
//!
//! println!("Current: {:.0} ng/mL", result.levels.current);
//! if let Some(ref test) = result.test {
//!     println!("{}", test.verdict);
//! }
//! ```

// Internal modules
mod analyze;
mod calc;
mod curve;
mod error;
mod summary;
mod timeline;
mod traits;
mod types;


// Public API
pub use calc::{
    elimination_rate, hours_to_decay, level_after_end, peak_level, standard_drinks,
    total_elimination_hours,
};
pub use curve::{CurveComponent, EtgCurve};
pub use error::EstimateError;
pub use summary::estimates_to_csv;
pub use timeline::{SegmentKind, Timeline, TimelineSegment};
pub use traits::{DrinkerEstimate, Estimate, EstimatePopulation};
pub use types::{
    format_hours, ClearanceParams, CurveModel, EstimateContext, EstimateOptions, EtgEstimate,
    IntakeParams, LevelParams, LevelStatus, ModelConstants, Quality, TestPrediction, Verdict,
    Warning,
};
