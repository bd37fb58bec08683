//! Urine EtG (ethyl glucuronide) estimation from reported drinking sessions
//!
//! The [`data`] module holds the inputs (drinks, sessions, personal profile
//! and the [`Drinker`], [`Cohort`] and [`Scenario`] containers) together with
//! CSV and JSON readers. The [`estimate`] module turns them into an EtG curve,
//! a safe-time estimate and a pass/fail prediction for a scheduled test.

pub mod data;
pub mod error;
pub mod estimate;

//extension traits
pub use crate::data::builder::DrinkerBuilderExt;
pub use crate::data::*;
pub use crate::estimate::{Estimate, EstimatePopulation};
pub use error::EtgError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{
            parser::{read_sessions_csv, read_sessions_csv_str, sessions_to_csv},
            Cohort, DrinkInput, Drinker, Scenario,
        };
    }
    pub mod estimate {
        pub use crate::estimate::{
            estimates_to_csv, CurveModel, DrinkerEstimate, EstimateContext, EstimateOptions,
            EtgCurve, EtgEstimate, Verdict,
        };
    }

    //extension traits
    pub use crate::data::builder::DrinkerBuilderExt;
    pub use crate::data::*;
    pub use crate::estimate::{
        CurveModel, Estimate, EstimateContext, EstimateOptions, EstimatePopulation, EtgEstimate,
        LevelStatus, Verdict, Warning,
    };
}
