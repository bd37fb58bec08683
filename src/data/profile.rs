use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::input_error::InputError;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

/// Biological sex, used as an elimination multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    /// Eliminates roughly 15% slower
    Female,
}

impl Sex {
    pub fn multiplier(&self) -> f64 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 1.15,
        }
    }
}

/// Self-reported metabolism speed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetabolismRate {
    Slow,
    #[default]
    Average,
    Fast,
}

impl MetabolismRate {
    /// Multiplier on elimination time (larger is slower)
    pub fn multiplier(&self) -> f64 {
        match self {
            MetabolismRate::Slow => 1.3,
            MetabolismRate::Average => 1.0,
            MetabolismRate::Fast => 0.8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetabolismRate::Slow => "Slow",
            MetabolismRate::Average => "Average",
            MetabolismRate::Fast => "Fast",
        }
    }
}

impl fmt::Display for MetabolismRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_weight() -> f64 {
    70.0
}

/// Personal information that adjusts the elimination curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalProfile {
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub metabolism: MetabolismRate,
}

impl Default for PersonalProfile {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            weight_unit: WeightUnit::Kg,
            sex: Sex::Male,
            metabolism: MetabolismRate::Average,
        }
    }
}

impl PersonalProfile {
    pub fn new(weight: f64, weight_unit: WeightUnit, sex: Sex, metabolism: MetabolismRate) -> Self {
        Self {
            weight,
            weight_unit,
            sex,
            metabolism,
        }
    }

    /// Body weight in kilograms
    ///
    /// The weight is validated and reported with every estimate; the curve
    /// itself does not scale with it.
    pub fn weight_kg(&self) -> Result<f64, InputError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(InputError::InvalidWeight { value: self.weight });
        }
        Ok(match self.weight_unit {
            WeightUnit::Kg => self.weight,
            WeightUnit::Lbs => self.weight * KG_PER_LB,
        })
    }

    /// Combined divisor applied to the base elimination rate
    pub fn rate_divisor(&self) -> f64 {
        self.sex.multiplier() * self.metabolism.multiplier()
    }
}
