use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::input_error::InputError;
use crate::data::time::{self, shift_hours};

/// Grams of pure ethanol in one standard drink
pub const GRAMS_PER_STANDARD_DRINK: f64 = 14.0;
/// Density of ethanol in g/ml
pub const ETHANOL_DENSITY: f64 = 0.789;
/// Millilitres per US fluid ounce
pub const ML_PER_OZ: f64 = 29.5735;

/// Kind of drink, which fixes the nominal alcohol content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkType {
    /// 5% ABV
    #[default]
    Beer,
    /// 12% ABV
    Wine,
    /// 40% ABV
    Liquor,
    /// ABV supplied with the session
    Custom,
}

impl DrinkType {
    /// Nominal ABV in percent (0 for [`DrinkType::Custom`])
    pub fn abv(&self) -> f64 {
        match self {
            DrinkType::Beer => 5.0,
            DrinkType::Wine => 12.0,
            DrinkType::Liquor => 40.0,
            DrinkType::Custom => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DrinkType::Beer => "Beer",
            DrinkType::Wine => "Wine",
            DrinkType::Liquor => "Liquor/Spirits",
            DrinkType::Custom => "Custom",
        }
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit of the reported amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    /// Millilitres of the drink
    Ml,
    /// US fluid ounces of the drink
    Oz,
    /// Standard drinks, independent of ABV
    #[default]
    Drinks,
}

/// Unit of the reported drinking duration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Hours,
    Minutes,
}

impl DurationUnit {
    pub fn to_hours(&self, value: f64) -> f64 {
        match self {
            DurationUnit::Hours => value,
            DurationUnit::Minutes => value / 60.0,
        }
    }
}

/// Grams of pure ethanol in `amount` of a drink with the given ABV (percent)
pub fn alcohol_grams(amount: f64, unit: AmountUnit, abv: f64) -> f64 {
    match unit {
        AmountUnit::Drinks => amount * GRAMS_PER_STANDARD_DRINK,
        AmountUnit::Ml => amount * (abv / 100.0) * ETHANOL_DENSITY,
        AmountUnit::Oz => amount * ML_PER_OZ * (abv / 100.0) * ETHANOL_DENSITY,
    }
}

/// Why a reported session was left out of the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The session has no start time
    MissingStart,
    /// The amount is missing, zero, negative or not a number
    NoAmount,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingStart => write!(f, "no start time"),
            SkipReason::NoAmount => write!(f, "amount missing or not positive"),
        }
    }
}

fn default_duration() -> f64 {
    2.0
}

fn default_amount() -> Option<f64> {
    Some(3.0)
}

/// A drinking session as reported, before validation
///
/// Every field mirrors one input of the calculator form. Missing values are
/// allowed here; [`DrinkInput::normalize`] decides whether the session is
/// usable, skipped or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkInput {
    #[serde(default)]
    pub drink_type: DrinkType,
    /// ABV in percent, only read for [`DrinkType::Custom`]
    #[serde(default)]
    pub custom_abv: Option<f64>,
    /// Absent fields read as the form's initial 3; an explicit null or an
    /// empty cell stays `None`
    #[serde(default = "default_amount")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: AmountUnit,
    #[serde(default, with = "time::option_datetime")]
    pub start: Option<NaiveDateTime>,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub duration_unit: DurationUnit,
}

impl Default for DrinkInput {
    fn default() -> Self {
        Self {
            drink_type: DrinkType::Beer,
            custom_abv: None,
            amount: default_amount(),
            unit: AmountUnit::Drinks,
            start: None,
            duration: default_duration(),
            duration_unit: DurationUnit::Hours,
        }
    }
}

impl DrinkInput {
    /// `count` standard drinks over `hours`, starting at `start`
    pub fn standard_drinks(start: NaiveDateTime, count: f64, hours: f64) -> Self {
        Self {
            amount: Some(count),
            unit: AmountUnit::Drinks,
            start: Some(start),
            duration: hours,
            ..Default::default()
        }
    }

    /// A measured volume of `drink_type`, drunk over the default two hours
    pub fn volume(drink_type: DrinkType, amount: f64, unit: AmountUnit, start: NaiveDateTime) -> Self {
        Self {
            drink_type,
            amount: Some(amount),
            unit,
            start: Some(start),
            ..Default::default()
        }
    }

    /// Switch to a custom drink with the given ABV (percent)
    pub fn with_custom_abv(mut self, abv: f64) -> Self {
        self.drink_type = DrinkType::Custom;
        self.custom_abv = Some(abv);
        self
    }

    pub fn with_duration(mut self, value: f64, unit: DurationUnit) -> Self {
        self.duration = value;
        self.duration_unit = unit;
        self
    }

    /// Reason this session would be skipped, if any
    pub fn skip_reason(&self) -> Option<SkipReason> {
        if self.start.is_none() {
            return Some(SkipReason::MissingStart);
        }
        match self.amount {
            Some(a) if a.is_finite() && a > 0.0 => None,
            _ => Some(SkipReason::NoAmount),
        }
    }

    /// ABV in percent
    ///
    /// Custom drinks must carry an ABV above zero regardless of the amount
    /// unit; no drink may exceed 100%.
    pub fn resolve_abv(&self, index: usize) -> Result<f64, InputError> {
        let abv = match self.drink_type {
            DrinkType::Custom => match self.custom_abv {
                Some(abv) if abv.is_finite() && abv > 0.0 => abv,
                _ => return Err(InputError::InvalidCustomAbv { session: index }),
            },
            other => other.abv(),
        };
        if abv > 100.0 {
            return Err(InputError::AbvOutOfRange {
                session: index,
                abv,
            });
        }
        Ok(abv)
    }

    /// Validate and convert to a [`DrinkingSession`]
    ///
    /// `index` is the position of the session in the reported order and is
    /// only used for error messages. Returns `Ok(None)` for sessions that are
    /// silently skipped (see [`DrinkInput::skip_reason`]).
    pub fn normalize(&self, index: usize) -> Result<Option<DrinkingSession>, InputError> {
        let (Some(start), Some(amount)) = (self.start, self.amount) else {
            return Ok(None);
        };
        if self.skip_reason().is_some() {
            return Ok(None);
        }

        let abv = self.resolve_abv(index)?;

        let invalid_duration = InputError::InvalidDuration {
            session: index,
            value: self.duration,
        };
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(invalid_duration);
        }
        let duration_hours = self.duration_unit.to_hours(self.duration);
        let end = shift_hours(start, duration_hours).ok_or(invalid_duration)?;

        Ok(Some(DrinkingSession {
            start,
            end,
            alcohol_grams: alcohol_grams(amount, self.unit, abv),
            duration_hours,
            abv,
        }))
    }
}

/// A validated drinking session in common units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkingSession {
    #[serde(with = "time::datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "time::datetime")]
    pub end: NaiveDateTime,
    /// Grams of pure ethanol
    pub alcohol_grams: f64,
    pub duration_hours: f64,
    /// ABV in percent
    pub abv: f64,
}

impl DrinkingSession {
    /// Equivalent number of standard drinks
    pub fn standard_drinks(&self) -> f64 {
        self.alcohol_grams / GRAMS_PER_STANDARD_DRINK
    }
}
