use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::drink::{DrinkInput, DrinkingSession, SkipReason};
use crate::data::input_error::InputError;
use crate::data::profile::PersonalProfile;
use crate::data::time;

/// Most common urine EtG cutoff in ng/mL
pub const DEFAULT_THRESHOLD: f64 = 500.0;

/// A person with their reported drinking sessions
///
/// Sessions are kept exactly as reported; validation happens in
/// [`Drinker::sessions_normalized`] so that skipped sessions can be reported
/// back alongside the estimate.
///
/// # Examples
///
/// ```
/// use etgcalc::prelude::*;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 10, 17)
///     .unwrap()
///     .and_hms_opt(20, 0, 0)
///     .unwrap();
///
/// let drinker = Drinker::builder("alex")
///     .weight(80.0, WeightUnit::Kg)
///     .sex(Sex::Male)
///     .drinks(start, 4.0, 3.0)
///     .build();
///
/// assert_eq!(drinker.sessions().len(), 1);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Drinker {
    id: String,
    #[serde(default)]
    profile: PersonalProfile,
    #[serde(default)]
    sessions: Vec<DrinkInput>,
}

/// Sessions that survived validation, sorted by start time
#[derive(Debug, Clone)]
pub struct NormalizedSessions {
    pub sessions: Vec<DrinkingSession>,
    /// Input index and reason for every session that was left out
    pub skipped: Vec<(usize, SkipReason)>,
}

impl Drinker {
    /// Create a new drinker with the given ID, profile and sessions
    pub fn new(id: impl Into<String>, profile: PersonalProfile, sessions: Vec<DrinkInput>) -> Self {
        Drinker {
            id: id.into(),
            profile,
            sessions,
        }
    }

    pub fn id(&self) -> &String {
        &self.id
    }

    pub fn profile(&self) -> &PersonalProfile {
        &self.profile
    }

    /// The sessions as reported
    pub fn sessions(&self) -> &[DrinkInput] {
        &self.sessions
    }

    pub fn add_session(&mut self, session: DrinkInput) {
        self.sessions.push(session);
    }

    /// Validate every reported session
    ///
    /// Sessions without a start time or a positive amount are skipped; any
    /// other invalid input aborts with an [`InputError`]. At least one session
    /// must remain.
    pub fn sessions_normalized(&self) -> Result<NormalizedSessions, InputError> {
        let mut sessions = Vec::with_capacity(self.sessions.len());
        let mut skipped = Vec::new();

        for (index, input) in self.sessions.iter().enumerate() {
            match input.normalize(index)? {
                Some(session) => sessions.push(session),
                None => {
                    let reason = input.skip_reason().unwrap_or(SkipReason::NoAmount);
                    tracing::warn!(drinker = %self.id, index, %reason, "skipping drinking session");
                    skipped.push((index, reason));
                }
            }
        }

        if sessions.is_empty() {
            return Err(InputError::NoValidSessions);
        }
        sessions.sort_by(|a, b| a.start.cmp(&b.start));

        Ok(NormalizedSessions { sessions, skipped })
    }

    /// Number of reported sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// A collection of [Drinker]s for batch estimation
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Cohort {
    drinkers: Vec<Drinker>,
}

impl Cohort {
    pub fn new(drinkers: Vec<Drinker>) -> Self {
        Cohort { drinkers }
    }

    pub fn drinkers(&self) -> &[Drinker] {
        &self.drinkers
    }

    pub fn add_drinker(&mut self, drinker: Drinker) {
        self.drinkers.push(drinker);
    }

    /// Get a drinker by ID
    pub fn get_drinker(&self, id: &str) -> Option<&Drinker> {
        self.drinkers.iter().find(|d| d.id() == id)
    }

    pub fn iter(&'_ self) -> std::slice::Iter<'_, Drinker> {
        self.drinkers.iter()
    }

    pub fn len(&self) -> usize {
        self.drinkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drinkers.is_empty()
    }
}

impl From<Vec<Drinker>> for Cohort {
    fn from(drinkers: Vec<Drinker>) -> Self {
        Cohort::new(drinkers)
    }
}

impl<'a> IntoIterator for &'a Cohort {
    type Item = &'a Drinker;
    type IntoIter = std::slice::Iter<'a, Drinker>;
    fn into_iter(self) -> Self::IntoIter {
        self.drinkers.iter()
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Everything the calculator form collects, as one document
///
/// ```json
/// {
///   "profile": { "weight": 70, "weight_unit": "kg", "sex": "male", "metabolism": "average" },
///   "threshold": 500,
///   "test_time": "2026-10-19T09:00",
///   "sessions": [
///     { "drink_type": "beer", "amount": 3, "unit": "drinks",
///       "start": "2026-10-17T20:00", "duration": 2, "duration_unit": "hours" }
///   ]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Scenario {
    #[serde(default)]
    pub profile: PersonalProfile,
    #[serde(default)]
    pub sessions: Vec<DrinkInput>,
    /// Test cutoff in ng/mL
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default, with = "time::option_datetime")]
    pub test_time: Option<NaiveDateTime>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            profile: PersonalProfile::default(),
            sessions: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
            test_time: None,
        }
    }
}

impl Scenario {
    /// The person described by this scenario
    pub fn to_drinker(&self, id: impl Into<String>) -> Drinker {
        Drinker::new(id, self.profile.clone(), self.sessions.clone())
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Cohort: {} drinkers", self.drinkers.len())?;
        for drinker in &self.drinkers {
            writeln!(f, "{}", drinker)?;
        }
        Ok(())
    }
}

impl fmt::Display for Drinker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Drinker ID: {} ({:?}, {} metabolism)",
            self.id, self.profile.sex, self.profile.metabolism
        )?;
        for (i, s) in self.sessions.iter().enumerate() {
            let start = s
                .start
                .map(|t| t.format(time::OUTPUT_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            let amount = s.amount.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "  #{}: {} {} {:?} at {} for {} {:?}",
                i + 1,
                amount,
                s.drink_type,
                s.unit,
                start,
                s.duration,
                s.duration_unit
            )?;
        }
        Ok(())
    }
}
