use chrono::NaiveDateTime;

use crate::data::*;

pub trait DrinkerBuilderExt {
    fn builder(id: &str) -> DrinkerBuilder;
}

impl DrinkerBuilderExt for Drinker {
    fn builder(id: &str) -> DrinkerBuilder {
        DrinkerBuilder {
            id: id.to_string(),
            profile: PersonalProfile::default(),
            sessions: Vec::new(),
        }
    }
}

pub struct DrinkerBuilder {
    id: String,
    profile: PersonalProfile,
    sessions: Vec<DrinkInput>,
}

impl DrinkerBuilder {
    pub fn id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub fn profile(mut self, profile: PersonalProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn weight(mut self, weight: f64, unit: WeightUnit) -> Self {
        self.profile.weight = weight;
        self.profile.weight_unit = unit;
        self
    }

    pub fn sex(mut self, sex: Sex) -> Self {
        self.profile.sex = sex;
        self
    }

    pub fn metabolism(mut self, metabolism: MetabolismRate) -> Self {
        self.profile.metabolism = metabolism;
        self
    }

    pub fn session(mut self, session: DrinkInput) -> Self {
        self.sessions.push(session);
        self
    }

    /// `count` standard drinks over `hours`
    pub fn drinks(self, start: NaiveDateTime, count: f64, hours: f64) -> Self {
        self.session(DrinkInput::standard_drinks(start, count, hours))
    }

    /// A measured volume of a fixed-ABV drink over `hours`
    pub fn volume(
        self,
        start: NaiveDateTime,
        drink_type: DrinkType,
        amount: f64,
        unit: AmountUnit,
        hours: f64,
    ) -> Self {
        let input = DrinkInput::volume(drink_type, amount, unit, start)
            .with_duration(hours, DurationUnit::Hours);
        self.session(input)
    }

    /// Repeat the last session `n` times, each `delta_hours` after the previous
    ///
    /// Sessions without a start time are repeated unchanged.
    pub fn repeat(mut self, n: usize, delta_hours: f64) -> Self {
        let Some(last) = self.sessions.last().cloned() else {
            return self;
        };
        for i in 1..=n {
            let mut next = last.clone();
            next.start = last
                .start
                .and_then(|s| time::shift_hours(s, delta_hours * i as f64));
            self.sessions.push(next);
        }
        self
    }

    pub fn build(self) -> Drinker {
        Drinker::new(self.id, self.profile, self.sessions)
    }
}
