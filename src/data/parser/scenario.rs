use super::ParseError;
use crate::data::Scenario;

impl Scenario {
    /// Parse a scenario from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, ParseError> {
        serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))
    }

    /// Read a scenario from a JSON file
    pub fn from_json_file(path: impl Into<String>) -> Result<Self, ParseError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String, ParseError> {
        serde_json::to_string_pretty(self).map_err(|e| ParseError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MetabolismRate, Sex, WeightUnit, DEFAULT_THRESHOLD};

    #[test]
    fn test_minimal_scenario_defaults() {
        let s = Scenario::from_json_str(
            r#"{ "sessions": [ { "start": "2026-10-17T20:00" } ] }"#,
        )
        .unwrap();
        assert_eq!(s.threshold, DEFAULT_THRESHOLD);
        assert_eq!(s.profile.weight, 70.0);
        assert_eq!(s.profile.metabolism, MetabolismRate::Average);
        assert_eq!(s.sessions[0].amount, Some(3.0));
        assert!(s.test_time.is_none());
    }

    #[test]
    fn test_full_scenario() {
        let s = Scenario::from_json_str(
            r#"{
                "profile": { "weight": 150, "weight_unit": "lbs", "sex": "female", "metabolism": "slow" },
                "threshold": 100,
                "test_time": "2026-10-20T08:30",
                "sessions": []
            }"#,
        )
        .unwrap();
        assert_eq!(s.profile.weight_unit, WeightUnit::Lbs);
        assert_eq!(s.profile.sex, Sex::Female);
        assert_eq!(s.threshold, 100.0);
        assert!(s.test_time.is_some());

        let again = Scenario::from_json_str(&s.to_json().unwrap()).unwrap();
        assert_eq!(again.test_time, s.test_time);
    }

    #[test]
    fn test_blank_test_time_is_none() {
        let s = Scenario::from_json_str(r#"{ "test_time": "" }"#).unwrap();
        assert!(s.test_time.is_none());
    }

    #[test]
    fn test_unknown_enum_is_json_error() {
        assert!(matches!(
            Scenario::from_json_str(r#"{ "profile": { "sex": "other" } }"#),
            Err(ParseError::Json(_))
        ));
    }
}
