//! Drinking-session logs in CSV form
//!
//! One row per session, with a header naming the [`DrinkInput`] fields:
//!
//! ```text
//! drink_type,amount,unit,start,duration,duration_unit,custom_abv
//! beer,3,drinks,2026-10-17T20:00,2,hours,
//! custom,500,ml,2026-10-18T13:00,45,minutes,8.5
//! ```
//!
//! Header names are case-insensitive, lines starting with `#` are comments,
//! columns may appear in any order and may be left out (their defaults
//! apply). Empty cells in optional columns are read as absent.

use std::io::Read;

use csv::{ReaderBuilder, WriterBuilder};

use super::ParseError;
use crate::data::DrinkInput;

/// Read drinking sessions from a CSV file
pub fn read_sessions_csv(path: impl Into<String>) -> Result<Vec<DrinkInput>, ParseError> {
    let path = path.into();
    let file = std::fs::File::open(&path).map_err(|e| ParseError::Io {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let sessions = read_sessions(file)?;
    tracing::debug!(path = %path, n = sessions.len(), "read drinking sessions");
    Ok(sessions)
}

/// Read drinking sessions from CSV text
pub fn read_sessions_csv_str(text: &str) -> Result<Vec<DrinkInput>, ParseError> {
    read_sessions(text.as_bytes())
}

fn read_sessions<R: Read>(source: R) -> Result<Vec<DrinkInput>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| ParseError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    reader.set_headers(csv::StringRecord::from(headers));

    reader
        .deserialize::<DrinkInput>()
        .map(|row| row.map_err(|e| ParseError::Csv(e.to_string())))
        .collect()
}

/// Write drinking sessions as CSV text in the layout [`read_sessions_csv_str`] reads
pub fn sessions_to_csv(sessions: &[DrinkInput]) -> Result<String, ParseError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    for session in sessions {
        writer
            .serialize(session)
            .map_err(|e| ParseError::Csv(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ParseError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ParseError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AmountUnit, DrinkType, DurationUnit};

    #[test]
    fn test_read_sessions_with_blank_cells() {
        let text = "\
# weekend log
Drink_Type,Amount,Unit,Start,Duration,Duration_Unit,Custom_ABV
beer,3,drinks,2026-10-17T20:00,2,hours,
custom,500,ml,2026-10-18T13:00,45,minutes,8.5
wine,,ml,2026-10-18T19:00,1,hours,
";
        let sessions = read_sessions_csv_str(text).unwrap();
        assert_eq!(sessions.len(), 3);

        assert_eq!(sessions[0].drink_type, DrinkType::Beer);
        assert_eq!(sessions[0].custom_abv, None);
        assert_eq!(sessions[0].amount, Some(3.0));

        assert_eq!(sessions[1].drink_type, DrinkType::Custom);
        assert_eq!(sessions[1].custom_abv, Some(8.5));
        assert_eq!(sessions[1].unit, AmountUnit::Ml);
        assert_eq!(sessions[1].duration_unit, DurationUnit::Minutes);

        // Blank amount is kept so it can be reported as skipped
        assert_eq!(sessions[2].amount, None);
    }

    #[test]
    fn test_missing_columns_take_defaults() {
        let text = "start,amount\n2026-10-17T20:00,2\n";
        let sessions = read_sessions_csv_str(text).unwrap();
        assert_eq!(sessions[0].unit, AmountUnit::Drinks);
        assert_eq!(sessions[0].duration, 2.0);
    }

    #[test]
    fn test_bad_date_is_a_csv_error() {
        let text = "start,amount\nyesterday,2\n";
        assert!(matches!(
            read_sessions_csv_str(text),
            Err(ParseError::Csv(_))
        ));
    }

    #[test]
    fn test_written_sessions_read_back() {
        let text = "start,amount,unit\n2026-10-17T20:00,2,oz\n";
        let sessions = read_sessions_csv_str(text).unwrap();
        let written = sessions_to_csv(&sessions).unwrap();
        assert_eq!(read_sessions_csv_str(&written).unwrap(), sessions);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_sessions_csv("/nonexistent/sessions.csv"),
            Err(ParseError::Io { .. })
        ));
    }
}
