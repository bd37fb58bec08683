//! Tabular export of estimates

use std::collections::BTreeSet;

use csv::WriterBuilder;

use super::types::EtgEstimate;
use crate::data::parser::ParseError;
use crate::data::time::OUTPUT_FORMAT;

/// Generate a CSV string from a slice of estimates
///
/// The header row contains `drinker_id`, `safe_at`, `verdict` and all
/// numeric parameter names (union across all results, sorted). Missing values
/// are left empty. Cells are quoted where needed, so identifiers may contain
/// commas or quotes.
pub fn estimates_to_csv(results: &[EtgEstimate]) -> Result<String, ParseError> {
    if results.is_empty() {
        return Ok(String::new());
    }

    let param_maps: Vec<_> = results.iter().map(|r| r.to_params()).collect();
    let names: BTreeSet<&'static str> = param_maps
        .iter()
        .flat_map(|p| p.keys().copied())
        .collect();

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    let csv_err = |e: csv::Error| ParseError::Csv(e.to_string());

    let header = ["drinker_id", "safe_at", "verdict"]
        .into_iter()
        .chain(names.iter().copied());
    writer.write_record(header).map_err(csv_err)?;

    for (result, params) in results.iter().zip(param_maps.iter()) {
        let mut record = Vec::with_capacity(names.len() + 3);
        record.push(result.drinker_id.clone().unwrap_or_else(|| "NA".to_string()));
        record.push(
            result
                .clearance
                .safe_at
                .map(|at| at.format(OUTPUT_FORMAT).to_string())
                .unwrap_or_default(),
        );
        record.push(
            result
                .test
                .as_ref()
                .map(|t| format!("{:?}", t.verdict))
                .unwrap_or_default(),
        );
        for name in &names {
            record.push(params.get(name).map(|v| v.to_string()).unwrap_or_default());
        }
        writer.write_record(&record).map_err(csv_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ParseError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ParseError::Csv(e.to_string()))
}
