//! Loading of series, profiles and flagged records from files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::CliResult;

/// Keys searched for a series when the JSON root is an object.
const SERIES_KEYS: [&str; 4] = ["weekly_attendance", "data", "values", "series"];

/// Read CSV records and take one column as raw string samples.
///
/// `column` is a header name or a zero-based index; the first column is
/// used when it is absent. Every row contributes a sample, so a bad cell
/// surfaces as a coercion error instead of being skipped.
pub fn parse_csv<R: Read>(reader: R, column: Option<&str>) -> CliResult<Vec<Value>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();

    let col_idx = match column {
        Some(col) => match col.parse::<usize>() {
            Ok(idx) if idx < headers.len() => idx,
            Ok(_) => return Err(format!("Column {} not found", col)),
            Err(_) => headers
                .iter()
                .position(|h| h.trim() == col)
                .ok_or_else(|| format!("Column '{}' not found", col))?,
        },
        None => 0,
    };

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        let cell = record.get(col_idx).unwrap_or("");
        samples.push(Value::String(cell.to_string()));
    }
    Ok(samples)
}

/// Extract a series from a parsed JSON document.
///
/// Accepts an array of samples, an array of objects (picking `column`), or
/// an object holding the series under one of the usual keys.
pub fn parse_json_series(json: Value, column: Option<&str>) -> CliResult<Vec<Value>> {
    match json {
        Value::Array(items) => {
            let is_records = items.iter().any(Value::is_object);
            if !is_records {
                return Ok(items);
            }
            let col = column.ok_or("Array of objects requires --column")?;
            Ok(items
                .into_iter()
                .map(|mut item| item.get_mut(col).map(Value::take).unwrap_or(Value::Null))
                .collect())
        }
        Value::Object(mut obj) => {
            let keys: Vec<&str> = match column {
                Some(col) => vec![col],
                None => SERIES_KEYS.to_vec(),
            };
            for key in keys {
                if let Some(Value::Array(items)) = obj.remove(key) {
                    return Ok(items);
                }
            }
            Err("Could not find a series array in the JSON object".to_string())
        }
        _ => Err("JSON root must be an array or an object".to_string()),
    }
}

/// Load a series from a CSV or JSON file (format picked by extension).
pub fn load_series(path: &Path, column: Option<&str>) -> CliResult<Vec<Value>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let file = open(path)?;
    match ext.as_str() {
        "csv" => parse_csv(file, column),
        _ => {
            let json: Value = serde_json::from_reader(file)
                .map_err(|e| format!("Failed to parse JSON: {}", e))?;
            parse_json_series(json, column)
        }
    }
}

/// Load a JSON array of typed items, e.g. risk profiles.
pub fn load_json_list<T: DeserializeOwned>(path: &Path) -> CliResult<Vec<T>> {
    serde_json::from_reader(open(path)?).map_err(|e| format!("Failed to parse JSON: {}", e))
}

fn open(path: &Path) -> CliResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))
}
