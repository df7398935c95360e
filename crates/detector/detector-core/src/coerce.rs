//! Conversion of loosely typed samples into finite `f64` values.

use detector_spi::{DetectorError, Result};
use serde_json::Value;

/// Check that every sample is a finite number.
pub fn ensure_finite(series: &[f64]) -> Result<()> {
    match series.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(DetectorError::invalid_input(
            index,
            format!("{} is not a finite number", series[index]),
        )),
        None => Ok(()),
    }
}

/// Interpret one JSON value as a finite number.
///
/// Accepts JSON numbers and strings holding a number (surrounding
/// whitespace ignored). Rejects `null`, booleans, arrays, objects, empty
/// strings and anything that parses to NaN or an infinity.
pub fn coerce_value(index: usize, value: &Value) -> Result<f64> {
    let number = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DetectorError::invalid_input(index, format!("{} is out of range", n)))?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(DetectorError::invalid_input(index, "empty string"));
            }
            trimmed.parse::<f64>().map_err(|_| {
                DetectorError::invalid_input(index, format!("{:?} is not a number", s))
            })?
        }
        Value::Null => return Err(DetectorError::invalid_input(index, "null")),
        Value::Bool(b) => {
            return Err(DetectorError::invalid_input(index, format!("boolean {}", b)))
        }
        Value::Array(_) => return Err(DetectorError::invalid_input(index, "nested array")),
        Value::Object(_) => return Err(DetectorError::invalid_input(index, "object")),
    };

    if !number.is_finite() {
        return Err(DetectorError::invalid_input(
            index,
            format!("{} is not a finite number", number),
        ));
    }
    Ok(number)
}

/// Coerce a whole series, failing on the first bad element.
pub fn coerce_series(values: &[Value]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| coerce_value(index, value))
        .collect()
}
