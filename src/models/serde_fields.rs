//! Field deserializers for delimited input tables
//!
//! Delimited exports spell a missing cell several ways. These helpers map all
//! of them to `None` and parse the rest.

use serde::{Deserialize, Deserializer, de};

/// Cell contents treated as a missing value
pub const NULL_TOKENS: [&str; 7] = ["", "NA", "N/A", "NaN", "nan", "null", "None"];

/// Whether a raw cell should be read as null
#[must_use]
pub fn is_null_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    NULL_TOKENS.iter().any(|token| trimmed.eq_ignore_ascii_case(token))
}

fn raw_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|cell| !is_null_token(cell)))
}

/// Deserialize a nullable floating point cell
pub fn nullable_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    raw_cell(deserializer)?
        .map(|cell| {
            cell.trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("'{cell}' is not a number: {e}")))
        })
        .transpose()
}

/// Deserialize a nullable 0/1 indicator cell; `1.0` style floats are accepted
pub fn nullable_indicator<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    raw_cell(deserializer)?
        .map(|cell| parse_indicator(&cell).map_err(de::Error::custom))
        .transpose()
}

/// Deserialize a nullable text label
pub fn nullable_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_cell(deserializer)?.map(|cell| cell.trim().to_string()))
}

/// Parse a 0/1 indicator from its text form
pub fn parse_indicator(cell: &str) -> std::result::Result<u8, String> {
    let value = cell
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("'{cell}' is not a 0/1 indicator: {e}"))?;
    indicator_from_f64(value).ok_or_else(|| format!("'{cell}' is not a 0/1 indicator"))
}

/// Map 0.0 / 1.0 to an indicator
#[must_use]
pub fn indicator_from_f64(value: f64) -> Option<u8> {
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}
