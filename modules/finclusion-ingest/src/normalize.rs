//! Canonical form of one World Bank record.

use serde_json::Value;

use crate::error::{IngestError, Result};

/// The canonical tuple extracted from a raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub iso3: String,
    pub country_name: String,
    pub indicator_code: String,
    pub year: i32,
    /// Null means "observed but unreported" and is stored as such.
    pub value: Option<f64>,
}

impl NormalizedRecord {
    /// Records without a country or indicator attribution cannot be stored
    /// anywhere meaningful; the orchestrator skips them silently.
    pub fn is_attributable(&self) -> bool {
        !self.iso3.is_empty() && !self.indicator_code.is_empty()
    }

    /// Human-readable key for the raw archive.
    pub fn record_key(&self) -> String {
        format!("{}|{}|{}", self.iso3, self.year, self.indicator_code)
    }
}

/// Map a raw record to the canonical tuple.
///
/// Missing country name or indicator code degrade to empty strings (the
/// record is then unattributable). A missing or non-numeric date is a
/// `MalformedRecord` error: the fetcher already filtered dateless records,
/// so hitting one here means the API contract changed under us.
pub fn normalize(raw: &Value) -> Result<NormalizedRecord> {
    let iso3 = raw
        .get("countryiso3code")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();
    let country_name = raw
        .pointer("/country/value")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let indicator_code = raw
        .pointer("/indicator/id")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let year = parse_year(raw)?;
    let value = raw.get("value").and_then(Value::as_f64);

    Ok(NormalizedRecord {
        iso3,
        country_name,
        indicator_code,
        year,
        value,
    })
}

fn parse_year(raw: &Value) -> Result<i32> {
    let date = raw.get("date").unwrap_or(&Value::Null);
    match date {
        Value::String(s) => s.trim().parse::<i32>().map_err(|_| {
            IngestError::MalformedRecord(format!("non-numeric date: {s:?}"))
        }),
        Value::Number(n) => n
            .as_i64()
            .map(|y| y as i32)
            .ok_or_else(|| IngestError::MalformedRecord(format!("non-integer date: {n}"))),
        other => Err(IngestError::MalformedRecord(format!(
            "missing or invalid date field: {other}"
        ))),
    }
}
