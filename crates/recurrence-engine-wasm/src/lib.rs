//! WASM bindings for recurrence-engine.
//!
//! Lets a JavaScript calendar grid ask the engine which days to highlight.
//! Recurrences cross the boundary as JSON strings (the `RecurrenceSpec` serde
//! shape) and dates as `YYYY-MM-DD` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p recurrence-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/recurrence_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use recurrence_engine::RecurrenceSpec;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse inputs crossing the boundary
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_spec(json: &str) -> Result<RecurrenceSpec, JsValue> {
    RecurrenceSpec::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid recurrence JSON: {}", e)))
}

fn to_json_dates(dates: &[NaiveDate]) -> Result<String, JsValue> {
    serde_json::to_string(dates)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether `date` (`YYYY-MM-DD`) is an occurrence of the recurrence in `spec_json`.
#[wasm_bindgen(js_name = "isDayRecurring")]
pub fn is_day_recurring(spec_json: &str, date: &str) -> Result<bool, JsValue> {
    let spec = parse_spec(spec_json)?;
    Ok(spec.is_occurrence(parse_date(date)?))
}

/// Occurrences within one calendar month, as a JSON array of `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "occurrencesInMonth")]
pub fn occurrences_in_month(spec_json: &str, year: i32, month: u32) -> Result<String, JsValue> {
    let spec = parse_spec(spec_json)?;
    let dates: Vec<NaiveDate> = spec
        .occurrences_in_month(year, month)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .collect();
    to_json_dates(&dates)
}

/// Occurrences between two dates (inclusive), as a JSON array of `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "occurrencesBetween")]
pub fn occurrences_between(spec_json: &str, start: &str, end: &str) -> Result<String, JsValue> {
    let spec = parse_spec(spec_json)?;
    let dates: Vec<NaiveDate> = spec
        .occurrences_between(parse_date(start)?, parse_date(end)?)
        .collect();
    to_json_dates(&dates)
}

/// Validate a recurrence before saving it. Throws with a description on failure.
#[wasm_bindgen(js_name = "validateSpec")]
pub fn validate_spec(spec_json: &str) -> Result<(), JsValue> {
    parse_spec(spec_json)?
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Export the recurrence as an RFC 5545 RRULE value.
#[wasm_bindgen(js_name = "toRRule")]
pub fn to_rrule(spec_json: &str) -> Result<String, JsValue> {
    parse_spec(spec_json)?
        .to_rrule()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
