use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{RawResponse, ReconcileError, RequiredField};
use crate::model::{AreaResult, BoundingArea, Origin};

/// validates and normalizes a remote area response.
///
/// the origin is decided by the caller based on which action issued the
/// request; it is never inferred from the payload. all fields beyond the
/// required ones are carried into [`AreaResult::extra`] untouched.
///
/// # Arguments
///
/// * `raw`    - the response as received, string-encoded or structured
/// * `origin` - how the request was made
///
/// # Returns
///
/// * the normalized result, or the first validation failure found
pub fn reconcile(raw: RawResponse, origin: Origin) -> Result<AreaResult, ReconcileError> {
    let fields = match raw.decode()? {
        Value::Object(fields) => fields,
        // anything other than an object is missing every field
        _ => Map::new(),
    };

    let lat_start = required_number(&fields, RequiredField::LatStart)?;
    let lon_start = required_number(&fields, RequiredField::LonStart)?;
    let lat_end = required_number(&fields, RequiredField::LatEnd)?;
    let lon_end = required_number(&fields, RequiredField::LonEnd)?;
    let label = required_label(&fields)?;

    let area = BoundingArea::new(lat_start, lon_start, lat_end, lon_end)
        .map_err(|e| ReconcileError::InvalidGeometry(e.to_string()))?;

    let extra: IndexMap<String, Value> = fields
        .into_iter()
        .filter(|(key, _)| !RequiredField::is_required_key(key))
        .collect();

    Ok(AreaResult::new(area, label, origin, extra))
}

fn required_number(fields: &Map<String, Value>, field: RequiredField) -> Result<f64, ReconcileError> {
    fields
        .get(field.key())
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or(ReconcileError::UnexpectedShape(field))
}

fn required_label(fields: &Map<String, Value>) -> Result<String, ReconcileError> {
    let field = RequiredField::Label;
    fields
        .get(field.key())
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or(ReconcileError::UnexpectedShape(field))
}
