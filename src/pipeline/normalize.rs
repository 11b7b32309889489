use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{ADDRESS_FIELD, COORDINATES_FIELD, LOWERCASED_FIELDS, NAME_FIELD};
use crate::diagnostics::Diagnostic;
use crate::geocoding::GeoCandidate;
use crate::pipeline::schema::FieldIndex;
use crate::pipeline::validate;

/// One normalized, validated, optionally geocoded roster row.
///
/// Fields are keyed by header label, so workbooks may carry columns beyond
/// the required six. Values are strings except the Coordinates sub-object
/// attached by enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// String value of a field, if set.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Current Name value for diagnostics; "unknown" when the Name column
    /// has not been reached yet (or is absent).
    pub fn name_or_unknown(&self) -> String {
        self.get(NAME_FIELD).unwrap_or("unknown").to_string()
    }

    pub fn address(&self) -> Option<&str> {
        self.get(ADDRESS_FIELD)
    }

    pub fn attach_coordinates(&mut self, candidate: GeoCandidate) {
        let mut coords = Map::new();
        coords.insert("lat".to_string(), candidate.lat.into());
        coords.insert("lng".to_string(), candidate.lng.into());
        self.fields
            .insert(COORDINATES_FIELD.to_string(), Value::Object(coords));
    }

    pub fn has_coordinates(&self) -> bool {
        self.fields.contains_key(COORDINATES_FIELD)
    }
}

/// Zips a data row against the field index into a [`Record`], lowercasing
/// the case-folded fields and checking domain constraints as each field is
/// set.
///
/// Length mismatches are silent: a short row leaves its trailing fields
/// unset, and extra cells have no column to bind to and are dropped.
pub fn normalize_row(
    cells: &[String],
    index: &FieldIndex,
    diagnostics: &mut Vec<Diagnostic>,
) -> Record {
    let mut record = Record::default();

    for (position, cell) in cells.iter().enumerate() {
        let Some(field) = index.field_at(position) else {
            break;
        };

        let value = if LOWERCASED_FIELDS.iter().any(|f| *f == field) {
            cell.to_lowercase()
        } else {
            cell.clone()
        };

        if let Some(diagnostic) = validate::check_domain(field, &value, &record) {
            diagnostic.report();
            diagnostics.push(diagnostic);
        }

        record
            .fields
            .insert(field.to_string(), Value::String(value));
    }

    record
}
