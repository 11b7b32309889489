use crate::constants::REQUIRED_FIELDS;
use crate::diagnostics::Diagnostic;

/// Positional map from column index to field name, built once from the
/// header row and immutable afterwards. Data rows are zipped against it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIndex {
    fields: Vec<String>,
}

impl FieldIndex {
    /// Binds the header row. A missing required field is a soft failure:
    /// the diagnostic is returned alongside whatever table was built, and
    /// later zips proceed against that table as-is.
    pub fn bind(header_cells: &[String]) -> (Self, Option<Diagnostic>) {
        let fields = header_cells.to_vec();

        let missing: Vec<String> = REQUIRED_FIELDS
            .into_iter()
            .filter(|required| !fields.iter().any(|f| f == required))
            .map(String::from)
            .collect();

        let diagnostic = if missing.is_empty() {
            None
        } else {
            Some(Diagnostic::MissingHeaders { missing })
        };

        (Self { fields }, diagnostic)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field name bound to column `index`, if any.
    pub fn field_at(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_bind_accepts_required_fields_in_any_order() {
        let (index, diagnostic) = FieldIndex::bind(&header(&[
            "Language", "VIP", "Name", "Address", "Gender", "Specialty",
        ]));

        assert!(diagnostic.is_none());
        assert_eq!(index.len(), 6);
        assert_eq!(index.field_at(2), Some("Name"));
        assert_eq!(index.field_at(5), Some("Specialty"));
    }

    #[test]
    fn test_bind_reports_missing_fields_but_still_builds_table() {
        let (index, diagnostic) =
            FieldIndex::bind(&header(&["Name", "Specialty", "Address", "Language"]));

        assert_eq!(index.len(), 4);
        match diagnostic {
            Some(Diagnostic::MissingHeaders { missing }) => {
                assert_eq!(missing, vec!["Gender".to_string(), "VIP".to_string()]);
            }
            other => panic!("expected MissingHeaders, got {other:?}"),
        }
    }

    #[test]
    fn test_bind_is_case_sensitive() {
        let (_, diagnostic) = FieldIndex::bind(&header(&[
            "name", "Gender", "Specialty", "VIP", "Address", "Language",
        ]));

        match diagnostic {
            Some(Diagnostic::MissingHeaders { missing }) => {
                assert_eq!(missing, vec!["Name".to_string()]);
            }
            other => panic!("expected MissingHeaders, got {other:?}"),
        }
    }

    #[test]
    fn test_bind_keeps_extra_columns() {
        let (index, diagnostic) = FieldIndex::bind(&header(&[
            "Name", "Gender", "Specialty", "VIP", "Address", "Language", "Phone",
        ]));

        assert!(diagnostic.is_none());
        assert_eq!(index.field_at(6), Some("Phone"));
    }
}
