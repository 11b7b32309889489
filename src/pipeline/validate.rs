use crate::constants::{GENDER_FIELD, GENDER_VALUES, VIP_FIELD, VIP_VALUES};
use crate::diagnostics::Diagnostic;
use crate::pipeline::normalize::Record;

/// Checks a freshly normalized field value against its allowed-value
/// domain. Only Gender and VIP are constrained; violations are soft and
/// the value is stored as-is by the caller.
///
/// The diagnostic names the record's current Name value. Workbooks that
/// put the Gender or VIP column before Name report "unknown" here; that
/// follows column order, it is not a hard dependency.
pub fn check_domain(field: &str, value: &str, record: &Record) -> Option<Diagnostic> {
    let (allowed, description) = match field {
        f if f == GENDER_FIELD => (&GENDER_VALUES[..], "\"male\" or \"female\""),
        f if f == VIP_FIELD => (&VIP_VALUES[..], "\"yes\" or \"no\""),
        _ => return None,
    };

    if allowed.iter().any(|a| *a == value) {
        return None;
    }

    Some(Diagnostic::FieldDomain {
        field: field.to_string(),
        allowed: description,
        name: record.name_or_unknown(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_gender_and_vip_pass() {
        let record = Record::default();
        assert!(check_domain("Gender", "male", &record).is_none());
        assert!(check_domain("Gender", "female", &record).is_none());
        assert!(check_domain("VIP", "yes", &record).is_none());
        assert!(check_domain("VIP", "no", &record).is_none());
    }

    #[test]
    fn test_unconstrained_fields_pass_anything() {
        let record = Record::default();
        assert!(check_domain("Specialty", "underwater basket weaving", &record).is_none());
        assert!(check_domain("Language", "", &record).is_none());
    }

    #[test]
    fn test_invalid_gender_is_reported() {
        let record = Record::default();
        let diagnostic = check_domain("Gender", "unknown", &record).unwrap();
        match diagnostic {
            Diagnostic::FieldDomain { field, value, name, .. } => {
                assert_eq!(field, "Gender");
                assert_eq!(value, "unknown");
                assert_eq!(name, "unknown");
            }
            other => panic!("expected FieldDomain, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_vip_is_reported() {
        let record = Record::default();
        let diagnostic = check_domain("VIP", "maybe", &record).unwrap();
        assert!(matches!(diagnostic, Diagnostic::FieldDomain { .. }));
    }
}
