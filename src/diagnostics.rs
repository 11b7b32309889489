use thiserror::Error;

/// Soft failures: reported one line per issue on the diagnostics channel,
/// collected per run, never abort processing. The affected record stays in
/// the output collection either way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("all of the following headers must be present (capitalization matters, but order does not): \"Name, Gender, Specialty, VIP, Address, Language\"; missing: {}", missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    #[error("\"{field}\" field must only have values {allowed} for doctor \"{name}\"; got \"{value}\"")]
    FieldDomain {
        field: String,
        allowed: &'static str,
        name: String,
        value: String,
    },

    #[error("no address found for doctor \"{name}\" with address \"{address}\": {reason}")]
    GeocodingFailed {
        name: String,
        address: String,
        reason: String,
    },
}

impl Diagnostic {
    /// Emit this diagnostic on the log stream.
    pub fn report(&self) {
        tracing::error!("{self}");
    }
}
