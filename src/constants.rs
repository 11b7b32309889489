/// Header labels that must be present in the first row. Capitalization
/// matters, column order does not.
pub const REQUIRED_FIELDS: [&str; 6] = ["Name", "Gender", "Specialty", "VIP", "Address", "Language"];

/// Fields whose values are lowercased during normalization.
pub const LOWERCASED_FIELDS: [&str; 4] = ["Gender", "Specialty", "VIP", "Language"];

pub const NAME_FIELD: &str = "Name";
pub const GENDER_FIELD: &str = "Gender";
pub const VIP_FIELD: &str = "VIP";
pub const ADDRESS_FIELD: &str = "Address";

/// Key under which geocoded coordinates are attached to a record.
pub const COORDINATES_FIELD: &str = "Coordinates";

pub const GENDER_VALUES: [&str; 2] = ["male", "female"];
pub const VIP_VALUES: [&str; 2] = ["yes", "no"];
