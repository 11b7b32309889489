//! Doctors roster importer.
//!
//! Reads an Excel roster (one row per doctor), binds the header row to the
//! required schema, normalizes and validates each data row, geocodes the
//! address field, and writes the collection as JSON plus a timestamped
//! backup copy.

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod geocoding;
pub mod logging;
pub mod pipeline;
pub mod source;
