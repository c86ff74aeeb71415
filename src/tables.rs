//! Table profile registry — the fixed description of the queryable table.
//!
//! The profile feeds the `table_description` prompt parameter: qualified
//! name, column list, and one sample row in the
//! `"column": [value, dtype]` form the SQL agents are primed on.

use std::fmt::Write;

// =============================================================================
// PROFILE
// =============================================================================

/// Static description of one queryable table: name plus
/// `(column, dtype, sample value)` triples.
#[derive(Debug, Clone, Copy)]
pub struct TableProfile {
    pub qualified_name: &'static str,
    pub columns: &'static [(&'static str, &'static str, &'static str)],
}

/// The patient-records data mart the service answers questions about.
#[must_use]
pub fn default_profile() -> &'static TableProfile {
    const PROFILE: TableProfile = TableProfile {
        qualified_name: "healthdb.medicalrecords.flattened_medical_records",
        columns: &[
            ("record_id", "string", "39585f0c-555b-4f2d-9c2c-b23c6e6cdf19"),
            ("heart_rate", "integer", "99"),
            ("blood_pressure", "string", "99/68"),
            ("temperature", "float", "36.5"),
            ("respiratory_rate", "integer", "16"),
            ("oxygen_saturation", "integer", "98"),
            ("created_at", "timestamp", "2025-01-16 15:21:09"),
            ("patient_id", "string", "80e98385-690f-41fb-9538-272061014b59"),
            ("patient_name", "string", "Leslie Hale"),
            ("date_of_birth", "string", "1950-07-19"),
            ("age", "integer", "76"),
            ("gender", "string", "Female"),
            ("blood_type", "string", "A+"),
            ("diagnosis", "string", "Hypertension"),
            ("treatment_plan", "string", "Control manage think down"),
            ("medication", "string", "Metformin, Ibuprofen"),
            ("allergies", "string", ""),
            ("insurance_provider", "string", "UnitedHealth Group"),
            ("insurance_id", "string", "Dkd-77564713"),
            ("attending_physician", "string", "Christopher Johnson, MD"),
            ("department", "string", "Oncology"),
            ("admission_date", "timestamp", "2025-01-06 02:11:16"),
            ("discharge_date", "timestamp", "2025-01-16 15:21:09"),
            ("last_updated_at", "timestamp", "2025-01-16 15:21:09"),
        ],
    };
    &PROFILE
}

/// Render the profile as the `table_description` prompt parameter.
#[must_use]
pub fn table_description(profile: &TableProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Table name = {}", profile.qualified_name);
    let _ = writeln!(
        out,
        "\nTable schema along with a sample value per column, in the format \
         \"<column_name>\": [<column_value>, <dtype>]:\n"
    );
    for (name, dtype, sample) in profile.columns {
        let _ = writeln!(out, "\"{name}\": [{sample:?}, {dtype:?}]");
    }
    out
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
