use super::*;

#[test]
fn default_profile_describes_the_records_mart() {
    let profile = default_profile();
    assert_eq!(profile.qualified_name, "healthdb.medicalrecords.flattened_medical_records");
    assert!(profile.columns.len() > 20);
}

#[test]
fn description_carries_the_qualified_name() {
    let description = table_description(default_profile());
    assert!(description.contains("Table name = healthdb.medicalrecords.flattened_medical_records"));
}

#[test]
fn description_renders_column_value_dtype_triples() {
    let description = table_description(default_profile());
    assert!(description.contains("\"heart_rate\": [\"99\", \"integer\"]"));
    assert!(description.contains("\"patient_name\": [\"Leslie Hale\", \"string\"]"));
}
