use crm_map::{ConfidenceLevel, ConfidenceThresholds, FieldMapper};
use crm_model::{FieldCatalog, FieldKind, ImportTarget, TargetField};

fn make_field(name: &str, label: &str, aliases: &[&str]) -> TargetField {
    TargetField {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Text,
        required: false,
        aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
    }
}

fn make_catalog(fields: Vec<TargetField>) -> FieldCatalog {
    FieldCatalog {
        target: ImportTarget::Contacts,
        fields,
    }
}

fn columns(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|header| (*header).to_string()).collect()
}

#[test]
fn exact_name_and_alias_matches_score_full_confidence() {
    let catalog = make_catalog(vec![
        make_field("first_name", "First Name", &["first name"]),
        make_field("email", "Email", &["e-mail"]),
    ]);
    let mapper = FieldMapper::new(catalog);

    let result = mapper.map(&columns(&["First Name", "E-mail", "Notes"]));

    assert_eq!(result.len(), 3);
    assert_eq!(result.mappings[0].target_field.as_deref(), Some("first_name"));
    assert_eq!(result.mappings[0].confidence, 1.0);
    assert_eq!(result.mappings[1].target_field.as_deref(), Some("email"));
    assert_eq!(result.mappings[1].confidence, 1.0);
    assert!(result.mappings[2].target_field.is_none());
    assert_eq!(result.mappings[2].confidence, 0.0);
    assert_eq!(result.unmapped_columns(), vec!["Notes"]);
}

#[test]
fn fuzzy_similarity_follows_edit_distance() {
    // "phone #" vs "phone": distance 2 over max length 7.
    let catalog = make_catalog(vec![make_field("phone", "phone", &[])]);
    let mapper = FieldMapper::new(catalog);

    let result = mapper.map(&columns(&["Phone #"]));

    let mapping = &result.mappings[0];
    assert_eq!(mapping.target_field.as_deref(), Some("phone"));
    assert!(
        (mapping.confidence - (1.0 - 2.0 / 7.0)).abs() < 1e-3,
        "expected ~0.714, got {}",
        mapping.confidence
    );
}

#[test]
fn scores_at_or_below_threshold_leave_column_unmapped() {
    let catalog = make_catalog(vec![make_field("phone", "phone", &[])]);
    let mapper = FieldMapper::new(catalog);

    let result = mapper.map(&columns(&["Quarterly Revenue"]));

    assert!(result.mappings[0].target_field.is_none());
    assert_eq!(result.mappings[0].confidence, 0.0);
}

#[test]
fn threshold_is_tunable() {
    let catalog = make_catalog(vec![make_field("phone", "phone", &[])]);
    let mapper = FieldMapper::new(catalog).with_min_confidence(0.9);

    let result = mapper.map(&columns(&["Phone #"]));

    assert!(result.mappings[0].target_field.is_none());
}

#[test]
fn first_exact_match_wins_in_catalog_order() {
    let catalog = make_catalog(vec![
        make_field("status", "Status", &["state"]),
        make_field("region", "Region", &["state"]),
    ]);
    let mapper = FieldMapper::new(catalog);

    let result = mapper.map(&columns(&["State"]));

    assert_eq!(result.mappings[0].target_field.as_deref(), Some("status"));
    assert_eq!(result.mappings[0].confidence, 1.0);
}

#[test]
fn empty_inputs_degrade_gracefully() {
    let mapper = FieldMapper::new(make_catalog(Vec::new()));
    let result = mapper.map(&columns(&["Anything"]));
    assert_eq!(result.len(), 1);
    assert!(result.mappings[0].target_field.is_none());

    let mapper = FieldMapper::new(FieldCatalog::for_target(ImportTarget::Contacts));
    let result = mapper.map(&[]);
    assert!(result.is_empty());
}

#[test]
fn builtin_contacts_catalog_maps_common_headers() {
    let mapper = FieldMapper::new(FieldCatalog::for_target(ImportTarget::Contacts));

    let result = mapper.map(&columns(&[
        "First Name",
        "Last_Name",
        "Email Address",
        "Phone Number",
        "Company Name",
    ]));

    let targets: Vec<Option<&str>> = result
        .mappings
        .iter()
        .map(|mapping| mapping.target_field.as_deref())
        .collect();
    assert_eq!(
        targets,
        vec![
            Some("first_name"),
            Some("last_name"),
            Some("email"),
            Some("phone"),
            Some("company"),
        ]
    );
    assert!(result.mappings.iter().all(|mapping| mapping.confidence == 1.0));
}

#[test]
fn result_statistics_cover_levels() {
    let catalog = make_catalog(vec![
        make_field("email", "Email", &["e-mail"]),
        make_field("phone", "phone", &[]),
    ]);
    let mapper = FieldMapper::new(catalog);

    let result = mapper.map(&columns(&["Email", "Phone #", "Notes"]));

    let counts = result.count_by_level(&ConfidenceThresholds::default());
    assert_eq!(counts.get(&ConfidenceLevel::High), Some(&1));
    assert_eq!(counts.get(&ConfidenceLevel::Low), Some(&1));
    assert!(result.target_of("email").is_some());
    assert!(result.target_of("first_name").is_none());
    let mean = result.mean_confidence().expect("mapped columns");
    assert!(mean > 0.5 && mean < 1.0);
}
