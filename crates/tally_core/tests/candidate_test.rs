use serde_json::json;
use tally_core::{CandidateEntity, CandidateEntityBuilder, Metadata, ResolutionMatch};

#[test]
fn builder_defaults_metadata() {
    let candidate = CandidateEntityBuilder::default()
        .id(3)
        .display_name("Roommates")
        .build()
        .unwrap();

    assert_eq!(*candidate.id(), 3);
    assert!(candidate.metadata().is_empty());
}

#[test]
fn builder_requires_id() {
    let result = CandidateEntityBuilder::default().display_name("Nobody").build();
    assert!(result.is_err());
}

#[test]
fn match_copies_candidate_fields() {
    let mut metadata = Metadata::new();
    metadata.insert("email".to_string(), json!("jon@example.com"));
    let candidate = CandidateEntity::new(11, "Jonathan Lee").with_metadata(metadata.clone());

    let matched = ResolutionMatch::from_candidate(&candidate, 87.5);

    assert_eq!(*matched.id(), 11);
    assert_eq!(matched.name(), "Jonathan Lee");
    assert_eq!(*matched.score(), 87.5);
    assert_eq!(matched.metadata(), &metadata);
}

#[test]
fn match_serializes_with_flat_field_names() {
    let candidate = CandidateEntity::new(1, "John Smith");
    let value = serde_json::to_value(ResolutionMatch::from_candidate(&candidate, 90.0)).unwrap();

    assert_eq!(value["id"], json!(1));
    assert_eq!(value["name"], json!("John Smith"));
    assert_eq!(value["score"], json!(90.0));
    assert_eq!(value["metadata"], json!({}));
}

#[test]
fn candidate_deserializes_without_metadata() {
    let candidate: CandidateEntity =
        serde_json::from_value(json!({"id": 5, "display_name": "Food and drink"})).unwrap();
    assert_eq!(candidate.display_name(), "Food and drink");
    assert!(candidate.metadata().is_empty());
}
