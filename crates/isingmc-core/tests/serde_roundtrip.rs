use isingmc_core::errors::{ErrorInfo, IsingError};
use isingmc_core::{EdgeId, VertexId};

#[test]
fn error_round_trip_json() {
    let err = IsingError::Index(
        ErrorInfo::new("unknown-vertex", "vertex does not exist")
            .with_context("vertex", 12)
            .with_hint("vertices are addressed by insertion order"),
    );

    let json = serde_json::to_string_pretty(&err).expect("serialize");
    assert!(json.contains("\"family\": \"Index\""));
    let decoded: IsingError = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(decoded, err);
}

#[test]
fn identifiers_round_trip_json() {
    let ids = (VertexId::new(4), EdgeId::new(9));
    let json = serde_json::to_string(&ids).expect("serialize");
    let decoded: (VertexId, EdgeId) = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, ids);
    assert_eq!(decoded.0.index(), 4);
    assert_eq!(decoded.1.index(), 9);
}
