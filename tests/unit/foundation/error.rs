use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TourError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TourError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(TourError::source("x").to_string().contains("source error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TourError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
