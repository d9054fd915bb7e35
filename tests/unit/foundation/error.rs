use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SphereError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        SphereError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        SphereError::pipeline("x")
            .to_string()
            .contains("pipeline error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SphereError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
