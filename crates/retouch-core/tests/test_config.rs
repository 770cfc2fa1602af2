use retouch_core::config::EditorConfig;
use retouch_core::crop::AspectRatio;
use retouch_core::error::RetouchError;

#[test]
fn test_default_values() {
    let c = EditorConfig::default();
    assert_eq!(c.viewport.min_zoom, 0.1);
    assert_eq!(c.viewport.max_zoom, 10.0);
    assert_eq!(c.viewport.fit_padding, 0.95);
    assert_eq!(c.mask.brush_size, 20.0);
    assert_eq!(c.crop.min_size, 0.05);
    assert_eq!(c.crop.aspect_ratio, AspectRatio::Free);
    assert!(c.validate().is_ok());
}

#[test]
fn test_empty_document_gives_defaults() {
    let c = EditorConfig::from_toml_str("").unwrap();
    assert_eq!(c, EditorConfig::default());
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let c = EditorConfig::from_toml_str(
        r#"
        [viewport]
        max_zoom = 32.0

        [crop]
        aspect_ratio = "4:3"
        "#,
    )
    .unwrap();

    assert_eq!(c.viewport.max_zoom, 32.0);
    assert_eq!(c.viewport.min_zoom, 0.1);
    assert_eq!(c.crop.aspect_ratio, AspectRatio::Fixed(4.0 / 3.0));
    assert_eq!(c.crop.min_size, 0.05);
}

#[test]
fn test_toml_round_trip() {
    let mut c = EditorConfig::default();
    c.mask.overlay_color = [0, 200, 255];
    c.crop.aspect_ratio = AspectRatio::Fixed(16.0 / 9.0);

    let text = c.to_toml_string().unwrap();
    assert!(text.contains("aspect_ratio = \"16:9\""));
    assert_eq!(EditorConfig::from_toml_str(&text).unwrap(), c);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "[viewport]\nmin_zoom = 0.0",
        "[viewport]\nmin_zoom = 5.0\nmax_zoom = 2.0",
        "[viewport]\nfit_padding = 1.5",
        "[mask]\nbrush_size = -3.0",
        "[crop]\nmin_size = 1.0",
        "[input]\nclick_tolerance = -1.0",
    ];
    for doc in cases {
        let err = EditorConfig::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, RetouchError::InvalidConfig(_)), "{doc}: {err}");
    }
}

#[test]
fn test_bad_aspect_ratio_is_a_parse_error() {
    let err = EditorConfig::from_toml_str("[crop]\naspect_ratio = \"wide\"").unwrap_err();
    assert!(matches!(err, RetouchError::TomlParse(_)));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("retouch.toml");
    std::fs::write(&path, "[mask]\nbrush_size = 42.0\n").unwrap();

    let c = EditorConfig::load(&path).unwrap();
    assert_eq!(c.mask.brush_size, 42.0);

    assert!(matches!(
        EditorConfig::load(&dir.path().join("missing.toml")),
        Err(RetouchError::Io(_))
    ));
}
