use super::*;

fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

#[test]
fn defaults_match_documented_values() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.cache_entries, 8);
    assert_eq!(cfg.cache_max_pixels, 4096);
    assert_eq!(cfg.filter, Filter::Mitchell);
    assert!(!cfg.generic_fallback);
}

#[test]
fn lookup_overrides_and_clamps() {
    let cfg = EngineConfig::from_lookup(lookup(&[
        ("RIMAGE_CACHE", "1000"),
        ("RIMAGE_CACHE_SIZE", " 100 "),
    ]));
    assert_eq!(cfg.cache_entries, 256);
    assert_eq!(cfg.cache_max_pixels, 100);

    let cfg = EngineConfig::from_lookup(lookup(&[("RIMAGE_CACHE", "-4")]));
    assert_eq!(cfg.cache_entries, 0);
    assert_eq!(cfg.cache_max_pixels, DEFAULT_CACHE_MAX_PIXELS);
}

#[test]
fn unparsable_values_fall_back_to_defaults() {
    let cfg = EngineConfig::from_lookup(lookup(&[
        ("RIMAGE_CACHE", "lots"),
        ("RIMAGE_CACHE_SIZE", ""),
    ]));
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn json_fills_missing_fields_and_sanitizes() {
    let cfg = EngineConfig::from_json_str(r#"{"cache_max_pixels": 999999, "filter": "lanczos3"}"#)
        .unwrap();
    assert_eq!(cfg.cache_entries, DEFAULT_CACHE_ENTRIES);
    assert_eq!(cfg.cache_max_pixels, MAX_CACHE_MAX_PIXELS);
    assert_eq!(cfg.filter, Filter::Lanczos3);
}

#[test]
fn json_rejects_garbage() {
    let err = EngineConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, RasterError::Validation(_)));
}
