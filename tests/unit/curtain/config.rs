use super::*;

#[test]
fn presets_validate() {
    CurtainConfig::overlay().validate().unwrap();
    CurtainConfig::hero(3).validate().unwrap();
    CurtainConfig::entrance().validate().unwrap();
}

#[test]
fn single_point_is_rejected() {
    let cfg = CurtainConfig {
        points: 1,
        ..CurtainConfig::overlay()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("at least 2 control points"));
}

#[test]
fn negative_or_nan_timings_are_rejected() {
    for cfg in [
        CurtainConfig {
            duration: -0.1,
            ..CurtainConfig::overlay()
        },
        CurtainConfig {
            per_path_delay: f64::NAN,
            ..CurtainConfig::overlay()
        },
        CurtainConfig {
            pulse_offset: f64::INFINITY,
            ..CurtainConfig::overlay()
        },
    ] {
        assert!(matches!(cfg.validate(), Err(CurtainError::Validation(_))));
    }
}

#[test]
fn more_points_than_table_entries_is_rejected() {
    let cfg = CurtainConfig {
        points: 12,
        ..CurtainConfig::overlay()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn fills_must_be_plain_paint_values() {
    let cfg = CurtainConfig {
        fills: ["#fff".to_string(), "red\" onload=\"x".to_string()],
        ..CurtainConfig::overlay()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn partial_json_falls_back_to_overlay_defaults() {
    let cfg = CurtainConfig::from_json_str(
        r#"{ "points": 5, "per_path_delay": 0.08, "ease": "power2.inOut",
             "stagger": { "policy": "table", "delays": [0.0, 0.12, 0.05, 0.18, 0.02] } }"#,
    )
    .unwrap();
    assert_eq!(cfg.points, 5);
    assert_eq!(cfg.ease, Ease::InOutCubic);
    assert_eq!(cfg.duration, 0.8);
    assert_eq!(cfg.reveal_order, LayerOrder::Reversed);
}

#[test]
fn unknown_fields_and_bad_json_are_serde_errors() {
    assert!(matches!(
        CurtainConfig::from_json_str(r#"{ "pointz": 5 }"#),
        Err(CurtainError::Serde(_))
    ));
    assert!(matches!(
        CurtainConfig::from_json_str("{"),
        Err(CurtainError::Serde(_))
    ));
}

#[test]
fn json_roundtrip_preserves_preset() {
    let cfg = CurtainConfig::hero(11);
    let s = serde_json::to_string(&cfg).unwrap();
    assert_eq!(CurtainConfig::from_json_str(&s).unwrap(), cfg);
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = CurtainConfig::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
