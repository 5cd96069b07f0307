// Host tests for preset documents: neutralizing runtime state, round trips
// and rejection of malformed input.

use sensorium_core::music::{Scale, Waveform};
use sensorium_core::preset::*;
use sensorium_core::radar::{AudioNode, ConsoleConfig};

fn lit_node() -> AudioNode {
    AudioNode {
        id: "k3j9x0a1b".to_string(),
        x: 0.5,
        y: 0.5,
        active: true,
        frequency: 220.0,
        life: 0.8,
    }
}

#[test]
fn save_resets_runtime_fields() {
    let config = ConsoleConfig::default();
    let doc = save(&config, &[lit_node()], 1_700_000_000_000);
    assert_eq!(doc.version, PRESET_VERSION);
    assert_eq!(doc.nodes.len(), 1);
    assert!(!doc.nodes[0].active);
    assert_eq!(doc.nodes[0].life, 0.0);
    assert_eq!(doc.nodes[0].frequency, 220.0);
}

#[test]
fn round_trip_preserves_layout() {
    let config = ConsoleConfig {
        scale: Scale::Phrygian,
        waveform: Waveform::Saw,
        tempo: 1.75,
    };
    let mut second = lit_node();
    second.id = "zz".into();
    second.x = 0.1;
    second.y = 0.9;
    second.frequency = 96.0;
    let json = to_json(&save(&config, &[lit_node(), second], 42)).unwrap();
    assert!(json.contains("\"sawtooth\""));
    assert!(json.contains("\"phrygian\""));

    let (loaded_config, nodes) = load(&json).unwrap();
    assert_eq!(loaded_config, config);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].id, "zz");
    assert_eq!(nodes[1].frequency, 96.0);
    assert!(nodes.iter().all(|n| !n.active && n.life == 0.0));
}

#[test]
fn loading_a_lit_node_neutralizes_it() {
    let json = r#"{
        "version": 1,
        "timestamp": 1700000000000,
        "config": { "scale": "pentatonic", "waveform": "sine", "tempo": 1.0 },
        "nodes": [
            { "id": "k3j9x0a1b", "x": 0.5, "y": 0.5, "active": true, "frequency": 220, "life": 0.8 }
        ]
    }"#;
    let (config, nodes) = load(json).unwrap();
    assert_eq!(config, ConsoleConfig::default());
    assert_eq!(nodes.len(), 1);
    assert!(!nodes[0].active);
    assert_eq!(nodes[0].life, 0.0);
    assert_eq!(nodes[0].frequency, 220.0);
}

#[test]
fn unknown_fields_and_missing_runtime_state_are_accepted() {
    let json = r#"{
        "version": 1,
        "timestamp": 5,
        "author": "someone",
        "config": { "scale": "chromatic", "waveform": "square", "tempo": 0.5, "extra": true },
        "nodes": [ { "id": "a", "x": 0.0, "y": 1.0, "frequency": 55.5 } ]
    }"#;
    let (config, nodes) = load(json).unwrap();
    assert_eq!(config.scale, Scale::Chromatic);
    assert_eq!(config.waveform, Waveform::Square);
    assert_eq!(nodes[0].life, 0.0);
}

#[test]
fn other_versions_still_load() {
    let json = r#"{"version": 2, "timestamp": 0,
        "config": {"scale": "pentatonic", "waveform": "sine", "tempo": 1.0}, "nodes": []}"#;
    assert!(load(json).is_ok());
}

#[test]
fn malformed_documents_are_rejected() {
    let cases = [
        "",
        "not json",
        r#"{"version": 1}"#,
        r#"{"version": 1, "timestamp": 0, "config": {"scale": "lydian", "waveform": "sine", "tempo": 1.0}, "nodes": []}"#,
        r#"{"version": 1, "timestamp": 0, "config": {"scale": "pentatonic", "waveform": "sine"}, "nodes": []}"#,
        r#"{"version": 1, "timestamp": 0, "config": {"scale": "pentatonic", "waveform": "sine", "tempo": 1.0}, "nodes": {}}"#,
    ];
    for json in cases {
        assert!(
            matches!(load(json), Err(PresetError::InvalidDocument(_))),
            "accepted {json:?}"
        );
    }
}

#[test]
fn out_of_range_values_are_rejected() {
    let base = |node: &str, tempo: f32| {
        format!(
            r#"{{"version": 1, "timestamp": 0,
                "config": {{"scale": "pentatonic", "waveform": "sine", "tempo": {tempo}}},
                "nodes": [{node}]}}"#
        )
    };
    let ok = r#"{"id": "a", "x": 0.5, "y": 0.5, "frequency": 220}"#;
    assert!(load(&base(ok, 1.0)).is_ok());
    assert!(matches!(
        load(&base(ok, 0.0)),
        Err(PresetError::InvalidConfig(_))
    ));
    for bad in [
        r#"{"id": "", "x": 0.5, "y": 0.5, "frequency": 220}"#,
        r#"{"id": "a", "x": 1.5, "y": 0.5, "frequency": 220}"#,
        r#"{"id": "a", "x": 0.5, "y": -0.1, "frequency": 220}"#,
        r#"{"id": "a", "x": 0.5, "y": 0.5, "frequency": 0}"#,
    ] {
        assert!(
            matches!(load(&base(bad, 1.0)), Err(PresetError::InvalidNode { .. })),
            "accepted {bad}"
        );
    }
}

#[test]
fn file_name_carries_timestamp() {
    assert_eq!(preset_file_name(1234), "SENSORIUM_PRESET_1234.json");
}
