// Host tests for chamber identity and keyboard mapping.

use sensorium_core::digitizer::DigitizerCommand;
use sensorium_core::field::FieldCommand;
use sensorium_core::ink::InkCommand;
use sensorium_core::kaleidoscope::KaleidoscopeCommand;
use sensorium_core::keymap::*;
use sensorium_core::radar::RadarCommand;
use sensorium_core::ChamberId;

#[test]
fn ids_round_trip_through_hash_fragment() {
    for id in ChamberId::ALL {
        let hash = format!("#{}", id.as_str());
        assert_eq!(hash.parse::<ChamberId>().unwrap(), id);
    }
    assert_eq!("  CONSOLE ".parse::<ChamberId>().unwrap(), ChamberId::Radar);
    assert!("#nowhere".parse::<ChamberId>().is_err());
}

#[test]
fn only_field_and_ink_run_pose() {
    let pose: Vec<ChamberId> = ChamberId::ALL.into_iter().filter(|c| c.uses_pose()).collect();
    assert_eq!(pose, vec![ChamberId::Field, ChamberId::Ink]);
    assert!(!ChamberId::Radar.uses_video());
    assert!(ChamberId::Kaleidoscope.uses_video());
}

#[test]
fn digit_keys_switch_from_any_chamber() {
    for active in ChamberId::ALL {
        for (i, target) in ChamberId::ALL.into_iter().enumerate() {
            let key = (i + 1).to_string();
            assert_eq!(action_for_key(active, &key), Some(KeyAction::Switch(target)));
        }
        assert_eq!(action_for_key(active, "0"), None);
        assert_eq!(action_for_key(active, "6"), None);
    }
}

#[test]
fn same_key_means_different_things_per_chamber() {
    assert_eq!(
        action_for_key(ChamberId::Digitizer, "s"),
        Some(KeyAction::Chamber(ChamberAction::Snapshot))
    );
    assert_eq!(
        action_for_key(ChamberId::Radar, "S"),
        Some(KeyAction::Chamber(ChamberAction::SavePreset))
    );
    assert_eq!(
        action_for_key(ChamberId::Radar, "x"),
        Some(KeyAction::Chamber(ChamberAction::Radar(RadarCommand::Clear)))
    );
    assert_eq!(
        action_for_key(ChamberId::Ink, "x"),
        Some(KeyAction::Chamber(ChamberAction::Ink(InkCommand::Clear)))
    );
    assert_eq!(action_for_key(ChamberId::Field, "x"), None);
}

#[test]
fn chamber_specific_bindings() {
    use ChamberAction as A;
    let cases = [
        (ChamberId::Field, "a", A::Field(FieldCommand::ToggleMode)),
        (ChamberId::Digitizer, "d", A::Digitizer(DigitizerCommand::CycleDensity)),
        (ChamberId::Digitizer, "c", A::Digitizer(DigitizerCommand::CyclePalette)),
        (ChamberId::Radar, "p", A::Radar(RadarCommand::CycleScale)),
        (ChamberId::Radar, "+", A::Radar(RadarCommand::AdjustTempo(0.25))),
        (ChamberId::Radar, "o", A::LoadPreset),
        (ChamberId::Kaleidoscope, "r", A::Kaleidoscope(KaleidoscopeCommand::ReverseSpin)),
        (ChamberId::Kaleidoscope, "-", A::Kaleidoscope(KaleidoscopeCommand::AdjustSlices(-1))),
        (ChamberId::Ink, "m", A::Ink(InkCommand::ToggleSound)),
    ];
    for (chamber, key, want) in cases {
        assert_eq!(
            action_for_key(chamber, key),
            Some(KeyAction::Chamber(want)),
            "{chamber} key {key}"
        );
    }
}

#[test]
fn help_toggle_is_global() {
    for active in ChamberId::ALL {
        assert_eq!(action_for_key(active, "h"), Some(KeyAction::ToggleHelp));
    }
}
