//! Keyboard shortcuts, kept free of DOM types so the mapping can be tested
//! on the host.

use crate::chamber::ChamberId;
use crate::digitizer::DigitizerCommand;
use crate::field::FieldCommand;
use crate::ink::InkCommand;
use crate::kaleidoscope::KaleidoscopeCommand;
use crate::radar::RadarCommand;

#[derive(Clone, Debug, PartialEq)]
pub enum ChamberAction {
    Field(FieldCommand),
    Digitizer(DigitizerCommand),
    Radar(RadarCommand),
    Kaleidoscope(KaleidoscopeCommand),
    Ink(InkCommand),
    Snapshot,
    SavePreset,
    LoadPreset,
}

#[derive(Clone, Debug, PartialEq)]
pub enum KeyAction {
    Switch(ChamberId),
    ToggleHelp,
    Chamber(ChamberAction),
}

pub fn action_for_key(active: ChamberId, key: &str) -> Option<KeyAction> {
    if let Some(id) = ChamberId::for_digit(key) {
        return Some(KeyAction::Switch(id));
    }
    if key.eq_ignore_ascii_case("h") {
        return Some(KeyAction::ToggleHelp);
    }
    chamber_action(active, key).map(KeyAction::Chamber)
}

fn chamber_action(active: ChamberId, key: &str) -> Option<ChamberAction> {
    use ChamberAction as A;
    let key = key.to_ascii_lowercase();
    let action = match (active, key.as_str()) {
        (ChamberId::Field, "a") => A::Field(FieldCommand::ToggleMode),
        (ChamberId::Field, "]") => A::Field(FieldCommand::AdjustForce(0.1)),
        (ChamberId::Field, "[") => A::Field(FieldCommand::AdjustForce(-0.1)),
        (ChamberId::Field, ".") => A::Field(FieldCommand::AdjustOpacity(0.05)),
        (ChamberId::Field, ",") => A::Field(FieldCommand::AdjustOpacity(-0.05)),

        (ChamberId::Digitizer, "d") => A::Digitizer(DigitizerCommand::CycleDensity),
        (ChamberId::Digitizer, "c") => A::Digitizer(DigitizerCommand::CyclePalette),
        (ChamberId::Digitizer, "s") => A::Snapshot,

        (ChamberId::Radar, "p") => A::Radar(RadarCommand::CycleScale),
        (ChamberId::Radar, "w") => A::Radar(RadarCommand::CycleWaveform),
        (ChamberId::Radar, "+" | "=") => A::Radar(RadarCommand::AdjustTempo(0.25)),
        (ChamberId::Radar, "-" | "_") => A::Radar(RadarCommand::AdjustTempo(-0.25)),
        (ChamberId::Radar, "x") => A::Radar(RadarCommand::Clear),
        (ChamberId::Radar, "s") => A::SavePreset,
        (ChamberId::Radar, "o") => A::LoadPreset,

        (ChamberId::Kaleidoscope, "+" | "=") => {
            A::Kaleidoscope(KaleidoscopeCommand::AdjustSlices(1))
        }
        (ChamberId::Kaleidoscope, "-" | "_") => {
            A::Kaleidoscope(KaleidoscopeCommand::AdjustSlices(-1))
        }
        (ChamberId::Kaleidoscope, "]") => A::Kaleidoscope(KaleidoscopeCommand::AdjustZoom(0.1)),
        (ChamberId::Kaleidoscope, "[") => A::Kaleidoscope(KaleidoscopeCommand::AdjustZoom(-0.1)),
        (ChamberId::Kaleidoscope, ".") => A::Kaleidoscope(KaleidoscopeCommand::AdjustSpeed(0.1)),
        (ChamberId::Kaleidoscope, ",") => {
            A::Kaleidoscope(KaleidoscopeCommand::AdjustSpeed(-0.1))
        }
        (ChamberId::Kaleidoscope, "r") => A::Kaleidoscope(KaleidoscopeCommand::ReverseSpin),

        (ChamberId::Ink, "i") => A::Ink(InkCommand::CycleIntensity),
        (ChamberId::Ink, "m") => A::Ink(InkCommand::ToggleSound),
        (ChamberId::Ink, "x") => A::Ink(InkCommand::Clear),
        _ => return None,
    };
    Some(action)
}
