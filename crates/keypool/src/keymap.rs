//! Mapping from keypool combinations to OS-level hotkeys.

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use keypool_lib::combo::KeyCombination;
use keypool_lib::keys::{ModifierKey, TriggerKey};

/// Convert a combination to an OS hotkey.
///
/// The OS layer binds exactly one trigger key per hotkey, so combinations
/// with zero or several triggers are refused.
pub fn to_os_hotkey(combo: KeyCombination) -> Result<HotKey, String> {
    let mut triggers = combo.triggers.iter();
    let (Some(trigger), None) = (triggers.next(), triggers.next()) else {
        return Err(format!(
            "\"{combo}\" cannot be registered with the OS: exactly one trigger key required"
        ));
    };

    let mut mods = Modifiers::empty();
    for m in combo.modifiers.iter() {
        mods |= match m {
            ModifierKey::Ctrl => Modifiers::CONTROL,
            ModifierKey::Alt => Modifiers::ALT,
            ModifierKey::Shift => Modifiers::SHIFT,
            ModifierKey::Win => Modifiers::SUPER,
        };
    }

    let mods = if mods.is_empty() { None } else { Some(mods) };
    Ok(HotKey::new(mods, code_for(trigger)))
}

fn code_for(key: TriggerKey) -> Code {
    match key {
        TriggerKey::A => Code::KeyA,
        TriggerKey::B => Code::KeyB,
        TriggerKey::C => Code::KeyC,
        TriggerKey::D => Code::KeyD,
        TriggerKey::E => Code::KeyE,
        TriggerKey::F => Code::KeyF,
        TriggerKey::G => Code::KeyG,
        TriggerKey::H => Code::KeyH,
        TriggerKey::I => Code::KeyI,
        TriggerKey::J => Code::KeyJ,
        TriggerKey::K => Code::KeyK,
        TriggerKey::L => Code::KeyL,
        TriggerKey::M => Code::KeyM,
        TriggerKey::N => Code::KeyN,
        TriggerKey::O => Code::KeyO,
        TriggerKey::P => Code::KeyP,
        TriggerKey::Q => Code::KeyQ,
        TriggerKey::R => Code::KeyR,
        TriggerKey::S => Code::KeyS,
        TriggerKey::T => Code::KeyT,
        TriggerKey::U => Code::KeyU,
        TriggerKey::V => Code::KeyV,
        TriggerKey::W => Code::KeyW,
        TriggerKey::X => Code::KeyX,
        TriggerKey::Y => Code::KeyY,
        TriggerKey::Z => Code::KeyZ,
        TriggerKey::D0 => Code::Digit0,
        TriggerKey::D1 => Code::Digit1,
        TriggerKey::D2 => Code::Digit2,
        TriggerKey::D3 => Code::Digit3,
        TriggerKey::D4 => Code::Digit4,
        TriggerKey::D5 => Code::Digit5,
        TriggerKey::D6 => Code::Digit6,
        TriggerKey::D7 => Code::Digit7,
        TriggerKey::D8 => Code::Digit8,
        TriggerKey::D9 => Code::Digit9,
        TriggerKey::F1 => Code::F1,
        TriggerKey::F2 => Code::F2,
        TriggerKey::F3 => Code::F3,
        TriggerKey::F4 => Code::F4,
        TriggerKey::F5 => Code::F5,
        TriggerKey::F6 => Code::F6,
        TriggerKey::F7 => Code::F7,
        TriggerKey::F8 => Code::F8,
        TriggerKey::F9 => Code::F9,
        TriggerKey::F10 => Code::F10,
        TriggerKey::F11 => Code::F11,
        TriggerKey::F12 => Code::F12,
    }
}
