//! Modifier and trigger key definitions with stable bit assignments.
//!
//! Every key owns one bit of the encoded combination mask. Bit values are
//! part of the on-wire contract (registry keys, `watch` routing) and must
//! never be renumbered:
//!
//! - bits 0–3: modifiers (`Ctrl`, `Alt`, `Shift`, `Win`)
//! - bits 4–29: letters `A`–`Z`
//! - bits 30–39: digits `0`–`9`
//! - bits 40–51: function keys `F1`–`F12`
//!
//! Declaration order doubles as the canonical rendering order, so two
//! combinations holding the same keys always display identically regardless
//! of how they were built.

/// Modifier keys. Discriminants are bit indices into the combination mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModifierKey {
    Ctrl = 0,
    Alt = 1,
    Shift = 2,
    Win = 3,
}

impl ModifierKey {
    /// All modifiers in canonical (declaration) order.
    pub const ALL: [ModifierKey; 4] = [
        ModifierKey::Ctrl,
        ModifierKey::Alt,
        ModifierKey::Shift,
        ModifierKey::Win,
    ];

    /// The key's bit in the combination mask.
    pub fn bit(self) -> u64 {
        1 << (self as u8)
    }

    /// Canonical display label.
    pub fn label(self) -> &'static str {
        match self {
            ModifierKey::Ctrl => "Ctrl",
            ModifierKey::Alt => "Alt",
            ModifierKey::Shift => "Shift",
            ModifierKey::Win => "Win",
        }
    }

    /// Parse a single token (case-insensitive, common aliases accepted).
    pub fn parse_token(token: &str) -> Option<ModifierKey> {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "ctl" => Some(ModifierKey::Ctrl),
            "alt" | "opt" | "option" => Some(ModifierKey::Alt),
            "shift" => Some(ModifierKey::Shift),
            "win" | "super" | "meta" | "cmd" | "command" => Some(ModifierKey::Win),
            _ => None,
        }
    }
}

/// Trigger keys. Discriminants are bit indices into the combination mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TriggerKey {
    A = 4,
    B = 5,
    C = 6,
    D = 7,
    E = 8,
    F = 9,
    G = 10,
    H = 11,
    I = 12,
    J = 13,
    K = 14,
    L = 15,
    M = 16,
    N = 17,
    O = 18,
    P = 19,
    Q = 20,
    R = 21,
    S = 22,
    T = 23,
    U = 24,
    V = 25,
    W = 26,
    X = 27,
    Y = 28,
    Z = 29,
    D0 = 30,
    D1 = 31,
    D2 = 32,
    D3 = 33,
    D4 = 34,
    D5 = 35,
    D6 = 36,
    D7 = 37,
    D8 = 38,
    D9 = 39,
    F1 = 40,
    F2 = 41,
    F3 = 42,
    F4 = 43,
    F5 = 44,
    F6 = 45,
    F7 = 46,
    F8 = 47,
    F9 = 48,
    F10 = 49,
    F11 = 50,
    F12 = 51,
}

impl TriggerKey {
    /// All trigger keys in canonical (declaration) order.
    pub const ALL: [TriggerKey; 48] = [
        TriggerKey::A,
        TriggerKey::B,
        TriggerKey::C,
        TriggerKey::D,
        TriggerKey::E,
        TriggerKey::F,
        TriggerKey::G,
        TriggerKey::H,
        TriggerKey::I,
        TriggerKey::J,
        TriggerKey::K,
        TriggerKey::L,
        TriggerKey::M,
        TriggerKey::N,
        TriggerKey::O,
        TriggerKey::P,
        TriggerKey::Q,
        TriggerKey::R,
        TriggerKey::S,
        TriggerKey::T,
        TriggerKey::U,
        TriggerKey::V,
        TriggerKey::W,
        TriggerKey::X,
        TriggerKey::Y,
        TriggerKey::Z,
        TriggerKey::D0,
        TriggerKey::D1,
        TriggerKey::D2,
        TriggerKey::D3,
        TriggerKey::D4,
        TriggerKey::D5,
        TriggerKey::D6,
        TriggerKey::D7,
        TriggerKey::D8,
        TriggerKey::D9,
        TriggerKey::F1,
        TriggerKey::F2,
        TriggerKey::F3,
        TriggerKey::F4,
        TriggerKey::F5,
        TriggerKey::F6,
        TriggerKey::F7,
        TriggerKey::F8,
        TriggerKey::F9,
        TriggerKey::F10,
        TriggerKey::F11,
        TriggerKey::F12,
    ];

    /// The key's bit in the combination mask.
    pub fn bit(self) -> u64 {
        1 << (self as u8)
    }

    /// Canonical display label.
    pub fn label(self) -> &'static str {
        const LABELS: [&str; 48] = [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q",
            "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "0", "1", "2", "3", "4", "5", "6", "7",
            "8", "9", "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
        ];
        LABELS[(self as u8 - 4) as usize]
    }

    /// Parse a single token (case-insensitive).
    ///
    /// Accepts the canonical labels plus the `D0`–`D9` digit spelling.
    pub fn parse_token(token: &str) -> Option<TriggerKey> {
        let upper = token.to_ascii_uppercase();
        let candidate = upper.strip_prefix('D').filter(|rest| {
            // "D0".."D9" → "0".."9"; leave "D" itself and F-keys alone
            rest.len() == 1 && rest.chars().all(|c| c.is_ascii_digit())
        });
        let wanted = candidate.unwrap_or(&upper);
        TriggerKey::ALL
            .iter()
            .copied()
            .find(|k| k.label() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── bit stability ──

    #[test]
    fn modifier_bits_are_stable() {
        assert_eq!(ModifierKey::Ctrl.bit(), 0b0001);
        assert_eq!(ModifierKey::Alt.bit(), 0b0010);
        assert_eq!(ModifierKey::Shift.bit(), 0b0100);
        assert_eq!(ModifierKey::Win.bit(), 0b1000);
    }

    #[test]
    fn trigger_bits_start_above_modifiers() {
        assert_eq!(TriggerKey::A.bit(), 1 << 4);
        assert_eq!(TriggerKey::Z.bit(), 1 << 29);
        assert_eq!(TriggerKey::D0.bit(), 1 << 30);
        assert_eq!(TriggerKey::D9.bit(), 1 << 39);
        assert_eq!(TriggerKey::F1.bit(), 1 << 40);
        assert_eq!(TriggerKey::F12.bit(), 1 << 51);
    }

    #[test]
    fn bits_are_disjoint() {
        let mut seen = 0u64;
        for m in ModifierKey::ALL {
            assert_eq!(seen & m.bit(), 0, "duplicate bit for {m:?}");
            seen |= m.bit();
        }
        for t in TriggerKey::ALL {
            assert_eq!(seen & t.bit(), 0, "duplicate bit for {t:?}");
            seen |= t.bit();
        }
    }

    // ── labels ──

    #[test]
    fn modifier_labels() {
        assert_eq!(ModifierKey::Ctrl.label(), "Ctrl");
        assert_eq!(ModifierKey::Win.label(), "Win");
    }

    #[test]
    fn trigger_labels_cover_all_groups() {
        assert_eq!(TriggerKey::A.label(), "A");
        assert_eq!(TriggerKey::Z.label(), "Z");
        assert_eq!(TriggerKey::D0.label(), "0");
        assert_eq!(TriggerKey::D9.label(), "9");
        assert_eq!(TriggerKey::F1.label(), "F1");
        assert_eq!(TriggerKey::F12.label(), "F12");
    }

    #[test]
    fn every_trigger_label_parses_back() {
        for t in TriggerKey::ALL {
            assert_eq!(TriggerKey::parse_token(t.label()), Some(t));
        }
    }

    #[test]
    fn every_modifier_label_parses_back() {
        for m in ModifierKey::ALL {
            assert_eq!(ModifierKey::parse_token(m.label()), Some(m));
        }
    }

    // ── parsing ──

    #[test]
    fn modifier_aliases() {
        assert_eq!(ModifierKey::parse_token("control"), Some(ModifierKey::Ctrl));
        assert_eq!(ModifierKey::parse_token("CTRL"), Some(ModifierKey::Ctrl));
        assert_eq!(ModifierKey::parse_token("option"), Some(ModifierKey::Alt));
        assert_eq!(ModifierKey::parse_token("super"), Some(ModifierKey::Win));
        assert_eq!(ModifierKey::parse_token("cmd"), Some(ModifierKey::Win));
        assert_eq!(ModifierKey::parse_token("a"), None);
    }

    #[test]
    fn trigger_parse_case_insensitive() {
        assert_eq!(TriggerKey::parse_token("a"), Some(TriggerKey::A));
        assert_eq!(TriggerKey::parse_token("f12"), Some(TriggerKey::F12));
    }

    #[test]
    fn trigger_parse_digit_spellings() {
        assert_eq!(TriggerKey::parse_token("0"), Some(TriggerKey::D0));
        assert_eq!(TriggerKey::parse_token("d0"), Some(TriggerKey::D0));
        assert_eq!(TriggerKey::parse_token("D7"), Some(TriggerKey::D7));
    }

    #[test]
    fn trigger_parse_d_is_the_letter() {
        // Bare "D" is the letter key, not a digit prefix
        assert_eq!(TriggerKey::parse_token("d"), Some(TriggerKey::D));
    }

    #[test]
    fn trigger_parse_rejects_unknown() {
        assert_eq!(TriggerKey::parse_token("F13"), None);
        assert_eq!(TriggerKey::parse_token("enter"), None);
        assert_eq!(TriggerKey::parse_token(""), None);
    }
}
