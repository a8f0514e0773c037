//! Key combinations — canonical bitmask encoding and display rendering.
//!
//! A [`KeyCombination`] is a value type: two bit sets (modifiers, triggers)
//! whose equality, hashing, and rendering all derive from the raw mask, so
//! insertion order can never produce two "different" values for the same
//! keys. The encoded `u64` is the registry key; the rendered string is the
//! human-facing form (`"Ctrl + Alt + A"`).

use std::fmt;
use std::str::FromStr;

use crate::keys::{ModifierKey, TriggerKey};

/// Separator used when rendering a combination.
const RENDER_SEPARATOR: &str = " + ";

/// Mask of all bits assigned to modifiers.
const MODIFIER_MASK: u64 = 0b1111;

/// Mask of all bits assigned to trigger keys.
const TRIGGER_MASK: u64 = ((1u64 << 52) - 1) & !MODIFIER_MASK;

/// Set of modifier keys, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(u64);

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);

    pub fn insert(&mut self, key: ModifierKey) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: ModifierKey) {
        self.0 &= !key.bit();
    }

    pub fn contains(self, key: ModifierKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in canonical (declaration) order.
    pub fn iter(self) -> impl Iterator<Item = ModifierKey> {
        ModifierKey::ALL.into_iter().filter(move |k| self.contains(*k))
    }

    pub(crate) fn mask(self) -> u64 {
        self.0
    }

    pub(crate) fn from_mask(mask: u64) -> ModifierSet {
        ModifierSet(mask & MODIFIER_MASK)
    }
}

impl From<ModifierKey> for ModifierSet {
    fn from(key: ModifierKey) -> Self {
        ModifierSet(key.bit())
    }
}

impl FromIterator<ModifierKey> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = ModifierKey>>(iter: I) -> Self {
        let mut set = ModifierSet::EMPTY;
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Set of trigger keys, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TriggerSet(u64);

impl TriggerSet {
    pub const EMPTY: TriggerSet = TriggerSet(0);

    pub fn insert(&mut self, key: TriggerKey) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: TriggerKey) {
        self.0 &= !key.bit();
    }

    pub fn contains(self, key: TriggerKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in canonical (declaration) order.
    pub fn iter(self) -> impl Iterator<Item = TriggerKey> {
        TriggerKey::ALL.into_iter().filter(move |k| self.contains(*k))
    }

    pub(crate) fn mask(self) -> u64 {
        self.0
    }

    pub(crate) fn from_mask(mask: u64) -> TriggerSet {
        TriggerSet(mask & TRIGGER_MASK)
    }
}

impl From<TriggerKey> for TriggerSet {
    fn from(key: TriggerKey) -> Self {
        TriggerSet(key.bit())
    }
}

impl FromIterator<TriggerKey> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = TriggerKey>>(iter: I) -> Self {
        let mut set = TriggerSet::EMPTY;
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// A hotkey combination: modifier keys plus trigger keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    pub modifiers: ModifierSet,
    pub triggers: TriggerSet,
}

impl KeyCombination {
    /// The empty combination — renders to `""`, encodes to `0`, and is never
    /// a valid registry key.
    pub const EMPTY: KeyCombination = KeyCombination {
        modifiers: ModifierSet::EMPTY,
        triggers: TriggerSet::EMPTY,
    };

    pub fn new(modifiers: ModifierSet, triggers: TriggerSet) -> KeyCombination {
        KeyCombination { modifiers, triggers }
    }

    pub fn is_empty(self) -> bool {
        self.modifiers.is_empty() && self.triggers.is_empty()
    }

    /// Encode to the canonical bitmask: the OR of every member's bit.
    pub fn encode(self) -> u64 {
        self.modifiers.mask() | self.triggers.mask()
    }

    /// Decode from a bitmask. Bits not assigned to any known key are
    /// ignored, so masks produced by a newer key table still decode.
    pub fn decode(mask: u64) -> KeyCombination {
        KeyCombination {
            modifiers: ModifierSet::from_mask(mask),
            triggers: TriggerSet::from_mask(mask),
        }
    }
}

impl fmt::Display for KeyCombination {
    /// Renders members joined by `" + "`, modifiers before triggers, each
    /// group in declaration order. Equal sets always render byte-identically.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for label in self
            .modifiers
            .iter()
            .map(ModifierKey::label)
            .chain(self.triggers.iter().map(TriggerKey::label))
        {
            if !first {
                f.write_str(RENDER_SEPARATOR)?;
            }
            f.write_str(label)?;
            first = false;
        }
        Ok(())
    }
}

/// Errors from parsing a combination string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseComboError {
    /// The input was empty or whitespace-only.
    Empty,
    /// The input held modifiers but no trigger key.
    NoTriggerKey,
    /// A token matched neither a modifier nor a trigger key.
    UnknownToken(String),
}

impl fmt::Display for ParseComboError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseComboError::Empty => write!(f, "combination is empty"),
            ParseComboError::NoTriggerKey => write!(f, "combination has no trigger key"),
            ParseComboError::UnknownToken(t) => write!(f, "unknown key \"{t}\""),
        }
    }
}

impl std::error::Error for ParseComboError {}

impl FromStr for KeyCombination {
    type Err = ParseComboError;

    /// Parses `"Ctrl+Alt+A"` or `"Ctrl + Alt + A"` (case-insensitive, the
    /// aliases of [`ModifierKey::parse_token`] accepted). At least one
    /// trigger key is required.
    fn from_str(s: &str) -> Result<KeyCombination, ParseComboError> {
        let mut combo = KeyCombination::EMPTY;
        let mut tokens = 0;
        for token in s.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            tokens += 1;
            if let Some(m) = ModifierKey::parse_token(token) {
                combo.modifiers.insert(m);
            } else if let Some(t) = TriggerKey::parse_token(token) {
                combo.triggers.insert(t);
            } else {
                return Err(ParseComboError::UnknownToken(token.to_string()));
            }
        }
        if tokens == 0 {
            return Err(ParseComboError::Empty);
        }
        if combo.triggers.is_empty() {
            return Err(ParseComboError::NoTriggerKey);
        }
        Ok(combo)
    }
}
