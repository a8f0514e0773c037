//! Dispatch/notification bridge — raw platform events to core transitions.
//!
//! Two translation paths, kept free of any platform crate so binaries stay
//! thin adapters:
//!
//! - [`KeyCapture`] turns raw key-down/up events into combination updates on
//!   a target component (the "recorder" path).
//! - [`DispatchTable`] maps opaque platform hotkey handles to combinations
//!   and routes fired handles into [`HotkeyRegistry::dispatch`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::combo::{KeyCombination, ModifierSet, TriggerSet};
use crate::component::HotkeyComponent;
use crate::keys::{ModifierKey, TriggerKey};
use crate::registry::HotkeyRegistry;

/// A raw key as reported by a platform capture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKey {
    Modifier(ModifierKey),
    Trigger(TriggerKey),
}

/// Tracks the currently pressed keys and mirrors them into a component.
///
/// Every delta calls `set_combination` on the target, so the component's
/// registration follows the pressed chord — equal states are already
/// filtered out by the component's no-op check.
pub struct KeyCapture {
    target: Arc<HotkeyComponent>,
    modifiers: ModifierSet,
    triggers: TriggerSet,
}

impl KeyCapture {
    pub fn new(target: Arc<HotkeyComponent>) -> KeyCapture {
        KeyCapture {
            target,
            modifiers: ModifierSet::EMPTY,
            triggers: TriggerSet::EMPTY,
        }
    }

    /// The chord currently held.
    pub fn pressed(&self) -> KeyCombination {
        KeyCombination::new(self.modifiers, self.triggers)
    }

    pub fn key_down(&mut self, key: RawKey) {
        match key {
            RawKey::Modifier(m) => self.modifiers.insert(m),
            RawKey::Trigger(t) => self.triggers.insert(t),
        }
        self.push();
    }

    pub fn key_up(&mut self, key: RawKey) {
        match key {
            RawKey::Modifier(m) => self.modifiers.remove(m),
            RawKey::Trigger(t) => self.triggers.remove(t),
        }
        self.push();
    }

    /// Release every held key (focus loss, capture end).
    pub fn release_all(&mut self) {
        self.modifiers = ModifierSet::EMPTY;
        self.triggers = TriggerSet::EMPTY;
        self.push();
    }

    fn push(&self) {
        self.target.set_combination(self.pressed());
    }
}

/// Routes opaque platform hotkey handles to registry dispatch.
///
/// Platform layers report "hotkey fired" with their own identifier (e.g. the
/// OS registration id); the table maps those back to combinations.
#[derive(Default)]
pub struct DispatchTable {
    routes: HashMap<u32, KeyCombination>,
}

impl DispatchTable {
    pub fn new() -> DispatchTable {
        DispatchTable::default()
    }

    /// Associate a platform handle with a combination.
    pub fn insert(&mut self, handle: u32, combo: KeyCombination) {
        self.routes.insert(handle, combo);
    }

    /// Drop a platform handle's route.
    pub fn remove(&mut self, handle: u32) {
        self.routes.remove(&handle);
    }

    /// Route a fired platform handle into the registry.
    ///
    /// An unknown handle is dropped with a diagnostic — the platform may
    /// fire a registration the table no longer knows about.
    pub fn route(&self, registry: &HotkeyRegistry, handle: u32) {
        match self.routes.get(&handle) {
            Some(combo) => registry.dispatch(*combo),
            None => log::debug!("dropping fired hotkey with unknown handle {handle}"),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn setup() -> (Arc<HotkeyRegistry>, Arc<HotkeyComponent>) {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(Arc::clone(&registry));
        (registry, component)
    }

    // ── KeyCapture ──

    #[test]
    fn capture_builds_combination_from_deltas() {
        let (registry, component) = setup();
        let mut capture = KeyCapture::new(Arc::clone(&component));

        capture.key_down(RawKey::Modifier(ModifierKey::Ctrl));
        capture.key_down(RawKey::Trigger(TriggerKey::A));

        assert_eq!(component.display(), "Ctrl + A");
        assert!(component.is_registered());
        assert_eq!(
            registry.owner_of(capture.pressed()).unwrap().id(),
            component.id()
        );
    }

    #[test]
    fn capture_key_up_shrinks_the_chord() {
        let (_registry, component) = setup();
        let mut capture = KeyCapture::new(Arc::clone(&component));

        capture.key_down(RawKey::Modifier(ModifierKey::Ctrl));
        capture.key_down(RawKey::Trigger(TriggerKey::A));
        capture.key_up(RawKey::Trigger(TriggerKey::A));

        assert_eq!(component.display(), "Ctrl");
        assert_eq!(capture.pressed().to_string(), "Ctrl");
    }

    #[test]
    fn capture_release_all_empties_the_component() {
        let (registry, component) = setup();
        let mut capture = KeyCapture::new(Arc::clone(&component));

        capture.key_down(RawKey::Modifier(ModifierKey::Win));
        capture.key_down(RawKey::Trigger(TriggerKey::F5));
        capture.release_all();

        assert!(component.combination().is_empty());
        assert!(!component.is_registered());
        assert!(registry.bindings().is_empty());
    }

    #[test]
    fn capture_records_every_transition() {
        let (_registry, component) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));

        // Observe transitions through the component's display string
        let mut capture = KeyCapture::new(Arc::clone(&component));
        for key in [
            RawKey::Modifier(ModifierKey::Ctrl),
            RawKey::Modifier(ModifierKey::Shift),
            RawKey::Trigger(TriggerKey::M),
        ] {
            capture.key_down(key);
            log.lock().unwrap().push(component.display());
        }

        assert_eq!(
            *log.lock().unwrap(),
            vec!["Ctrl", "Ctrl + Shift", "Ctrl + Shift + M"]
        );
    }

    // ── DispatchTable ──

    #[test]
    fn route_dispatches_to_the_owner() {
        let (registry, component) = setup();
        let combo: KeyCombination = "Ctrl+Shift+M".parse().unwrap();
        component.set_combination(combo);

        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        component.on_trigger(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });

        let mut table = DispatchTable::new();
        table.insert(42, combo);
        table.route(&registry, 42);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn route_unknown_handle_is_dropped() {
        let (registry, _component) = setup();
        let table = DispatchTable::new();
        // Must not panic or touch the registry
        table.route(&registry, 7);
    }

    #[test]
    fn remove_stops_routing() {
        let (registry, component) = setup();
        let combo: KeyCombination = "Alt+F4".parse().unwrap();
        component.set_combination(combo);

        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        component.on_trigger(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });

        let mut table = DispatchTable::new();
        table.insert(1, combo);
        table.remove(1);
        assert!(table.is_empty());

        table.route(&registry, 1);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
