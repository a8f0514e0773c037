//! Global hotkey registry — one owner per combination, last writer wins.
//!
//! The registry is the single piece of shared mutable state in the core: a
//! map from encoded combination to its owning component. One mutex guards
//! every `register`/`unregister`/`dispatch`, so evict-then-install is atomic
//! with respect to dispatch. Owners are held as `Weak` handles — a dropped
//! component can never be invoked, and its stale entry is pruned on contact.
//!
//! Handler invocation happens outside the lock: a handler is free to rebind
//! hotkeys without deadlocking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::combo::KeyCombination;
use crate::component::HotkeyComponent;

/// A registry entry: the owner's id plus a weak handle to it.
struct Entry {
    owner_id: u64,
    owner: Weak<HotkeyComponent>,
}

/// Outcome of a [`HotkeyRegistry::register`] call.
pub struct Registration {
    /// Whether the mapping was installed. `false` only for the empty
    /// combination.
    pub installed: bool,
    /// The component this registration displaced, if any. Its covered
    /// transition has already run.
    pub displaced: Option<Arc<HotkeyComponent>>,
}

/// Process-wide mapping from encoded combination to owning component.
#[derive(Default)]
pub struct HotkeyRegistry {
    entries: Mutex<HashMap<u64, Entry>>,
}

fn lock(mutex: &Mutex<HashMap<u64, Entry>>) -> MutexGuard<'_, HashMap<u64, Entry>> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HotkeyRegistry {
    pub fn new() -> HotkeyRegistry {
        HotkeyRegistry::default()
    }

    /// Install `owner` as the owner of `combo`.
    ///
    /// The empty combination is refused (`installed = false`, registry
    /// untouched). Re-registering the current owner is a no-op success. Any
    /// other live owner is displaced: its covered transition runs before the
    /// new mapping is installed, so no two owners ever hold the same
    /// combination.
    pub fn register(&self, owner: &Arc<HotkeyComponent>, combo: KeyCombination) -> Registration {
        let code = combo.encode();
        if code == 0 {
            log::debug!("refusing to register empty combination");
            return Registration {
                installed: false,
                displaced: None,
            };
        }

        let mut entries = lock(&self.entries);
        let mut displaced = None;
        if let Some(entry) = entries.get(&code) {
            if entry.owner_id == owner.id() {
                return Registration {
                    installed: true,
                    displaced: None,
                };
            }
            if let Some(prev) = entry.owner.upgrade() {
                // Evict before installing — covered() never re-enters the
                // registry, so running it under the lock is safe.
                prev.covered();
                log::debug!("\"{combo}\" displaced component {}", prev.id());
                displaced = Some(prev);
            }
        }
        entries.insert(
            code,
            Entry {
                owner_id: owner.id(),
                owner: Arc::downgrade(owner),
            },
        );
        Registration {
            installed: true,
            displaced,
        }
    }

    /// Remove the mapping for `combo`, but only if `owner` still owns it.
    ///
    /// A stale call (the combination was re-claimed or never owned) is a
    /// silent no-op, protecting against unregisters racing a displacement.
    pub fn unregister(&self, owner: &HotkeyComponent, combo: KeyCombination) {
        let code = combo.encode();
        if code == 0 {
            return;
        }
        let mut entries = lock(&self.entries);
        let owned_by_caller =
            matches!(entries.get(&code), Some(entry) if entry.owner_id == owner.id());
        if owned_by_caller {
            entries.remove(&code);
        } else if entries.contains_key(&code) {
            log::trace!("stale unregister of \"{combo}\" ignored");
        }
    }

    /// Route a fired combination to its owner's `invoke`.
    pub fn dispatch(&self, combo: KeyCombination) {
        self.dispatch_code(combo.encode());
    }

    /// Route a fired combination, by encoded mask, to its owner's `invoke`.
    ///
    /// No owner (stale platform notification, concurrent unregister, or a
    /// dropped component) is an expected cross-boundary race: the event is
    /// dropped with a diagnostic. The owner's handlers run outside the
    /// registry lock.
    pub fn dispatch_code(&self, code: u64) {
        let owner = {
            let mut entries = lock(&self.entries);
            match entries.get(&code).map(|entry| entry.owner.upgrade()) {
                Some(Some(owner)) => Some(owner),
                Some(None) => {
                    entries.remove(&code);
                    log::debug!("dropping dispatch for {code:#x}: owner is gone");
                    None
                }
                None => {
                    log::debug!("dropping dispatch for {code:#x}: no owner");
                    None
                }
            }
        };
        if let Some(owner) = owner {
            owner.invoke();
        }
    }

    /// The live owner of `combo`, if any. Prunes a dead entry on contact.
    pub fn owner_of(&self, combo: KeyCombination) -> Option<Arc<HotkeyComponent>> {
        let code = combo.encode();
        let mut entries = lock(&self.entries);
        match entries.get(&code).map(|entry| entry.owner.upgrade()) {
            Some(Some(owner)) => Some(owner),
            Some(None) => {
                entries.remove(&code);
                None
            }
            None => None,
        }
    }

    /// Snapshot of live `(encoded combination, owner id)` pairs, sorted by
    /// code. Dead entries are pruned.
    pub fn bindings(&self) -> Vec<(u64, u64)> {
        let mut entries = lock(&self.entries);
        entries.retain(|_, entry| entry.owner.strong_count() > 0);
        let mut pairs: Vec<(u64, u64)> = entries
            .iter()
            .map(|(code, entry)| (*code, entry.owner_id))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Number of mappings, dead entries included until pruned.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}
