//! Lifecycle hooks — optional callbacks fired at fixed points of every
//! component transition.
//!
//! All hooks default to no-ops. The pre/post pairs bracket their operation:
//! `changing`/`changed` around a combination change, `invoking`/`invoked`
//! around handler dispatch, `covering`/`covered` around a reset or
//! displacement. Hooks run on the thread performing the transition; the
//! cover pair may run inside the registry's critical section and must not
//! call back into the registry.

use crate::combo::KeyCombination;

/// Hook observing a combination change: `(old, new)`.
pub type ChangeHook = Box<dyn Fn(KeyCombination, KeyCombination) + Send + Sync>;

/// Hook observing a single combination (invoke and cover transitions).
pub type ComboHook = Box<dyn Fn(KeyCombination) + Send + Sync>;

/// The six extension points of a [`HotkeyComponent`](crate::component::HotkeyComponent).
#[derive(Default)]
pub struct HotkeyHooks {
    /// Before a combination change is applied.
    pub on_changing: Option<ChangeHook>,
    /// After a combination change is applied and registration updated.
    pub on_changed: Option<ChangeHook>,
    /// Before handlers run for a trigger.
    pub on_invoking: Option<ComboHook>,
    /// After all handlers ran for a trigger.
    pub on_invoked: Option<ComboHook>,
    /// Before the component's key state is cleared.
    pub on_covering: Option<ComboHook>,
    /// After the component's key state was cleared.
    pub on_covered: Option<ComboHook>,
}

impl HotkeyHooks {
    pub(crate) fn changing(&self, old: KeyCombination, new: KeyCombination) {
        if let Some(hook) = &self.on_changing {
            hook(old, new);
        }
    }

    pub(crate) fn changed(&self, old: KeyCombination, new: KeyCombination) {
        if let Some(hook) = &self.on_changed {
            hook(old, new);
        }
    }

    pub(crate) fn invoking(&self, combo: KeyCombination) {
        if let Some(hook) = &self.on_invoking {
            hook(combo);
        }
    }

    pub(crate) fn invoked(&self, combo: KeyCombination) {
        if let Some(hook) = &self.on_invoked {
            hook(combo);
        }
    }

    pub(crate) fn covering(&self, combo: KeyCombination) {
        if let Some(hook) = &self.on_covering {
            hook(combo);
        }
    }

    pub(crate) fn covered(&self, combo: KeyCombination) {
        if let Some(hook) = &self.on_covered {
            hook(combo);
        }
    }
}
