//! Hotkey component — the per-binding state machine.
//!
//! A component owns one key combination, a registration flag, and an ordered
//! handler list. Changing the combination re-registers it with the shared
//! [`HotkeyRegistry`]; being displaced by another component runs the covered
//! transition (key state cleared, handlers kept). Handlers fire in
//! registration order and are isolated from each other: one panicking
//! handler never stops the rest.
//!
//! Lock discipline: the component never holds its own state lock across a
//! registry call, so lock acquisition is always registry → component.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::combo::KeyCombination;
use crate::hooks::HotkeyHooks;
use crate::registry::HotkeyRegistry;

/// Process-wide component id allocator.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Payload passed to every trigger handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyEvent {
    /// Id of the component that fired.
    pub component: u64,
    /// The combination at the time of firing.
    pub combination: KeyCombination,
}

/// A subscribed trigger handler.
pub type Handler = Arc<dyn Fn(&HotkeyEvent) + Send + Sync>;

/// Mutable key state, guarded by a short-lived lock.
struct KeyState {
    combination: KeyCombination,
    is_registered: bool,
}

/// A hotkey binding bound to a shared registry.
pub struct HotkeyComponent {
    id: u64,
    registry: Arc<HotkeyRegistry>,
    state: Mutex<KeyState>,
    handlers: Mutex<Vec<Handler>>,
    hooks: HotkeyHooks,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HotkeyComponent {
    /// Create a component with default (no-op) hooks.
    pub fn new(registry: Arc<HotkeyRegistry>) -> Arc<HotkeyComponent> {
        HotkeyComponent::with_hooks(registry, HotkeyHooks::default())
    }

    /// Create a component with the given lifecycle hooks.
    pub fn with_hooks(registry: Arc<HotkeyRegistry>, hooks: HotkeyHooks) -> Arc<HotkeyComponent> {
        Arc::new(HotkeyComponent {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            registry,
            state: Mutex::new(KeyState {
                combination: KeyCombination::EMPTY,
                is_registered: false,
            }),
            handlers: Mutex::new(Vec::new()),
            hooks,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The current combination.
    pub fn combination(&self) -> KeyCombination {
        lock(&self.state).combination
    }

    /// Whether the combination is currently installed in the registry.
    pub fn is_registered(&self) -> bool {
        lock(&self.state).is_registered
    }

    /// Rendered display text of the current combination.
    pub fn display(&self) -> String {
        self.combination().to_string()
    }

    /// Number of subscribed handlers.
    pub fn handler_count(&self) -> usize {
        lock(&self.handlers).len()
    }

    /// Subscribe a trigger handler. Handlers fire in subscription order.
    pub fn on_trigger<F>(&self, handler: F)
    where
        F: Fn(&HotkeyEvent) + Send + Sync + 'static,
    {
        lock(&self.handlers).push(Arc::new(handler));
    }

    /// Detach every subscribed handler. Key state is untouched.
    pub fn remove_all_handlers(&self) {
        lock(&self.handlers).clear();
    }

    /// Change the combination, re-registering with the registry.
    ///
    /// Setting the current combination again is a silent no-op (no hooks
    /// fire). Otherwise the old mapping is released, the new one installed
    /// (displacing any other owner), and `is_registered` reflects whether
    /// the install happened — only the empty combination is refused.
    pub fn set_combination(self: &Arc<Self>, new: KeyCombination) {
        let old = {
            let state = lock(&self.state);
            if state.combination == new {
                return;
            }
            state.combination
        };

        self.hooks.changing(old, new);
        lock(&self.state).combination = new;

        self.registry.unregister(self, old);
        let registration = self.registry.register(self, new);
        lock(&self.state).is_registered = registration.installed;

        self.hooks.changed(old, new);
    }

    /// Fire every handler with the current combination.
    ///
    /// Handlers run in subscription order; each runs isolated, so a
    /// panicking handler is logged and the remaining handlers still fire.
    pub fn invoke(&self) {
        let combination = self.combination();
        self.hooks.invoking(combination);

        let snapshot: Vec<Handler> = lock(&self.handlers).clone();
        let event = HotkeyEvent {
            component: self.id,
            combination,
        };
        for handler in snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                log::warn!(
                    "hotkey handler panicked for \"{combination}\"; continuing with remaining handlers"
                );
            }
        }

        self.hooks.invoked(combination);
    }

    /// Clear the combination and release the registry mapping.
    ///
    /// Runs the same covered transition as a displacement; handlers stay
    /// subscribed.
    pub fn reset(self: &Arc<Self>) {
        let current = self.combination();
        if !current.is_empty() {
            self.registry.unregister(self, current);
        }
        self.covered();
    }

    /// The covered transition: clear key state, keep handlers.
    ///
    /// Called by the registry (under its lock) when another component claims
    /// this component's combination — must not call back into the registry.
    pub(crate) fn covered(&self) {
        let old = self.combination();
        self.hooks.covering(old);
        {
            let mut state = lock(&self.state);
            state.combination = KeyCombination::EMPTY;
            state.is_registered = false;
        }
        self.hooks.covered(old);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::combo::{ModifierSet, TriggerSet};
    use crate::keys::{ModifierKey, TriggerKey};

    fn combo(modifier: ModifierKey, trigger: TriggerKey) -> KeyCombination {
        KeyCombination::new(ModifierSet::from(modifier), TriggerSet::from(trigger))
    }

    fn ctrl_a() -> KeyCombination {
        combo(ModifierKey::Ctrl, TriggerKey::A)
    }

    // ── construction ──

    #[test]
    fn new_component_is_empty_and_unregistered() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(registry);
        assert!(component.combination().is_empty());
        assert!(!component.is_registered());
        assert_eq!(component.handler_count(), 0);
        assert_eq!(component.display(), "");
    }

    #[test]
    fn component_ids_are_unique() {
        let registry = Arc::new(HotkeyRegistry::new());
        let a = HotkeyComponent::new(Arc::clone(&registry));
        let b = HotkeyComponent::new(registry);
        assert_ne!(a.id(), b.id());
    }

    // ── set_combination ──

    #[test]
    fn set_combination_registers() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(Arc::clone(&registry));
        component.set_combination(ctrl_a());

        assert!(component.is_registered());
        assert_eq!(component.combination(), ctrl_a());
        assert_eq!(component.display(), "Ctrl + A");
        let owner = registry.owner_of(ctrl_a()).unwrap();
        assert_eq!(owner.id(), component.id());
    }

    #[test]
    fn set_same_combination_is_a_silent_noop() {
        let changing = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&changing);
        let hooks = HotkeyHooks {
            on_changing: Some(Box::new(move |_, _| {
                count.fetch_add(1, Ordering::SeqCst);
            })),
            ..HotkeyHooks::default()
        };
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::with_hooks(registry, hooks);

        component.set_combination(ctrl_a());
        component.set_combination(ctrl_a());
        assert_eq!(changing.load(Ordering::SeqCst), 1, "no-op must not fire hooks");
    }

    #[test]
    fn set_empty_combination_unregisters() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(Arc::clone(&registry));
        component.set_combination(ctrl_a());
        component.set_combination(KeyCombination::EMPTY);

        assert!(!component.is_registered());
        assert!(component.combination().is_empty());
        assert!(registry.owner_of(ctrl_a()).is_none());
    }

    #[test]
    fn changing_combination_moves_the_mapping() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(Arc::clone(&registry));
        let alt_b = combo(ModifierKey::Alt, TriggerKey::B);

        component.set_combination(ctrl_a());
        component.set_combination(alt_b);

        assert!(registry.owner_of(ctrl_a()).is_none());
        assert_eq!(registry.owner_of(alt_b).unwrap().id(), component.id());
        assert!(component.is_registered());
    }

    // ── invoke ──

    #[test]
    fn invoke_runs_handlers_in_subscription_order() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(registry);
        component.set_combination(ctrl_a());

        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in [1, 2, 3] {
            let order = Arc::clone(&order);
            component.on_trigger(move |_| order.lock().unwrap().push(tag));
        }
        component.invoke();
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn invoke_passes_current_combination() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(registry);
        component.set_combination(ctrl_a());

        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        component.on_trigger(move |event| {
            *sink.lock().unwrap() = Some(*event);
        });
        component.invoke();

        let event = seen.lock().unwrap().unwrap();
        assert_eq!(event.combination, ctrl_a());
        assert_eq!(event.component, component.id());
    }

    #[test]
    fn panicking_handler_does_not_stop_the_rest() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(registry);
        component.set_combination(ctrl_a());

        let ran = Arc::new(AtomicUsize::new(0));
        component.on_trigger(|_| panic!("boom"));
        let count = Arc::clone(&ran);
        component.on_trigger(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });

        component.invoke();
        assert_eq!(ran.load(Ordering::SeqCst), 1, "second handler must still run");
    }

    #[test]
    fn invoke_hooks_bracket_handlers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (pre, post) = (Arc::clone(&log), Arc::clone(&log));
        let hooks = HotkeyHooks {
            on_invoking: Some(Box::new(move |_| pre.lock().unwrap().push("invoking"))),
            on_invoked: Some(Box::new(move |_| post.lock().unwrap().push("invoked"))),
            ..HotkeyHooks::default()
        };
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::with_hooks(registry, hooks);
        let handler_log = Arc::clone(&log);
        component.on_trigger(move |_| handler_log.lock().unwrap().push("handler"));

        component.invoke();
        assert_eq!(*log.lock().unwrap(), vec!["invoking", "handler", "invoked"]);
    }

    // ── reset / handlers ──

    #[test]
    fn reset_clears_state_and_mapping_but_keeps_handlers() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(Arc::clone(&registry));
        component.set_combination(ctrl_a());
        component.on_trigger(|_| {});

        component.reset();

        assert!(component.combination().is_empty());
        assert!(!component.is_registered());
        assert!(registry.owner_of(ctrl_a()).is_none());
        assert_eq!(component.handler_count(), 1, "handlers survive a reset");
    }

    #[test]
    fn reset_fires_cover_hooks_with_the_old_combination() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (pre, post) = (Arc::clone(&log), Arc::clone(&log));
        let hooks = HotkeyHooks {
            on_covering: Some(Box::new(move |c| pre.lock().unwrap().push(format!("covering {c}")))),
            on_covered: Some(Box::new(move |c| post.lock().unwrap().push(format!("covered {c}")))),
            ..HotkeyHooks::default()
        };
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::with_hooks(registry, hooks);
        component.set_combination(ctrl_a());
        component.reset();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["covering Ctrl + A", "covered Ctrl + A"]
        );
    }

    #[test]
    fn reset_on_an_empty_component_is_harmless() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(registry);
        component.reset();
        assert!(component.combination().is_empty());
    }

    #[test]
    fn remove_all_handlers_detaches_everything() {
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::new(registry);
        component.on_trigger(|_| {});
        component.on_trigger(|_| {});
        assert_eq!(component.handler_count(), 2);

        component.remove_all_handlers();
        assert_eq!(component.handler_count(), 0);

        // Invoke after removal fires nothing and does not panic
        component.invoke();
    }

    // ── change hooks ──

    #[test]
    fn change_hooks_fire_in_order_with_old_and_new() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (pre, post) = (Arc::clone(&log), Arc::clone(&log));
        let hooks = HotkeyHooks {
            on_changing: Some(Box::new(move |old, new| {
                pre.lock().unwrap().push(format!("changing \"{old}\" -> \"{new}\""));
            })),
            on_changed: Some(Box::new(move |old, new| {
                post.lock().unwrap().push(format!("changed \"{old}\" -> \"{new}\""));
            })),
            ..HotkeyHooks::default()
        };
        let registry = Arc::new(HotkeyRegistry::new());
        let component = HotkeyComponent::with_hooks(registry, hooks);
        component.set_combination(ctrl_a());

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "changing \"\" -> \"Ctrl + A\"",
                "changed \"\" -> \"Ctrl + A\"",
            ]
        );
    }
}
