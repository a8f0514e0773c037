//! `watch` subcommand — run configured bindings against the OS.
//!
//! Builds one component per binding, registers the OS-representable ones
//! with `global-hotkey`, and pumps fired events through a `DispatchTable`
//! into the registry until Ctrl+C.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use keypool_lib::bridge::DispatchTable;
use keypool_lib::component::HotkeyComponent;
use keypool_lib::registry::HotkeyRegistry;

use super::{KeypoolError, RUNNING, Result};
use crate::keymap;

/// Poll interval for the shutdown flag while waiting for events.
const RECV_TIMEOUT: Duration = Duration::from_millis(200);

pub(super) fn cmd_watch(custom_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(custom_path);
    let (resolved, warnings) = config.resolve();
    for w in &warnings {
        log::warn!("[config] {w}");
    }
    if resolved.is_empty() {
        return Err(KeypoolError::Config("no usable bindings configured".into()));
    }

    let manager = GlobalHotKeyManager::new()
        .map_err(|e| KeypoolError::Config(format!("Failed to init hotkey manager: {e}")))?;
    let registry = Arc::new(HotkeyRegistry::new());
    let mut table = DispatchTable::new();
    let mut components = Vec::new();

    for (name, combo) in resolved {
        let component = HotkeyComponent::new(Arc::clone(&registry));
        component.set_combination(combo);
        let label = name.clone();
        component.on_trigger(move |event| {
            println!("[fired] {label} ({})", event.combination);
        });
        // The registry only holds weak handles — the components must outlive
        // the event loop.
        components.push(component);

        match keymap::to_os_hotkey(combo) {
            Ok(hotkey) => {
                if let Err(e) = manager.register(hotkey) {
                    log::warn!("could not register \"{combo}\" with the OS: {e}");
                } else {
                    table.insert(hotkey.id(), combo);
                    println!("[bound] {name} -> {combo}");
                }
            }
            Err(reason) => log::warn!("{reason}"),
        }
    }

    if table.is_empty() {
        return Err(KeypoolError::Config(
            "no bindings could be registered with the OS".into(),
        ));
    }
    println!("Watching {} binding(s) — Ctrl+C to exit", table.len());

    let receiver = GlobalHotKeyEvent::receiver();
    while RUNNING.load(Ordering::SeqCst) {
        match receiver.recv_timeout(RECV_TIMEOUT) {
            Ok(event) if event.state == HotKeyState::Pressed => {
                table.route(&registry, event.id);
            }
            _ => {}
        }
    }
    Ok(())
}
