//! `check` subcommand — parse a combination and print its canonical form.

use keypool_lib::keys::{ModifierKey, TriggerKey};

use super::{CheckOutput, KeyCombination, KeypoolError, Result, kv, kv_width};

pub(super) fn cmd_check(input: &str, json: bool) -> Result<()> {
    let combo: KeyCombination = input.parse()?;

    let modifiers: Vec<String> = combo
        .modifiers
        .iter()
        .map(|m| ModifierKey::label(m).to_string())
        .collect();
    let triggers: Vec<String> = combo
        .triggers
        .iter()
        .map(|t| TriggerKey::label(t).to_string())
        .collect();

    if json {
        let output = CheckOutput {
            input: input.to_string(),
            canonical: combo.to_string(),
            code: combo.encode(),
            modifiers,
            triggers,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).map_err(|e| KeypoolError::Config(e.to_string()))?
        );
        return Ok(());
    }

    let w = kv_width(&["Canonical:", "Code:", "Modifiers:", "Triggers:"]);
    kv("Canonical:", &combo, w);
    kv("Code:", format_args!("{:#x}", combo.encode()), w);
    kv("Modifiers:", modifiers.join(", "), w);
    kv("Triggers:", triggers.join(", "), w);
    Ok(())
}
