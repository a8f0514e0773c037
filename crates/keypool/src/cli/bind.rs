//! `bind` / `unbind` subcommands — edit the bindings file.

use std::path::Path;

use super::{BindingsConfig, KeyCombination, KeypoolError, Result};

/// Save to the custom path if given, else the platform default.
fn save(config: &BindingsConfig, custom_path: Option<&Path>) -> Result<()> {
    match custom_path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    Ok(())
}

pub(super) fn cmd_bind(name: &str, combo_text: &str, custom_path: Option<&Path>) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(KeypoolError::Config("binding name cannot be empty".into()));
    }
    // Parse up front so the file never holds an unusable combination
    let combo: KeyCombination = combo_text.parse()?;

    let mut config = super::load_config(custom_path);
    if let Some((other, _)) = config
        .bindings
        .iter()
        .filter(|(n, _)| n.as_str() != name)
        .find(|(_, text)| {
            text.parse::<KeyCombination>()
                .is_ok_and(|c| c.encode() == combo.encode())
        })
    {
        log::warn!("\"{combo}\" is also bound to \"{other}\" — the later registration will win");
    }

    let replaced = config
        .bindings
        .insert(name.to_string(), combo.to_string())
        .is_some();
    save(&config, custom_path)?;

    if replaced {
        println!("Replaced binding \"{name}\" -> {combo}");
    } else {
        println!("Added binding \"{name}\" -> {combo}");
    }
    Ok(())
}

pub(super) fn cmd_unbind(name: &str, custom_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(custom_path);
    if config.bindings.remove(name).is_none() {
        return Err(KeypoolError::Config(format!("no binding named \"{name}\"")));
    }
    save(&config, custom_path)?;
    println!("Removed binding \"{name}\"");
    Ok(())
}
