//! `config` subcommand — show bindings and their validation state.

use std::path::Path;

use super::{BindingsConfig, ConfigOutput, Result, kv, kv_width};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(custom_path);
    let config_path = custom_path
        .map(|p| p.to_path_buf())
        .or_else(BindingsConfig::path);
    let config_exists = config_path.as_ref().map(|p| p.exists()).unwrap_or(false);

    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            bindings: config.bindings.clone(),
            problems,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| super::KeypoolError::Config(e.to_string()))?
        );
        return Ok(());
    }

    let w = kv_width(&["Config file:"]);
    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    if config.bindings.is_empty() {
        println!("No bindings configured.");
    } else {
        println!("Bindings:");
        let name_w = kv_width(
            &config
                .bindings
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>(),
        );
        for (name, combo) in &config.bindings {
            match combo.parse::<super::KeyCombination>() {
                Ok(parsed) => println!("  {name:<name_w$}{parsed}"),
                Err(e) => println!("  {name:<name_w$}\"{combo}\" (invalid: {e})"),
            }
        }
    }

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}
