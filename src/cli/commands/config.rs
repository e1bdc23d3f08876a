use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config, missing_fields};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("📄 Current configuration:\n");
            println!("{}", yaml);
        }

        if *check {
            check_config(&path)?;
        }

        if *migrate {
            if !path.exists() {
                warning(format!("Config file not found: {}", path.display()));
            } else {
                let added = migrate_config(&path)?;
                if added.is_empty() {
                    info("Configuration is up to date.");
                } else {
                    success(format!("Added missing fields: {}", added.join(", ")));
                }
            }
        }

        if *edit_config {
            edit_file(&path, editor.clone());
        }
    }

    Ok(())
}

fn check_config(path: &Path) -> AppResult<()> {
    if !path.exists() {
        warning(format!("Config file not found: {}", path.display()));
        return Ok(());
    }

    let missing = missing_fields(path)?;
    if missing.is_empty() {
        success("Configuration file is complete.");
    } else {
        warning(format!("Missing fields: {}", missing.join(", ")));
        info("Run `worktimer config --migrate` to add them with default values.");
    }
    Ok(())
}

fn edit_file(path: &Path, requested: Option<String>) {
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{}'",
                editor_to_use
            ));
        }
        _ => {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            ));

            match Command::new(&default_editor).arg(path).status() {
                Ok(s) if s.success() => success(format!(
                    "Configuration file edited successfully using fallback '{}'",
                    default_editor
                )),
                _ => crate::ui::messages::error(format!(
                    "Failed to edit configuration file using fallback '{}'",
                    default_editor
                )),
            }
        }
    }
}
