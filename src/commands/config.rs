//! Config subcommands handler

use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::Command;

use anyhow::{Context, Result};

use cueplay::cli::ConfigCommands;
use cueplay::config::{migrate_config, MigrateResult};
use cueplay::theme::Theme;
use cueplay::{current_theme, Config};

pub fn handle(command: &ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show => handle_show(config),
        ConfigCommands::Edit => handle_edit(),
        ConfigCommands::Migrate { yes } => handle_migrate(*yes),
    }
}

/// Print the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
fn handle_show(config: &Config) -> Result<()> {
    let path = Config::config_path()?;
    let theme = current_theme();
    println!("{}", theme.secondary_text(&format!("# {}", path.display())));
    println!("{}", theme.primary_text(&toml::to_string_pretty(config)?));
    Ok(())
}

/// Open the config file in `$EDITOR` (default `vi`), creating it first.
#[cfg(not(tarpaulin_include))]
fn handle_edit() -> Result<()> {
    let path = Config::config_path()?;
    if !path.exists() {
        Config::default().save_to(&path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        current_theme().primary_text(&format!("Opening {} with {}", path.display(), editor))
    );
    Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to open editor '{}'", editor))?;
    Ok(())
}

/// Add fields missing from the config file, after showing what changes.
#[cfg(not(tarpaulin_include))]
fn handle_migrate(yes: bool) -> Result<()> {
    let theme = current_theme();
    let path = Config::config_path()?;
    let exists = path.exists();
    let content = if exists {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;
    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    let question = if exists {
        println!("{}", theme.primary_text(&summary(&result)));
        format!("Apply these changes to {}?", path.display())
    } else {
        println!(
            "{}",
            theme.primary_text("Config file does not exist. Will create it with defaults.")
        );
        format!("Create {}?", path.display())
    };
    println!();
    for line in diff_preview(&result.content, &result.added_fields, !exists, &theme) {
        println!("{}", line);
    }
    println!();

    if !yes && !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &result.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{}", theme.success_text("Config updated."));
    Ok(())
}

fn summary(result: &MigrateResult) -> String {
    match result.sections_added.len() {
        0 => format!("Found {} missing field(s):", result.added_fields.len()),
        sections => format!(
            "Found {} missing field(s) in {} new section(s):",
            result.added_fields.len(),
            sections
        ),
    }
}

/// Lines of `content` that were added, prefixed with `+`, under their
/// section headers. A new file shows every non-empty line.
fn diff_preview(
    content: &str,
    added_fields: &[String],
    new_file: bool,
    theme: &Theme,
) -> Vec<String> {
    let added: HashSet<&str> = added_fields.iter().map(String::as_str).collect();
    let mut lines = Vec::new();
    let mut section = String::new();
    let mut pending_header: Option<&str> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].to_string();
            pending_header = Some(line);
            continue;
        }

        let is_added = match trimmed.split_once('=') {
            Some((key, _)) => added.contains(format!("{}.{}", section, key.trim()).as_str()),
            None => false,
        };
        if !(new_file || is_added) {
            continue;
        }
        if let Some(header) = pending_header.take() {
            let section_is_new = new_file
                || !content_has_other_fields(content, &section, &added);
            if section_is_new {
                lines.push(theme.success_text(&format!("+ {}", header)));
            } else {
                lines.push(format!("  {}", header));
            }
        }
        lines.push(theme.success_text(&format!("+ {}", line)));
    }
    lines
}

/// Whether `section` holds a field that was already present.
fn content_has_other_fields(content: &str, section: &str, added: &HashSet<&str>) -> bool {
    let mut current = "";
    content.lines().map(str::trim).any(|line| {
        if line.starts_with('[') && line.ends_with(']') {
            current = &line[1..line.len() - 1];
            return false;
        }
        current == section
            && line
                .split_once('=')
                .map(|(key, _)| !added.contains(format!("{}.{}", section, key.trim()).as_str()))
                .unwrap_or(false)
    })
}

/// Ask a yes/no question. Non-interactive stdin counts as no.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();
    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to apply changes")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
