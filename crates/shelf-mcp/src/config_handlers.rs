//! Handlers for the `config` subcommands: `path`, `show`, `get` and `init`.

use std::path::{Path, PathBuf};

use crate::config::{PROJECT_NAME, ShelfConfig};
use crate::error::{Error, Result};

/// A `config` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, clap::Subcommand)]
pub enum ConfigAction {
    /// Print the config file path in use
    Path,
    /// Print the effective configuration (secrets masked)
    Show,
    /// Print one value by dotted key, e.g. `database.host`
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the standard location)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a `config` subcommand.
pub fn handle_config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => {
            let config = ShelfConfig::load(config_path)?;
            print!("{}", config.redacted().to_toml_string()?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            let config = ShelfConfig::load(config_path)?;
            println!("{}", config_value(&config.redacted(), &key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file.as_deref().or(config_path), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    let path = ShelfConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME}-mcp config init` to create it)");
    }
    Ok(())
}

/// Write the default configuration to `file` (or the default path).
pub fn cmd_config_init(file: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => p.to_path_buf(),
        None => ShelfConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = ShelfConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Look up a dotted key in the serialized configuration.
pub fn config_value(config: &ShelfConfig, key: &str) -> Result<String> {
    let root = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    let mut current = &root;
    for part in key.split('.') {
        current = current
            .as_table()
            .and_then(|t| t.get(part))
            .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    }
    Ok(match current {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
