use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Error, Result, env_subst::substitute_env, schema::FormpostConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "formpost.toml",
    "formpost.yaml",
    "formpost.yml",
    "formpost.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<FormpostConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&substitute_env(&raw), path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./formpost.{toml,yaml,yml,json}`
/// 2. `<user config dir>/formpost/formpost.{toml,yaml,yml,json}`
///
/// Returns `FormpostConfig::default()` if nothing is found or loading fails.
pub fn discover_and_load() -> FormpostConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    FormpostConfig::default()
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILENAMES.iter().map(PathBuf::from);
    let global = config_dir()
        .into_iter()
        .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)));
    local.chain(global).find(|p| p.exists())
}

/// The user-global config directory, e.g. `~/.config/formpost/`.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "formpost").map(|d| d.config_dir().to_path_buf())
}

/// Parse raw config text, picking the format from `path`'s extension.
pub fn parse_config(raw: &str, path: &Path) -> Result<FormpostConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "json" => serde_json::from_str(raw).map_err(|e| Error::parse(path, e)),
        _ => Err(Error::UnsupportedFormat {
            extension: ext.to_string(),
        }),
    }
}
