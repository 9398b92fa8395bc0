//! Encoder configuration: boundary, default field name and extra content types.
//!
//! Config files: `formpost.toml`, `formpost.yaml` or `formpost.json`,
//! searched in `./` then the user config directory.
//!
//! `${ENV_VAR}` and `${ENV_VAR:-default}` are substituted before parsing.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{config_dir, discover_and_load, find_config_file, load_config, parse_config},
    schema::FormpostConfig,
};
