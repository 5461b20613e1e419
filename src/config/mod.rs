// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{apply_env_overrides, load_config, load_from_file};
pub use settings::{Config, DEFAULT_MODEL};
