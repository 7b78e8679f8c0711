//! Configuration loading for the build server
//!
//! The product configuration is read once, before any builder exists. A file
//! that cannot be parsed is reported as [`DevBuildError::MalformedConfig`]
//! immediately instead of surfacing on the first builder request.

pub mod lenient;
pub mod schema;

pub use schema::{Configuration, ProductSpec};

use crate::error::{DevBuildError, DevBuildResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the product configuration
pub const CONFIG_FILE_NAME: &str = "dev-build-server.json";

/// Config file location relative to the project home
pub const CONFIG_RELATIVE_PATH: &str = "build/dev-build-server.json";

/// Load and validate a configuration file
pub fn load(path: &Path) -> DevBuildResult<Configuration> {
    let content = fs::read_to_string(path)
        .map_err(|e| DevBuildError::io(format!("reading config from {}", path.display()), e))?;

    let config = parse(&content, path)?;
    info!(
        "Loaded {} product(s) from {}",
        config.products.len(),
        path.display()
    );
    Ok(config)
}

/// Parse configuration text, attributing errors to `path`
pub fn parse(content: &str, path: &Path) -> DevBuildResult<Configuration> {
    let strict = lenient::normalize(content)
        .map_err(|e| DevBuildError::malformed(path, e.to_string()))?;

    let config: Configuration =
        serde_json::from_str(&strict).map_err(|e| DevBuildError::malformed(path, e.to_string()))?;

    config
        .validate()
        .map_err(|reason| DevBuildError::malformed(path, reason))?;

    debug!(
        "Parsed configuration with products: {:?}",
        config.product_keys().collect::<Vec<_>>()
    );
    Ok(config)
}

impl std::str::FromStr for Configuration {
    type Err = DevBuildError;

    fn from_str(content: &str) -> DevBuildResult<Self> {
        parse(content, Path::new(CONFIG_FILE_NAME))
    }
}

impl Configuration {
    /// Load a configuration file, see [`load`]
    pub fn load(path: &Path) -> DevBuildResult<Self> {
        load(path)
    }
}

/// Resolves where the configuration lives
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Config manager for the default location under a project home
    pub fn for_home(home: &Path) -> Self {
        Self {
            config_path: Self::default_config_path(home),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path for a project home
    pub fn default_config_path(home: &Path) -> PathBuf {
        home.join(CONFIG_RELATIVE_PATH)
    }

    /// Load the configuration this manager points at
    pub fn load(&self) -> DevBuildResult<Configuration> {
        load(&self.config_path)
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
