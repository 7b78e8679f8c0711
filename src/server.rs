//! Build server: product configuration plus a cache of IDE builders
//!
//! Construction is two-phase. The configuration is loaded (and fails) on its
//! own; [`BuildServer::new`] only accepts an already parsed [`Configuration`].

use crate::builder::{BuildContext, BuilderRegistry, IdeBuilder};
use crate::cache::KeyedCache;
use crate::config::{self, Configuration, ConfigManager};
use crate::error::{DevBuildError, DevBuildResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Compiled module output relative to the project home
pub const OUTPUT_RELATIVE_PATH: &str = "out/classes/production";

/// Serves IDE builders keyed by platform prefix
#[derive(Debug)]
pub struct BuildServer {
    home: PathBuf,
    out_dir: PathBuf,
    configuration: Configuration,
    registry: BuilderRegistry,
    builders: KeyedCache<IdeBuilder>,
}

impl BuildServer {
    /// Create a server over an already loaded configuration
    ///
    /// Fails when the output directory does not exist.
    pub fn new(
        home: impl Into<PathBuf>,
        configuration: Configuration,
        registry: BuilderRegistry,
    ) -> DevBuildResult<Self> {
        let home = home.into();
        let out_dir = home.join(OUTPUT_RELATIVE_PATH);
        let out_dir = out_dir.canonicalize().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DevBuildError::OutputDirMissing(out_dir.clone())
            } else {
                DevBuildError::io(format!("resolving {}", out_dir.display()), e)
            }
        })?;

        debug!("Output directory: {}", out_dir.display());
        Ok(Self {
            home,
            out_dir,
            configuration,
            registry,
            builders: KeyedCache::new(),
        })
    }

    /// Load `<home>/build/dev-build-server.json` and create a standard server
    pub fn open(home: &Path) -> DevBuildResult<Self> {
        let configuration = ConfigManager::for_home(home).load()?;
        Self::new(home, configuration, BuilderRegistry::standard())
    }

    /// Return the builder for a platform prefix, building it on first use
    ///
    /// Existing builders are checked for changed module output before being
    /// returned. All callers serialize on one lock, including the check, so a
    /// registered factory must not call back into this method.
    pub fn check_or_create_ide_builder(
        &self,
        platform_prefix: &str,
    ) -> DevBuildResult<Arc<IdeBuilder>> {
        self.builders.get_or_create(platform_prefix, || {
            let spec = self
                .configuration
                .product(platform_prefix)
                .ok_or_else(|| DevBuildError::ConfigurationMissing {
                    key: platform_prefix.to_string(),
                    config_file: config::CONFIG_FILE_NAME.to_string(),
                })?;

            info!("Creating IDE builder for {}", platform_prefix);
            self.registry.build(&BuildContext {
                platform_prefix,
                spec,
                home: &self.home,
                out_dir: &self.out_dir,
            })
        })
    }

    /// Project home the server was opened on
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Real path of the compiled module output
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Platform prefixes that already have a builder
    pub fn active_prefixes(&self) -> Vec<String> {
        self.builders.keys()
    }
}
