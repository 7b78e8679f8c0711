//! IDE builders
//!
//! An [`IdeBuilder`] lays out one product for development runs: it records a
//! fingerprint of every module's compiled output and writes the product's
//! classpath file under `out/dev-run/<platform prefix>/`. On each later
//! request [`IdeBuilder::check_changed`] re-fingerprints the modules and
//! rewrites the classpath when anything moved.

pub mod fingerprint;
pub mod registry;

pub use registry::{BuilderFactory, BuilderRegistry};

use crate::cache::Revalidate;
use crate::config::ProductSpec;
use crate::error::{DevBuildError, DevBuildResult};
use chrono::{DateTime, Utc};
use fingerprint::fingerprint_dir;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Run directory root relative to the project home
pub const DEV_RUN_DIR: &str = "out/dev-run";

/// Name of the classpath file written into a product's run directory
pub const CLASSPATH_FILE: &str = "classpath.txt";

/// Everything a factory needs to build a product
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub platform_prefix: &'a str,
    pub spec: &'a ProductSpec,
    pub home: &'a Path,
    pub out_dir: &'a Path,
}

/// Compiled output of one module as last seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleState {
    pub name: String,
    pub dir: PathBuf,
    /// `None` when the output directory does not exist
    pub fingerprint: Option<String>,
}

impl ModuleState {
    fn scan(name: &str, out_dir: &Path) -> DevBuildResult<Self> {
        let dir = out_dir.join(name);
        let fingerprint = fingerprint_dir(&dir)?;
        if fingerprint.is_none() {
            warn!("No compiled output for module {} at {}", name, dir.display());
        }
        Ok(Self {
            name: name.to_string(),
            dir,
            fingerprint,
        })
    }
}

#[derive(Debug)]
struct BuildState {
    modules: Vec<ModuleState>,
    generation: u64,
    check_count: u64,
    last_validated: DateTime<Utc>,
    last_changes: Vec<String>,
}

/// Development layout of a single product
#[derive(Debug)]
pub struct IdeBuilder {
    platform_prefix: String,
    spec: ProductSpec,
    out_dir: PathBuf,
    run_dir: PathBuf,
    state: Mutex<BuildState>,
}

impl IdeBuilder {
    /// Scan every module and write the first classpath file
    pub fn initial_build(ctx: &BuildContext<'_>) -> DevBuildResult<Self> {
        let run_dir = ctx.home.join(DEV_RUN_DIR).join(ctx.platform_prefix);
        fs::create_dir_all(&run_dir).map_err(|e| {
            DevBuildError::io(format!("creating run directory {}", run_dir.display()), e)
        })?;

        let modules = ctx
            .spec
            .modules
            .iter()
            .map(|name| ModuleState::scan(name, ctx.out_dir))
            .collect::<DevBuildResult<Vec<_>>>()?;

        let builder = Self {
            platform_prefix: ctx.platform_prefix.to_string(),
            spec: ctx.spec.clone(),
            out_dir: ctx.out_dir.to_path_buf(),
            run_dir,
            state: Mutex::new(BuildState {
                modules,
                generation: 1,
                check_count: 0,
                last_validated: Utc::now(),
                last_changes: Vec::new(),
            }),
        };
        builder.write_classpath(&builder.state.lock().modules)?;

        info!(
            "Initial build of {} ({}) with {} module(s)",
            builder.platform_prefix,
            builder.spec.class_name,
            builder.spec.modules.len()
        );
        Ok(builder)
    }

    /// Re-scan module output and refresh the layout if anything changed
    ///
    /// Returns the names of changed modules in configuration order.
    pub fn check_changed(&self) -> DevBuildResult<Vec<String>> {
        let mut state = self.state.lock();

        let mut fresh = Vec::with_capacity(state.modules.len());
        let mut changed = Vec::new();
        for old in &state.modules {
            let current = ModuleState::scan(&old.name, &self.out_dir)?;
            if current.fingerprint != old.fingerprint {
                changed.push(old.name.clone());
            }
            fresh.push(current);
        }

        if !changed.is_empty() {
            self.write_classpath(&fresh)?;
            state.modules = fresh;
            state.generation += 1;
            info!(
                "{} changed module(s) in {}: {}",
                changed.len(),
                self.platform_prefix,
                changed.join(", ")
            );
        } else {
            debug!("No changes in {}", self.platform_prefix);
        }

        state.check_count += 1;
        state.last_validated = Utc::now();
        state.last_changes = changed.clone();
        Ok(changed)
    }

    fn write_classpath(&self, modules: &[ModuleState]) -> DevBuildResult<()> {
        let mut content = String::new();
        for module in modules.iter().filter(|m| m.fingerprint.is_some()) {
            content.push_str(&module.dir.to_string_lossy());
            content.push('\n');
        }

        let path = self.classpath_file();
        fs::write(&path, content)
            .map_err(|e| DevBuildError::io(format!("writing {}", path.display()), e))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    pub fn platform_prefix(&self) -> &str {
        &self.platform_prefix
    }

    pub fn spec(&self) -> &ProductSpec {
        &self.spec
    }

    /// Directory holding this product's generated layout
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn classpath_file(&self) -> PathBuf {
        self.run_dir.join(CLASSPATH_FILE)
    }

    /// Bumped each time the classpath file is rewritten, starting at 1
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Number of staleness checks run so far
    pub fn check_count(&self) -> u64 {
        self.state.lock().check_count
    }

    pub fn last_validated(&self) -> DateTime<Utc> {
        self.state.lock().last_validated
    }

    /// Modules reported by the most recent check
    pub fn last_changes(&self) -> Vec<String> {
        self.state.lock().last_changes.clone()
    }

    pub fn module_states(&self) -> Vec<ModuleState> {
        self.state.lock().modules.clone()
    }
}

impl Revalidate for IdeBuilder {
    fn revalidate(&self) -> DevBuildResult<()> {
        self.check_changed().map(|_| ())
    }
}
