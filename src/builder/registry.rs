//! Product class to builder factory mapping
//!
//! The configuration names a product class for every platform prefix. The
//! registry turns that name into a factory; classes without an explicit
//! registration use the fallback, which for [`BuilderRegistry::standard`] is
//! [`IdeBuilder::initial_build`].

use super::{BuildContext, IdeBuilder};
use crate::error::{DevBuildError, DevBuildResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds an [`IdeBuilder`] for one product
pub type BuilderFactory =
    Arc<dyn Fn(&BuildContext<'_>) -> DevBuildResult<IdeBuilder> + Send + Sync>;

/// Factories keyed by product class name
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    factories: HashMap<String, BuilderFactory>,
    fallback: Option<BuilderFactory>,
}

impl BuilderRegistry {
    /// Registry with no factories and no fallback
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that builds every class with [`IdeBuilder::initial_build`]
    pub fn standard() -> Self {
        Self::new().with_fallback(IdeBuilder::initial_build)
    }

    /// Set the factory used for classes without a registration
    pub fn with_fallback<F>(mut self, factory: F) -> Self
    where
        F: Fn(&BuildContext<'_>) -> DevBuildResult<IdeBuilder> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(factory));
        self
    }

    /// Register a factory for a product class, replacing any previous one
    pub fn register<F>(&mut self, class_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&BuildContext<'_>) -> DevBuildResult<IdeBuilder> + Send + Sync + 'static,
    {
        self.factories.insert(class_name.into(), Arc::new(factory));
        self
    }

    /// Factory for a class name, falling back when unregistered
    pub fn resolve(&self, class_name: &str) -> Option<&BuilderFactory> {
        self.factories.get(class_name).or(self.fallback.as_ref())
    }

    /// Build the product described by `ctx`
    pub fn build(&self, ctx: &BuildContext<'_>) -> DevBuildResult<IdeBuilder> {
        let class_name = &ctx.spec.class_name;
        let factory =
            self.resolve(class_name)
                .ok_or_else(|| DevBuildError::UnknownProductClass {
                    class: class_name.clone(),
                    key: ctx.platform_prefix.to_string(),
                })?;

        debug!(
            "Building {} with factory for {}",
            ctx.platform_prefix, class_name
        );
        factory(ctx)
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes: Vec<_> = self.factories.keys().collect();
        classes.sort();
        f.debug_struct("BuilderRegistry")
            .field("classes", &classes)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
