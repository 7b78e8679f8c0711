//! Configuration schema for the build server
//!
//! Configuration is stored at `<home>/build/dev-build-server.json`:
//!
//! ```json
//! {
//!   "products": {
//!     "idea": {"modules": ["intellij.idea.community.main"], "class": "IdeaCommunityProperties"}
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Product specs keyed by platform prefix, in document order
    pub products: IndexMap<String, ProductSpec>,
}

/// Modules and implementation class of one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductSpec {
    /// Module names, in classpath order
    #[serde(deserialize_with = "scalar_strings")]
    pub modules: Vec<String>,

    /// Name of the product class selecting the builder factory
    #[serde(rename = "class", deserialize_with = "scalar_string")]
    pub class_name: String,
}

/// Unquoted tokens such as `2024` or `true` are read as their text
fn stringify<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(E::custom(format!("invalid type: {other}, expected a string"))),
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    stringify(Value::deserialize(deserializer)?)
}

fn scalar_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(stringify)
        .collect()
}

/// Names end up as directory components under the project home
fn check_path_segment(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("must not be empty");
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") || name.contains('\0') {
        return Err("must not contain path separators or '..'");
    }
    if name == "." {
        return Err("must not be '.'");
    }
    Ok(())
}

impl ProductSpec {
    pub fn new<I, S>(modules: I, class_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
            class_name: class_name.into(),
        }
    }
}

impl Configuration {
    /// Look up the spec for a platform prefix
    pub fn product(&self, key: &str) -> Option<&ProductSpec> {
        self.products.get(key)
    }

    /// Configured platform prefixes in document order
    pub fn product_keys(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    /// Check constraints serde cannot express, returning the first violation
    pub(crate) fn validate(&self) -> Result<(), String> {
        for (key, spec) in &self.products {
            if key.trim().is_empty() {
                return Err("product key must not be empty".to_string());
            }
            check_path_segment(key).map_err(|why| format!("product key `{key}` {why}"))?;
            if spec.class_name.trim().is_empty() {
                return Err(format!("product `{key}`: `class` must not be empty"));
            }
            for (index, module) in spec.modules.iter().enumerate() {
                if module.trim().is_empty() {
                    return Err(format!("product `{key}`: module #{index} has an empty name"));
                }
                check_path_segment(module)
                    .map_err(|why| format!("product `{key}`: module `{module}` {why}"))?;
            }
        }
        Ok(())
    }
}
