//! Configuration management for route generation.
//!
//! This module defines [`GenerationOptions`], the option bag a generator is
//! constructed with, and [`NoImplicitAdditionalProperties`], the validation
//! policy emitted for models that do not declare their own extra-property
//! schema. Options can be built programmatically or loaded from a YAML, JSON
//! or TOML file.
//!
//! # Examples
//!
//! ```no_run
//! use routegen_core::config::{GenerationOptions, NoImplicitAdditionalProperties};
//!
//! # #[tokio::main]
//! # async fn main() -> routegen_core::Result<()> {
//! let mut options = GenerationOptions::new("src/generated");
//! options.middleware = "koa".to_string();
//! options.no_implicit_additional_properties = NoImplicitAdditionalProperties::ThrowOnExtras;
//!
//! // Or load from a config file
//! let options = GenerationOptions::from_file("routegen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Default output file name when `routesFileName` is not set.
pub const DEFAULT_ROUTES_FILE_NAME: &str = "routes.ts";

/// How generated validation treats properties a model does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoImplicitAdditionalProperties {
    /// Strip undeclared properties during validation
    SilentlyRemoveExtras,
    /// Reject payloads carrying undeclared properties
    ThrowOnExtras,
    /// Let undeclared properties through untouched
    #[default]
    Ignore,
}

impl NoImplicitAdditionalProperties {
    /// Whether a model without its own `additionalProperties` accepts extras.
    pub fn allows_extras(self) -> bool {
        match self {
            Self::SilentlyRemoveExtras => false,
            Self::ThrowOnExtras => false,
            Self::Ignore => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SilentlyRemoveExtras => "silently-remove-extras",
            Self::ThrowOnExtras => "throw-on-extras",
            Self::Ignore => "ignore",
        }
    }
}

impl FromStr for NoImplicitAdditionalProperties {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "silently-remove-extras" => Ok(Self::SilentlyRemoveExtras),
            "throw-on-extras" => Ok(Self::ThrowOnExtras),
            "ignore" => Ok(Self::Ignore),
            _ => Err(format!(
                "Unknown noImplicitAdditionalProperties value: {} (expected silently-remove-extras, throw-on-extras or ignore)",
                s
            )),
        }
    }
}

impl fmt::Display for NoImplicitAdditionalProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for a single route generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Target framework identifier (express, koa, hapi). Unknown values fall
    /// back to express.
    #[serde(default = "default_middleware")]
    pub middleware: String,

    /// Path to a template file used instead of the framework's bundled one
    #[serde(default)]
    pub middleware_template: Option<String>,

    /// Directory the routes file is written to; must already exist
    pub routes_dir: PathBuf,

    /// Output file name inside `routes_dir` (defaults to `routes.ts`)
    #[serde(default)]
    pub routes_file_name: Option<String>,

    /// Emit ES module imports and accept `.mts`/`.cts` output names
    #[serde(default)]
    pub esm: bool,

    /// Extra-property policy for models without an explicit schema
    #[serde(default)]
    pub no_implicit_additional_properties: NoImplicitAdditionalProperties,

    /// Skip writing when the rendered content matches the file on disk
    #[serde(default = "default_true")]
    pub no_write_if_unchanged: bool,

    /// Prefix for every registered route
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Module exporting the IoC container used to resolve controllers
    #[serde(default)]
    pub ioc_module: Option<String>,

    /// Module exporting the authentication middleware
    #[serde(default)]
    pub authentication_module: Option<String>,
}

impl GenerationOptions {
    /// Create options targeting `routes_dir` with every other field defaulted
    pub fn new(routes_dir: impl Into<PathBuf>) -> Self {
        Self {
            middleware: default_middleware(),
            middleware_template: None,
            routes_dir: routes_dir.into(),
            routes_file_name: None,
            esm: false,
            no_implicit_additional_properties: NoImplicitAdditionalProperties::default(),
            no_write_if_unchanged: true,
            base_path: default_base_path(),
            ioc_module: None,
            authentication_module: None,
        }
    }

    /// Load options from a file; `.toml` files are read as TOML, anything
    /// else as YAML (which also covers JSON).
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let options = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        log::debug!("Loaded generation options from {}", path.display());
        Ok(options)
    }

    /// Save options to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            toml::to_string(self).map_err(|e| crate::Error::config(e.to_string()))?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// The output file name, falling back to the default
    pub fn routes_file_name(&self) -> &str {
        self.routes_file_name
            .as_deref()
            .unwrap_or(DEFAULT_ROUTES_FILE_NAME)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("toml")
}

fn default_middleware() -> String {
    "express".to_string()
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}
