//! Render context built from controller metadata.
//!
//! This is the data every routes template consumes. Paths are normalised and
//! run through the active strategy's path transform here, so templates can
//! emit them as-is.
pub mod action;

pub use action::{ActionContext, ControllerContext, ParameterContext};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{GenerationOptions, NoImplicitAdditionalProperties};
use crate::metadata::{Metadata, ReferenceType};
use crate::templates::TemplateStrategy;
use crate::utils::normalise_path;

/// Validation settings forwarded to the generated runtime
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalSwaggerConfig {
    pub no_implicit_additional_properties: NoImplicitAdditionalProperties,
}

/// Top-level context handed to the routes template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteContext {
    /// Module exporting the authentication middleware
    pub authentication_module: Option<String>,
    /// Normalised base path, always with a leading `/`
    pub base_path: String,
    pub controllers: Vec<ControllerContext>,
    pub esm: bool,
    /// Module exporting the IoC container
    pub ioc_module: Option<String>,
    pub minimal_swagger_config: MinimalSwaggerConfig,
    /// Reference types keyed by name
    pub models: BTreeMap<String, ReferenceType>,
    /// Whether any action declares security requirements
    pub use_security: bool,
}

impl RouteContext {
    pub fn build(
        metadata: &Metadata,
        options: &GenerationOptions,
        strategy: &TemplateStrategy,
    ) -> Self {
        let base_path = normalise_path(&options.base_path, "/", "", false);

        let controllers: Vec<ControllerContext> = metadata
            .controllers
            .iter()
            .map(|controller| ControllerContext::build(controller, &base_path, options, strategy))
            .collect();

        let use_security = controllers
            .iter()
            .flat_map(|c| &c.actions)
            .any(|a| !a.security.is_empty());

        log::debug!(
            "Built route context: {} controllers, {} models",
            controllers.len(),
            metadata.reference_types.len()
        );

        Self {
            authentication_module: options.authentication_module.clone(),
            base_path,
            controllers,
            esm: options.esm,
            ioc_module: options.ioc_module.clone(),
            minimal_swagger_config: MinimalSwaggerConfig {
                no_implicit_additional_properties: options.no_implicit_additional_properties,
            },
            models: metadata.reference_types.clone(),
            use_security,
        }
    }
}
