//! Per-controller and per-action context.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::GenerationOptions;
use crate::metadata::{Controller, Method, Parameter, ParameterIn, TypeSchema};
use crate::templates::TemplateStrategy;
use crate::utils::{normalise_path, relative_import_path};

/// Parameter schema as consumed by the generated argument validation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterContext {
    #[serde(rename = "in")]
    pub in_: ParameterIn,
    pub name: String,
    pub required: bool,
    #[serde(flatten)]
    pub schema: TypeSchema,
}

impl From<&Parameter> for ParameterContext {
    fn from(p: &Parameter) -> Self {
        Self {
            in_: p.in_,
            name: p.name.clone(),
            required: p.required,
            schema: p.type_.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContext {
    /// Base, controller and method path joined, with a single leading `/`
    pub full_path: String,
    /// Lower-case HTTP verb
    pub method: String,
    /// Handler method name on the controller
    pub name: String,
    /// Handler arguments keyed by parameter name
    pub parameters: BTreeMap<String, ParameterContext>,
    /// Method path relative to the controller
    pub path: String,
    pub security: Vec<BTreeMap<String, Vec<String>>>,
    /// Status code literal, or `undefined` to let the runtime pick
    pub success_status: String,
}

impl ActionContext {
    pub fn build(
        method: &Method,
        base_path: &str,
        controller_path: &str,
        strategy: &TemplateStrategy,
    ) -> Self {
        let path = strategy.transform_path(&normalise_path(&method.path, "/", "", true));
        let full_path = normalise_path(
            &format!("{base_path}{controller_path}{path}"),
            "/",
            "",
            false,
        );

        Self {
            full_path,
            method: method.method.as_str().to_string(),
            name: method.name.clone(),
            parameters: method
                .parameters
                .iter()
                .map(|p| (p.parameter_name.clone(), ParameterContext::from(p)))
                .collect(),
            path,
            security: method.security.clone(),
            success_status: method
                .success_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "undefined".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerContext {
    pub actions: Vec<ActionContext>,
    /// Import specifier of the controller relative to the routes file
    pub module_path: String,
    pub name: String,
    /// Normalised, transformed controller prefix
    pub path: String,
}

impl ControllerContext {
    pub fn build(
        controller: &Controller,
        base_path: &str,
        options: &GenerationOptions,
        strategy: &TemplateStrategy,
    ) -> Self {
        let path = strategy.transform_path(&normalise_path(&controller.path, "/", "", true));
        let actions = controller
            .methods
            .iter()
            .map(|method| ActionContext::build(method, base_path, &path, strategy))
            .collect();

        Self {
            actions,
            module_path: relative_import_path(&options.routes_dir, &controller.location, options.esm),
            name: controller.name.clone(),
            path,
        }
    }
}
