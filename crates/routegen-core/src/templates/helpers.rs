//! Render-time helpers and the template render entry point.
//!
//! Helpers are registered on a fresh engine for every render, so two renders
//! with different policies never observe each other's helpers.
//!
//! Templates get:
//! - the `json` filter: `{{ value | json }}` embeds a value as JSON text
//! - the `additional_props` function: `{{ additional_props(schema=model.additionalProperties) }}`
//!   emits a model's extra-property flag

// Internal imports (std, crate)
use std::collections::HashMap;

use crate::config::NoImplicitAdditionalProperties;

// External imports (alphabetized)
use serde::Serialize;
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "routes";

/// Helper table passed into [`render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Helpers {
    policy: NoImplicitAdditionalProperties,
}

impl Helpers {
    pub fn new(policy: NoImplicitAdditionalProperties) -> Self {
        Self { policy }
    }

    /// JSON text of an arbitrary value
    pub fn serialize(value: &JsonValue) -> String {
        // a serde_json::Value always serializes
        value.to_string()
    }

    /// Extra-property flag for a model. An explicit schema is emitted as
    /// declared; otherwise the global policy decides.
    pub fn additional_props(&self, explicit: &JsonValue) -> String {
        if is_truthy(explicit) {
            return Self::serialize(explicit);
        }
        Self::serialize(&JsonValue::Bool(self.policy.allows_extras()))
    }

    fn install(self, tera: &mut Tera) {
        tera.register_filter(
            "json",
            |value: &JsonValue, _: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
                Ok(JsonValue::String(Helpers::serialize(value)))
            },
        );
        tera.register_function(
            "additional_props",
            move |args: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
                let schema = args.get("schema").unwrap_or(&JsonValue::Null);
                Ok(JsonValue::String(self.additional_props(schema)))
            },
        );
    }
}

/// Same notion of "present" as the generated runtime: null, false, 0 and ""
/// count as absent.
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Compile `template` and render it against `context` with `helpers`.
///
/// Output is not escaped: the result is source code, not markup.
pub fn render<C: Serialize>(template: &str, context: &C, helpers: &Helpers) -> crate::Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    helpers.install(&mut tera);

    tera.add_raw_template(TEMPLATE_NAME, template)?;
    let context = Context::from_serialize(context)?;

    match tera.render(TEMPLATE_NAME, &context) {
        Ok(content) => Ok(content),
        Err(e) => {
            log::error!("Template rendering failed: {:?}", e);
            log::error!(
                "Available context keys: {:?}",
                context
                    .clone()
                    .into_json()
                    .as_object()
                    .map(|obj| obj.keys().cloned().collect::<Vec<_>>())
                    .unwrap_or_default()
            );
            Err(e.into())
        }
    }
}
