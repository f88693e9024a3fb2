//! Controller metadata consumed by the route generator.
//!
//! The metadata is produced upstream (by whatever parses controller sources)
//! and handed over fully resolved. It is never mutated here.
//!
//! # Examples
//!
//! ```no_run
//! use routegen_core::metadata::Metadata;
//!
//! # #[tokio::main]
//! # async fn main() -> routegen_core::Result<()> {
//! let metadata = Metadata::from_file("metadata.json").await?;
//! for controller in &metadata.controllers {
//!     println!("{} ({} methods)", controller.name, controller.methods.len());
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::fs;

/// Root of the controller metadata tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub controllers: Vec<Controller>,
    /// Named model types referenced from parameters
    #[serde(default)]
    pub reference_types: BTreeMap<String, ReferenceType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    /// Exported class name
    pub name: String,
    /// Source file declaring the controller
    pub location: String,
    /// Route prefix for every method of the controller
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub success_status: Option<u16>,
    /// Alternative security requirements: scheme name -> scopes
    #[serde(default)]
    pub security: Vec<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a handler argument is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterIn {
    #[serde(rename = "path")]
    Path,
    #[serde(rename = "query")]
    Query,
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "body-prop")]
    BodyProp,
    #[serde(rename = "formData")]
    FormData,
    #[serde(rename = "request")]
    Request,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Name of the handler argument
    pub parameter_name: String,
    /// Name on the wire (path segment, query key, header...)
    pub name: String,
    #[serde(rename = "in")]
    pub in_: ParameterIn,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type")]
    pub type_: TypeSchema,
}

/// Type description shared by parameters and model properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSchema {
    pub data_type: String,
    /// Name of a reference type when `data_type` refers to a model
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    /// Element type for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Box<TypeSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enums: Option<Vec<JsonValue>>,
}

impl TypeSchema {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            ref_name: None,
            array: None,
            enums: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(flatten)]
    pub schema: TypeSchema,
    #[serde(default)]
    pub required: bool,
}

/// A named model, tagged by `dataType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType")]
pub enum ReferenceType {
    #[serde(rename = "refObject")]
    Object {
        #[serde(default)]
        properties: BTreeMap<String, PropertySchema>,
        /// Explicit extra-property schema; `None` defers to the global policy
        #[serde(default, rename = "additionalProperties")]
        additional_properties: Option<JsonValue>,
    },
    #[serde(rename = "refEnum")]
    Enum { enums: Vec<JsonValue> },
    #[serde(rename = "refAlias")]
    Alias {
        #[serde(rename = "type")]
        type_: TypeSchema,
    },
}

impl Metadata {
    /// Load metadata from a JSON or YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            crate::Error::metadata(format!(
                "Failed to parse metadata at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        // Try to parse as JSON first
        let json_err = match serde_json::from_str(content) {
            Ok(metadata) => return Ok(metadata),
            Err(e) => e,
        };

        // If JSON parsing fails, try YAML
        serde_yaml::from_str(content)
            .map_err(|yaml_err| format!("not valid JSON ({}) nor YAML ({})", json_err, yaml_err))
    }

    /// Total number of methods across all controllers
    pub fn method_count(&self) -> usize {
        self.controllers.iter().map(|c| c.methods.len()).sum()
    }
}
