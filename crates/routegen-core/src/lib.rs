//! Routegen Core Library
//!
//! This library generates a single routes module wiring HTTP requests to
//! controller handlers for a chosen web middleware framework, from
//! pre-resolved controller metadata.

pub mod builders;
pub mod config;
pub mod error;
pub mod generate;
pub mod metadata;
pub mod templates;
pub mod utils;
pub mod writer;

pub use crate::{
    builders::RouteContext,
    config::{GenerationOptions, NoImplicitAdditionalProperties},
    error::{Error, Result},
    generate::{generate, RouteGenerator},
    metadata::Metadata,
    templates::{Helpers, Middleware, PathStyle, TemplateSource, TemplateStrategy},
};
