//! Template selection and rendering

pub mod helpers;
pub mod kind;
pub mod strategy;

pub use helpers::{render, Helpers};
pub use kind::Middleware;
pub use strategy::{PathStyle, TemplateSource, TemplateStrategy};
