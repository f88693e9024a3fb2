//! Template selection per middleware.
//!
//! A [`TemplateStrategy`] bundles everything that differs between frameworks:
//! the template to render and how route paths are spelled. Strategies come
//! from a lookup table keyed by [`Middleware`]; an explicit template override
//! replaces the template but keeps the framework's path style.

// Internal imports (std, crate)
use std::borrow::Cow;
use std::path::PathBuf;

use super::Middleware;
use crate::config::GenerationOptions;
use crate::utils::convert_braces_path_params;

/// How placeholders in route paths are written for a framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// `/users/:id`
    Colon,
    /// `/users/{id}`, passed through untouched
    Brace,
}

impl PathStyle {
    /// Rewrite a brace-style route path into this style
    pub fn transform(&self, path: &str) -> String {
        match self {
            Self::Colon => convert_braces_path_params(path),
            Self::Brace => path.to_string(),
        }
    }
}

/// Where the template text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template compiled into the library
    Bundled {
        name: &'static str,
        body: &'static str,
    },
    /// User-supplied template file, taken verbatim from the options
    Custom(PathBuf),
}

impl TemplateSource {
    /// Read the template text. Only custom templates touch the filesystem.
    pub async fn load(&self) -> crate::Result<Cow<'static, str>> {
        match self {
            Self::Bundled { body, .. } => Ok(Cow::Borrowed(*body)),
            Self::Custom(path) => {
                log::debug!("Reading custom template: {}", path.display());
                let content = tokio::fs::read_to_string(path).await?;
                Ok(Cow::Owned(content))
            }
        }
    }

    /// Short name for logs
    pub fn describe(&self) -> Cow<'_, str> {
        match self {
            Self::Bundled { name, .. } => Cow::Borrowed(*name),
            Self::Custom(path) => path.to_string_lossy(),
        }
    }
}

/// Framework-specific generation behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStrategy {
    pub middleware: Middleware,
    pub source: TemplateSource,
    pub path_style: PathStyle,
}

const EXPRESS_TEMPLATE: &str = include_str!("../../templates/express/routes.ts.tera");
const KOA_TEMPLATE: &str = include_str!("../../templates/koa/routes.ts.tera");
const HAPI_TEMPLATE: &str = include_str!("../../templates/hapi/routes.ts.tera");

static BUNDLED: [(Middleware, &str, &str, PathStyle); 3] = [
    (Middleware::Express, "express/routes.ts.tera", EXPRESS_TEMPLATE, PathStyle::Colon),
    (Middleware::Koa, "koa/routes.ts.tera", KOA_TEMPLATE, PathStyle::Colon),
    (Middleware::Hapi, "hapi/routes.ts.tera", HAPI_TEMPLATE, PathStyle::Brace),
];

impl TemplateStrategy {
    /// Bundled strategy for a middleware
    pub fn bundled(middleware: Middleware) -> Self {
        let (_, name, body, path_style) = BUNDLED
            .iter()
            .find(|(m, ..)| *m == middleware)
            .copied()
            .unwrap_or(BUNDLED[0]);
        Self {
            middleware,
            source: TemplateSource::Bundled { name, body },
            path_style,
        }
    }

    /// Resolve the strategy for a set of options. Never fails: unknown
    /// middlewares fall back to the default one.
    pub fn resolve(options: &GenerationOptions) -> Self {
        let mut strategy = Self::bundled(Middleware::resolve(&options.middleware));
        if let Some(template) = &options.middleware_template {
            strategy.source = TemplateSource::Custom(PathBuf::from(template));
        }
        log::debug!(
            "Resolved template {} for middleware {}",
            strategy.source.describe(),
            strategy.middleware
        );
        strategy
    }

    pub fn transform_path(&self, path: &str) -> String {
        self.path_style.transform(path)
    }
}
