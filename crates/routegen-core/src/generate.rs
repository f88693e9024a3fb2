//! Route generation entry points.
//!
//! [`RouteGenerator`] resolves its [`TemplateStrategy`] once at construction
//! and then renders and writes the routes file on demand.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::{
    builders::RouteContext,
    config::GenerationOptions,
    error::Result,
    metadata::Metadata,
    templates::{render, Helpers, TemplateStrategy},
    writer,
};

/// Generates a routes module for one metadata set and one set of options
#[derive(Debug, Clone)]
pub struct RouteGenerator {
    metadata: Metadata,
    options: GenerationOptions,
    strategy: TemplateStrategy,
}

impl RouteGenerator {
    pub fn new(metadata: Metadata, options: GenerationOptions) -> Self {
        let strategy = TemplateStrategy::resolve(&options);
        Self {
            metadata,
            options,
            strategy,
        }
    }

    pub fn strategy(&self) -> &TemplateStrategy {
        &self.strategy
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Rewrite a route path the way the selected framework expects it
    pub fn transform_path(&self, path: &str) -> String {
        self.strategy.transform_path(path)
    }

    /// Render `template` against this generator's metadata and options
    pub fn build_content(&self, template: &str) -> Result<String> {
        let context = RouteContext::build(&self.metadata, &self.options, &self.strategy);
        let helpers = Helpers::new(self.options.no_implicit_additional_properties);
        render(template, &context, &helpers)
    }

    /// Generate with the resolved template. Returns whether the routes file
    /// was written.
    pub async fn generate(&self) -> Result<bool> {
        let (_, written) = self.generate_file().await?;
        Ok(written)
    }

    /// Like [`generate`](Self::generate), but also returns the path of the
    /// routes file.
    pub async fn generate_file(&self) -> Result<(PathBuf, bool)> {
        let target = writer::target_path(&self.options).await?;
        let template = self.strategy.source.load().await?;
        let written = self.render_and_write(&target, &template).await?;
        Ok((target, written))
    }

    /// Generate with an explicit template source. Returns whether the routes
    /// file was written.
    pub async fn generate_with_template(&self, template: &str) -> Result<bool> {
        let target = writer::target_path(&self.options).await?;
        self.render_and_write(&target, template).await
    }

    async fn render_and_write(&self, target: &Path, template: &str) -> Result<bool> {
        log::debug!(
            "Generating {} routes for {} controllers into {}",
            self.strategy.middleware,
            self.metadata.controllers.len(),
            target.display()
        );
        let content = self.build_content(template)?;
        writer::write_if_changed(target, &content, self.options.no_write_if_unchanged).await
    }
}

/// Main entry point: load metadata from `metadata_path` and generate routes
pub async fn generate(metadata_path: impl AsRef<Path>, options: GenerationOptions) -> Result<bool> {
    let metadata = Metadata::from_file(metadata_path).await?;
    RouteGenerator::new(metadata, options).generate().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoImplicitAdditionalProperties;
    use crate::metadata::{
        Controller, HttpMethod, Method, Parameter, ParameterIn, PropertySchema, ReferenceType,
        TypeSchema,
    };
    use crate::templates::{Middleware, PathStyle, TemplateSource};
    use serde_json::json;
    use std::collections::BTreeMap;
    use tempfile::{tempdir, TempDir};

    fn metadata() -> Metadata {
        let mut reference_types = BTreeMap::new();
        reference_types.insert(
            "User".to_string(),
            ReferenceType::Object {
                properties: BTreeMap::from([(
                    "name".to_string(),
                    PropertySchema {
                        schema: TypeSchema::new("string"),
                        required: true,
                    },
                )]),
                additional_properties: None,
            },
        );
        reference_types.insert(
            "Tags".to_string(),
            ReferenceType::Object {
                properties: BTreeMap::new(),
                additional_properties: Some(json!({ "dataType": "string" })),
            },
        );

        Metadata {
            controllers: vec![Controller {
                name: "UsersController".to_string(),
                location: "src/controllers/usersController.ts".to_string(),
                path: "users".to_string(),
                methods: vec![Method {
                    name: "getUser".to_string(),
                    method: HttpMethod::Get,
                    path: "{userId}".to_string(),
                    parameters: vec![Parameter {
                        parameter_name: "userId".to_string(),
                        name: "userId".to_string(),
                        in_: ParameterIn::Path,
                        required: true,
                        type_: TypeSchema::new("double"),
                    }],
                    success_status: None,
                    security: Vec::new(),
                }],
            }],
            reference_types,
        }
    }

    fn generator(middleware: &str) -> (TempDir, RouteGenerator) {
        let dir = tempdir().unwrap();
        let mut options = GenerationOptions::new(dir.path());
        options.middleware = middleware.to_string();
        (dir, RouteGenerator::new(metadata(), options))
    }

    #[test]
    fn test_strategy_fixed_at_construction() {
        let (_dir, express) = generator("express");
        assert_eq!(express.strategy().middleware, Middleware::Express);
        assert_eq!(express.transform_path("/users/{id}/posts/{postId}"), "/users/:id/posts/:postId");

        let (_dir, hapi) = generator("hapi");
        assert_eq!(hapi.strategy().path_style, PathStyle::Brace);
        assert_eq!(hapi.transform_path("/users/{id}/posts/{postId}"), "/users/{id}/posts/{postId}");
    }

    #[tokio::test]
    async fn test_express_scenario() -> Result<()> {
        let (dir, generator) = generator("express");
        assert!(generator.generate().await?);

        let content = tokio::fs::read_to_string(dir.path().join("routes.ts")).await?;
        assert!(content.contains("from 'express'"));
        assert!(content.contains("app.get('/users/:userId'"));
        assert!(content.contains("UsersController.prototype.getUser"));
        assert!(!content.contains("{userId}"));
        Ok(())
    }

    #[tokio::test]
    async fn test_hapi_keeps_brace_paths() -> Result<()> {
        let (dir, generator) = generator("hapi");
        assert!(generator.generate().await?);

        let content = tokio::fs::read_to_string(dir.path().join("routes.ts")).await?;
        assert!(content.contains("path: '/users/{userId}'"));
        assert!(!content.contains("/users/:userId"));
        Ok(())
    }

    #[tokio::test]
    async fn test_koa_scenario() -> Result<()> {
        let (dir, generator) = generator("koa");
        assert!(generator.generate().await?);

        let content = tokio::fs::read_to_string(dir.path().join("routes.ts")).await?;
        assert!(content.contains("from '@koa/router'"));
        assert!(content.contains("router.get('/users/:userId'"));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_is_idempotent() -> Result<()> {
        let (dir, generator) = generator("express");
        let path = dir.path().join("routes.ts");

        assert!(generator.generate().await?);
        let first = tokio::fs::read(&path).await?;
        assert!(!generator.generate().await?);
        let second = tokio::fs::read(&path).await?;
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_always_write_when_comparison_disabled() -> Result<()> {
        let dir = tempdir()?;
        let mut options = GenerationOptions::new(dir.path());
        options.no_write_if_unchanged = false;
        let generator = RouteGenerator::new(metadata(), options);

        assert!(generator.generate().await?);
        assert!(generator.generate().await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_models_follow_policy() -> Result<()> {
        let dir = tempdir()?;
        let mut options = GenerationOptions::new(dir.path());
        options.no_implicit_additional_properties = NoImplicitAdditionalProperties::ThrowOnExtras;
        let generator = RouteGenerator::new(metadata(), options);

        let template = "{% for name, model in models %}{{ name }}={{ additional_props(schema=model.additionalProperties) }};{% endfor %}";
        let content = generator.build_content(template)?;
        assert_eq!(content, "Tags={\"dataType\":\"string\"};User=false;");
        Ok(())
    }

    #[tokio::test]
    async fn test_override_template() -> Result<()> {
        let dir = tempdir()?;
        let template_path = dir.path().join("custom.tera");
        tokio::fs::write(
            &template_path,
            "{% for c in controllers %}{% for a in c.actions %}{{ a.method }} {{ a.fullPath }}\n{% endfor %}{% endfor %}",
        )
        .await?;

        let mut options = GenerationOptions::new(dir.path());
        options.middleware = "hapi".to_string();
        options.middleware_template = Some(template_path.to_string_lossy().to_string());
        let generator = RouteGenerator::new(metadata(), options);
        assert_eq!(generator.strategy().source, TemplateSource::Custom(template_path));

        assert!(generator.generate().await?);
        let content = tokio::fs::read_to_string(dir.path().join("routes.ts")).await?;
        assert_eq!(content, "get /users/{userId}\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_with_template() -> Result<()> {
        let (dir, generator) = generator("koa");
        assert!(generator.generate_with_template("{{ basePath }}").await?);
        let content = tokio::fs::read_to_string(dir.path().join("routes.ts")).await?;
        assert_eq!(content, "/");
        Ok(())
    }

    #[tokio::test]
    async fn test_validation_precedes_template_read() -> Result<()> {
        let mut options = GenerationOptions::new("/nonexistent/routes");
        options.middleware_template = Some("/nonexistent/template.tera".to_string());
        let generator = RouteGenerator::new(metadata(), options);

        let err = generator.generate().await.unwrap_err();
        assert!(err.is_config());
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_extension_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let mut options = GenerationOptions::new(dir.path());
        options.routes_file_name = Some("routes.txt".to_string());
        let generator = RouteGenerator::new(metadata(), options);

        assert!(generator.generate().await.unwrap_err().is_config());
        let mut entries = tokio::fs::read_dir(dir.path()).await?;
        assert!(entries.next_entry().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_esm_file_name() -> Result<()> {
        let dir = tempdir()?;
        let mut options = GenerationOptions::new(dir.path());
        options.esm = true;
        options.routes_file_name = Some("routes.mts".to_string());
        let mut metadata = metadata();
        metadata.controllers[0].location = dir
            .path()
            .join("controllers/usersController.ts")
            .to_string_lossy()
            .to_string();
        let generator = RouteGenerator::new(metadata, options);

        assert!(generator.generate().await?);
        let content = tokio::fs::read_to_string(dir.path().join("routes.mts")).await?;
        assert!(content.contains("from './controllers/usersController.js'"));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_file_reports_target() -> Result<()> {
        let (dir, generator) = generator("express");
        let target = dir.path().join("routes.ts");

        assert_eq!(generator.generate_file().await?, (target.clone(), true));
        assert_eq!(generator.generate_file().await?, (target, false));
        Ok(())
    }

    #[tokio::test]
    async fn test_security_without_authentication_module() -> Result<()> {
        for middleware in Middleware::all() {
            let dir = tempdir()?;
            let mut options = GenerationOptions::new(dir.path());
            options.middleware = middleware.as_str().to_string();
            let mut metadata = metadata();
            metadata.controllers[0].methods[0].security =
                vec![BTreeMap::from([("jwt".to_string(), vec!["admin".to_string()])])];
            let generator = RouteGenerator::new(metadata, options);

            let content = generator.build_content(&generator.strategy().source.load().await?)?;
            assert!(content.contains("await Promise.reject(new Error("), "{middleware}");
            assert_eq!(
                content.matches("Promise.reject(").count(),
                content.matches("Promise.reject(new Error(").count(),
                "{middleware}"
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_controller_construction_has_no_blank_line() -> Result<()> {
        let (_dir, express) = generator("express");
        let content = express.build_content(&express.strategy().source.load().await?)?;
        assert!(content.contains(
            "request, response });\n                const controller = new UsersController();"
        ));

        let (_dir, koa) = generator("koa");
        let content = koa.build_content(&koa.strategy().source.load().await?)?;
        assert!(content.contains("}\n            const controller = new UsersController();"));

        let (_dir, hapi) = generator("hapi");
        let content = hapi.build_content(&hapi.strategy().source.load().await?)?;
        assert!(content.contains("}\n                const controller = new UsersController();"));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_from_metadata_file() -> Result<()> {
        let dir = tempdir()?;
        let metadata_path = dir.path().join("metadata.json");
        tokio::fs::write(&metadata_path, serde_json::to_string(&metadata())?).await?;

        assert!(generate(&metadata_path, GenerationOptions::new(dir.path())).await?);
        assert!(dir.path().join("routes.ts").exists());
        Ok(())
    }
}
