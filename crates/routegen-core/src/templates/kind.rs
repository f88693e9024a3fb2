//! Supported middleware frameworks.
//!
//! # Examples
//!
//! ```
//! use routegen_core::templates::Middleware;
//! use std::str::FromStr;
//!
//! let middleware = Middleware::from_str("koa").unwrap();
//! assert_eq!(middleware, Middleware::Koa);
//! assert_eq!(middleware.as_str(), "koa");
//!
//! // Unknown identifiers resolve to the default framework
//! assert_eq!(Middleware::resolve("fastify"), Middleware::Express);
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

/// Web middleware frameworks with a bundled routes template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Middleware {
    #[default]
    Express,
    Koa,
    Hapi,
}

impl FromStr for Middleware {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "express" => Ok(Middleware::Express),
            "koa" => Ok(Middleware::Koa),
            "hapi" => Ok(Middleware::Hapi),
            _ => Err(format!("Unknown middleware: {}", s)),
        }
    }
}

impl Middleware {
    /// Returns the middleware identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::Koa => "koa",
            Self::Hapi => "hapi",
        }
    }

    /// Parse an identifier, falling back to the default for unknown values
    pub fn resolve(identifier: &str) -> Self {
        identifier.parse().unwrap_or_else(|_| {
            log::debug!(
                "Unknown middleware '{}', using {}",
                identifier,
                Self::default()
            );
            Self::default()
        })
    }

    /// Returns an iterator over all supported middlewares
    pub fn all() -> impl Iterator<Item = Self> {
        use Middleware::*;
        [Express, Koa, Hapi].iter().copied()
    }
}

impl fmt::Display for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
