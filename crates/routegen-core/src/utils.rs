//! Route path and import path utilities for code generation

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;

static BRACE_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w*)\}").unwrap());

/// Rewrite `{param}` placeholders into `:param`.
///
/// Anything that is not a complete `{word}` group, such as an unbalanced
/// brace, is left as it is.
pub fn convert_braces_path_params(path: &str) -> String {
    BRACE_PARAM.replace_all(path, ":$1").into_owned()
}

/// Trim surrounding slashes, backslashes and whitespace, then wrap with
/// `prefix`/`suffix`.
///
/// With `skip_if_empty`, an empty path (or a bare `/`) yields an empty string
/// instead of just the prefix and suffix.
pub fn normalise_path(path: &str, prefix: &str, suffix: &str, skip_if_empty: bool) -> String {
    if skip_if_empty && (path.is_empty() || path == "/") {
        return String::new();
    }

    let is_edge = |c: char| c == '/' || c == '\\' || c.is_whitespace();
    let trimmed = path.trim_matches(is_edge);
    format!("{prefix}{trimmed}{suffix}")
}

/// Import specifier for `location` as seen from a file in `routes_dir`.
///
/// Relative inputs are resolved against the current directory first, so an
/// absolute `location` and a relative `routes_dir` (or the reverse) still
/// yield a relative specifier. The TypeScript extension is dropped; in ESM
/// mode it is replaced by the matching JavaScript one since that is what the
/// compiled import resolves to.
pub fn relative_import_path(routes_dir: &Path, location: &str, esm: bool) -> String {
    let location = Path::new(location);
    let extension = location.extension().and_then(|e| e.to_str()).unwrap_or("");

    let (stem, new_extension) = match extension {
        "ts" => (location.with_extension(""), ".js"),
        "mts" => (location.with_extension(""), ".mjs"),
        "cts" => (location.with_extension(""), ".cjs"),
        _ => (location.to_path_buf(), ".js"),
    };
    let new_extension = if esm { new_extension } else { "" };

    let stem = absolute(&stem);
    let relative = pathdiff::diff_paths(&stem, absolute(routes_dir)).unwrap_or(stem);
    let relative = relative.to_string_lossy().replace('\\', "/");

    format!("./{relative}{new_extension}")
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
