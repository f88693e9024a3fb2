//! Output location validation and write-if-changed.
//!
//! The compare-then-write sequence is not atomic: concurrent generations
//! targeting the same file must be serialized by the caller.

// Internal imports (std, crate)
use std::io;
use std::path::{Path, PathBuf};

use crate::config::GenerationOptions;
use crate::{Error, Result};

// External imports (alphabetized)
use tokio::fs;

const CLASSIC_EXTENSIONS: &[&str] = &["ts"];
const ESM_EXTENSIONS: &[&str] = &["ts", "mts", "cts"];

/// Extensions a routes file may carry, without the leading dot
pub fn allowed_extensions(esm: bool) -> &'static [&'static str] {
    if esm {
        ESM_EXTENSIONS
    } else {
        CLASSIC_EXTENSIONS
    }
}

/// Validate the output options and return the routes file path.
///
/// Fails with a configuration error when `routes_dir` is missing or not a
/// directory, or when the file name has an extension not allowed for the
/// current module format.
pub async fn target_path(options: &GenerationOptions) -> Result<PathBuf> {
    let routes_dir = &options.routes_dir;
    match fs::metadata(routes_dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(Error::config(format!(
                "routesDir should be a directory: {}",
                routes_dir.display()
            )))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::config(format!(
                "routesDir does not exist: {}",
                routes_dir.display()
            )))
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(file_name) = &options.routes_file_name {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let allowed = allowed_extensions(options.esm);
        if !allowed.contains(&extension) {
            return Err(Error::config(format!(
                "routesFileName should be a valid typescript file (.{}): {}",
                allowed.join(", ."),
                file_name
            )));
        }
    }

    Ok(routes_dir.join(options.routes_file_name()))
}

/// Current bytes of `path`, or `None` when it does not exist yet.
/// Any other read failure is returned as is.
async fn read_existing(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write `content` to `path` unless `skip_unchanged` is set and the file
/// already holds exactly these bytes. Returns whether a write happened.
pub async fn write_if_changed(path: &Path, content: &str, skip_unchanged: bool) -> Result<bool> {
    if skip_unchanged {
        if let Some(existing) = read_existing(path).await? {
            if existing == content.as_bytes() {
                log::info!("Routes unchanged, skipping write: {}", path.display());
                return Ok(false);
            }
            log::debug!("Routes content differs from {}", path.display());
        }
    }

    fs::write(path, content).await?;
    log::info!("Wrote routes: {} ({} bytes)", path.display(), content.len());
    Ok(true)
}
