//! Test utilities for routegen integration tests

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// External imports (alphabetized)
use tempfile::TempDir;

/// Creates a temporary directory for test outputs
pub fn create_temp_dir() -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let temp_path = temp_dir.path().to_path_buf();
    Ok((temp_dir, temp_path))
}

/// Writes a metadata file with one controller and one GET method
pub fn create_test_metadata(dir: &Path) -> anyhow::Result<PathBuf> {
    let metadata_path = dir.join("metadata.json");
    let metadata = serde_json::json!({
        "controllers": [{
            "name": "UsersController",
            "location": dir.join("controllers/usersController.ts"),
            "path": "users",
            "methods": [{
                "name": "getUser",
                "method": "get",
                "path": "{userId}",
                "parameters": [{
                    "parameterName": "userId",
                    "name": "userId",
                    "in": "path",
                    "required": true,
                    "type": { "dataType": "double" }
                }]
            }]
        }],
        "referenceTypes": {
            "User": {
                "dataType": "refObject",
                "properties": {
                    "id": { "dataType": "double", "required": true },
                    "email": { "dataType": "string", "required": true }
                }
            }
        }
    });
    std::fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;
    Ok(metadata_path)
}

/// Runs the routegen binary with the given arguments
pub fn run_routegen(args: &[&str]) -> anyhow::Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_routegen"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()?;
    Ok(output)
}
