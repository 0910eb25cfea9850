//! Staging of timing-configuration fixtures.
//!
//! The fixture directory (the one carrying `buildbench.toml`) is copied into
//! a fresh working directory before a timing run, so repeated runs never see
//! each other's build state. Version-control metadata and prior harness
//! artifacts are left behind.

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;

use crate::error::{BenchError, Result};

const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg"];

/// Copy `source` into `dest`, skipping VCS metadata and any entry whose name
/// starts with `artifact_prefix`. Returns the number of files copied.
pub fn copy_timing_configuration(
    source: &Path,
    dest: &Path,
    artifact_prefix: &str,
) -> Result<usize> {
    let prefix = artifact_prefix.to_string();
    let walker = WalkBuilder::new(source)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .filter_entry(move |entry| {
            let name = entry.file_name().to_string_lossy();
            !VCS_DIRS.contains(&name.as_ref()) && !name.starts_with(prefix.as_str())
        })
        .build();

    let mut copied = 0usize;

    for entry in walker {
        let entry = entry.map_err(|e| BenchError::Fixture {
            message: e.to_string(),
        })?;
        let path = entry.path();
        let relative = match path.strip_prefix(source) {
            Ok(r) if !r.as_os_str().is_empty() => r,
            _ => continue,
        };
        let target = dest.join(relative);

        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            // fs::copy carries permission bits, so executable fixtures stay
            // executable in the working directory.
            fs::copy(path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
