//! Shared support for integration tests: a stub build tool that emits the
//! debug transcript the harness scrapes.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A stub build tool installed as an executable shell script.
pub struct FakeTool {
    _dir: TempDir,
    path: PathBuf,
}

#[cfg(unix)]
impl FakeTool {
    /// Install a stub whose body is the given shell fragment.
    pub fn install(script_body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("fake-tool");
        fs::write(&path, format!("#!/bin/sh\n{}", script_body)).expect("Failed to write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub executable");
        Self { _dir: dir, path }
    }

    /// A tool that prints the same transcript on every invocation.
    pub fn with_transcript(transcript: &str) -> Self {
        Self::install(&format!("cat <<'EOF'\n{}EOF\nexit 0\n", transcript))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// The canonical full-build transcript: all seven markers present.
pub fn full_transcript() -> String {
    debug_transcript("9.75", false)
}

/// The canonical null-build transcript: no command time, targets up to date.
pub fn null_transcript() -> String {
    debug_transcript("0.0", true)
}

/// A `--debug=memory,time` transcript with the given command time.
pub fn debug_transcript(commands_seconds: &str, up_to_date: bool) -> String {
    let mut transcript = String::from(
        "Memory before reading configuration files: 2097152\n\
         Memory before building targets: 3145728\n",
    );
    if up_to_date {
        transcript.push_str("tool: `.' is up to date.\n");
    }
    transcript.push_str(
        "Memory after building targets: 4194304\n\
         Total configuration file execution time: 1.25 seconds\n\
         Total build engine execution time: 11.0 seconds\n",
    );
    transcript.push_str(&format!(
        "Total command execution time: {} seconds\n",
        commands_seconds
    ));
    transcript.push_str("Total build time: 12.5 seconds\n");
    transcript
}
