//! `aergoluac` Compiler Adapter
//!
//! Runs `aergoluac --payload <source>` and takes trimmed stdout as the
//! payload. Anything on stderr counts as a compilation failure, even with a
//! zero exit status.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use ignore::WalkBuilder;

use crate::domain::ports::{CompileError, Compiler};
use crate::domain::value_objects::Payload;

/// Compiler backed by the external `aergoluac` executable
#[derive(Debug, Clone)]
pub struct AergoLuaCompiler {
    program: PathBuf,
}

impl AergoLuaCompiler {
    /// Executable name looked up when no explicit path is configured
    pub const PROGRAM: &'static str = "aergoluac";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the compiler
    ///
    /// An explicit path wins. Otherwise each search root is walked for an
    /// `aergoluac` file; the first hit is used. Falls back to the bare
    /// program name, resolved through `PATH` at spawn time.
    pub fn discover(explicit: Option<&Path>, search_roots: &[PathBuf]) -> Self {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        search_roots
            .iter()
            .find_map(|root| find_program(root, Self::PROGRAM))
            .map(Self::new)
            .unwrap_or_else(|| Self::new(Self::PROGRAM))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check if the compiler can be started
    pub fn check_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }
}

impl Compiler for AergoLuaCompiler {
    fn compile(&self, source: &Path) -> Result<Payload, CompileError> {
        let output = Command::new(&self.program)
            .arg("--payload")
            .arg(source)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    CompileError::NotFound(self.program.display().to_string())
                }
                _ => CompileError::Spawn(e.to_string()),
            })?;

        interpret_output(
            output.status.success(),
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

fn interpret_output(
    success: bool,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<Payload, CompileError> {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return Err(CompileError::Failed(stderr.to_string()));
    }
    if !success {
        return Err(CompileError::Failed(match code {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        }));
    }

    let payload = stdout.trim();
    if payload.is_empty() {
        return Err(CompileError::EmptyPayload);
    }
    Ok(Payload::new(payload))
}

fn find_program(root: &Path, name: &str) -> Option<PathBuf> {
    if !root.is_dir() {
        return None;
    }
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .find(|entry| entry.file_name() == name)
        .map(|entry| entry.into_path())
}
