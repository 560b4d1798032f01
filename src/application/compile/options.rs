//! Compile Options

/// Options for the compile use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Version stamped on the registry by this run
    pub tool_version: String,
    /// Replace every record even when the payload is unchanged
    pub force: bool,
}

impl CompileOptions {
    pub fn new(tool_version: impl Into<String>) -> Self {
        Self {
            tool_version: tool_version.into(),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
