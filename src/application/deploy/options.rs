//! Deploy Options

/// Options for the deploy use case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployOptions {
    /// Redeploy every module regardless of drift or payload changes
    pub force: bool,
    /// Report decisions without deploying, calling or persisting
    pub dry_run: bool,
    /// Deploy without reading the signing account's balance first
    pub skip_balance_check: bool,
}

impl DeployOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_skip_balance_check(mut self, skip: bool) -> Self {
        self.skip_balance_check = skip;
        self
    }
}
