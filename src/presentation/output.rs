//! Output Rendering
//!
//! Status view of both registries, rendered as text or JSON.

use crate::domain::entities::{CompiledRegistry, DeployedRegistry};
use crate::domain::value_objects::Tier;
use crate::ui::{paint, Icon, SemanticColor, TerminalCapabilities};

/// Reconciliation state of one module key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Deployed payload equals the compiled payload
    Deployed,
    /// Compiled but never deployed
    NotDeployed,
    /// Compiled payload differs from the deployed one
    Pending,
    /// Deployed record without a compiled counterpart (pruned on next deploy)
    Retired,
}

impl ModuleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleState::Deployed => "deployed",
            ModuleState::NotDeployed => "not deployed",
            ModuleState::Pending => "pending",
            ModuleState::Retired => "retired",
        }
    }
}

/// One row of the status view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub key: String,
    pub tier: Option<Tier>,
    pub compiled_digest: Option<String>,
    pub deployed_digest: Option<String>,
    pub address: Option<String>,
    pub state: ModuleState,
}

/// Both registries side by side, in deployment order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub compiled_version: Option<String>,
    pub deployed_version: Option<String>,
    pub root_address: Option<String>,
    pub rows: Vec<StatusRow>,
}

impl StatusView {
    pub fn new(compiled: &CompiledRegistry, deployed: &DeployedRegistry) -> Self {
        let mut rows: Vec<StatusRow> = compiled
            .deploy_order()
            .into_iter()
            .map(|(key, record)| {
                let prior = deployed.get(key);
                let state = match prior {
                    None => ModuleState::NotDeployed,
                    Some(p) if p.payload() == record.payload() => ModuleState::Deployed,
                    Some(_) => ModuleState::Pending,
                };
                StatusRow {
                    key: key.to_string(),
                    tier: Some(record.tier()),
                    compiled_digest: Some(record.payload().short_digest()),
                    deployed_digest: prior.map(|p| p.payload().short_digest()),
                    address: prior.map(|p| p.address().to_string()),
                    state,
                }
            })
            .collect();

        rows.extend(
            deployed
                .records()
                .filter(|(key, _)| !compiled.contains(key))
                .map(|(key, record)| StatusRow {
                    key: key.to_string(),
                    tier: None,
                    compiled_digest: None,
                    deployed_digest: Some(record.payload().short_digest()),
                    address: Some(record.address().to_string()),
                    state: ModuleState::Retired,
                }),
        );

        Self {
            compiled_version: compiled.tool_version().map(str::to_string),
            deployed_version: deployed.tool_version().map(str::to_string),
            root_address: deployed.root_address().map(str::to_string),
            rows,
        }
    }

    /// Whether a deploy run would have nothing to do (ignoring live drift)
    pub fn is_up_to_date(&self) -> bool {
        !self.rows.is_empty()
            && self.compiled_version == self.deployed_version
            && self.rows.iter().all(|r| r.state == ModuleState::Deployed)
    }

    pub fn render_text(&self, caps: TerminalCapabilities) -> String {
        let color = caps.supports_color;
        let unicode = caps.supports_unicode;
        let none = || "-".to_string();

        let mut out = String::new();
        out.push_str(&format!(
            "Compiled version: {}\nDeployed version: {}\nRoot address:     {}\n\n",
            self.compiled_version.clone().unwrap_or_else(none),
            self.deployed_version.clone().unwrap_or_else(none),
            self.root_address.clone().unwrap_or_else(none),
        ));

        if self.rows.is_empty() {
            out.push_str("No modules compiled yet. Run `hsc compile`.\n");
            return out;
        }

        let width = self.rows.iter().map(|r| r.key.len()).max().unwrap_or(0);
        for row in &self.rows {
            let (icon, tone) = match row.state {
                ModuleState::Deployed => (Icon::Success, SemanticColor::Success),
                ModuleState::NotDeployed | ModuleState::Pending => {
                    (Icon::Progress, SemanticColor::Warning)
                }
                ModuleState::Retired => (Icon::Pending, SemanticColor::Dim),
            };
            out.push_str(&format!(
                "  {} {:<width$}  {:<12}  {:<12}  {:<12}  {}\n",
                icon.colored(color, unicode),
                row.key,
                row.compiled_digest.clone().unwrap_or_else(none),
                row.deployed_digest.clone().unwrap_or_else(none),
                paint(row.state.as_str(), tone, color),
                row.address.clone().unwrap_or_else(none),
                width = width,
            ));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "event": "status",
            "compiled_version": self.compiled_version,
            "deployed_version": self.deployed_version,
            "root_address": self.root_address,
            "up_to_date": self.is_up_to_date(),
            "modules": self.rows.iter().map(|r| serde_json::json!({
                "key": r.key,
                "tier": r.tier.map(|t| t.as_str()),
                "compiled": r.compiled_digest,
                "deployed": r.deployed_digest,
                "address": r.address,
                "state": r.state.as_str(),
            })).collect::<Vec<_>>(),
        })
    }
}
