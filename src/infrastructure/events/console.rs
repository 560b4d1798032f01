//! Console Event Sink
//!
//! Human-readable progress, one line per event. Icons degrade to ASCII and
//! colors are dropped when the terminal does not support them.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{is_zero_balance, ReconcileEvent, ReconcileEventSink};
use crate::domain::services::{DeployDecision, DriftStatus};
use crate::ui::{paint, Icon, SemanticColor, TerminalCapabilities};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    caps: TerminalCapabilities,
    verbose: u8,
}

impl ConsoleEventSink {
    pub fn stdout(caps: TerminalCapabilities, verbose: u8) -> Self {
        Self::with_writer(io::stdout(), caps, verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        caps: TerminalCapabilities,
        verbose: u8,
    ) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            caps,
            verbose,
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.caps.supports_color, self.caps.supports_unicode)
    }

    fn dim(&self, text: &str) -> String {
        paint(text, SemanticColor::Dim, self.caps.supports_color)
    }

    /// Render `event`, or `None` if it is hidden at the current verbosity
    pub fn format_event(&self, event: &ReconcileEvent) -> Option<String> {
        let line = match event {
            ReconcileEvent::CompileStarted { module_count } => format!(
                "{} Compiling {} modules",
                self.icon(Icon::Compile),
                module_count
            ),

            ReconcileEvent::ModuleCompiled {
                key,
                outcome,
                digest,
                ..
            } => {
                let icon = if outcome.is_changed() {
                    Icon::Success
                } else {
                    Icon::Pending
                };
                let mut line = format!("  {} {} {}", self.icon(icon), key, outcome.as_str());
                if self.verbose > 0 {
                    line.push_str(&format!(" {}", self.dim(digest)));
                }
                line
            }

            ReconcileEvent::RegistryPruned { keys } => format!(
                "  {} Removed retired modules: {}",
                self.icon(Icon::Warning),
                keys.join(", ")
            ),

            ReconcileEvent::CompileFinished {
                changed_count,
                tool_version,
            } => format!(
                "{} {} changed {}",
                self.icon(Icon::Success),
                plural(*changed_count, "module"),
                self.dim(&format!("({})", tool_version))
            ),

            ReconcileEvent::DeployStarted {
                module_count,
                tool_version,
                dry_run,
            } => format!(
                "{} Deploying {} modules {}{}",
                self.icon(Icon::Deploy),
                module_count,
                self.dim(&format!("({})", tool_version)),
                if *dry_run { " [dry run]" } else { "" }
            ),

            ReconcileEvent::AccountChecked {
                address,
                nonce,
                balance,
            } => {
                let icon = if is_zero_balance(balance) {
                    Icon::Warning
                } else {
                    Icon::Arrow
                };
                format!(
                    "  {} Account {} balance {} {}",
                    self.icon(icon),
                    address,
                    balance,
                    self.dim(&format!("(nonce {})", nonce))
                )
            }

            ReconcileEvent::DriftChecked { status, force_all } => {
                let icon = if status.forces_redeploy() {
                    Icon::Warning
                } else {
                    Icon::Arrow
                };
                let mut line = format!("  {} Drift: {}", self.icon(icon), status.label());
                if *force_all {
                    line.push_str(", redeploying every module");
                }
                if self.verbose > 0 {
                    if let Some(detail) = drift_detail(status) {
                        line.push_str(&format!(" {}", self.dim(&detail)));
                    }
                }
                line
            }

            ReconcileEvent::ModuleDeploying { key, reason, .. } => {
                if self.verbose == 0 {
                    return None;
                }
                format!(
                    "  {} {} {}",
                    self.icon(Icon::Progress),
                    key,
                    self.dim(reason.as_str())
                )
            }

            ReconcileEvent::ModuleReconciled {
                key,
                decision,
                address,
                ..
            } => match (decision, address) {
                (DeployDecision::Skip, Some(address)) => format!(
                    "  {} {} unchanged {}",
                    self.icon(Icon::Pending),
                    key,
                    self.dim(address)
                ),
                (DeployDecision::Skip, None) => {
                    format!("  {} {} unchanged", self.icon(Icon::Pending), key)
                }
                (DeployDecision::Deploy(reason), Some(address)) => format!(
                    "  {} {} {} {}",
                    self.icon(Icon::Success),
                    key,
                    address,
                    self.dim(&format!("({})", reason.as_str()))
                ),
                (DeployDecision::Deploy(reason), None) => format!(
                    "  {} {} would deploy {}",
                    self.icon(Icon::Arrow),
                    key,
                    self.dim(&format!("({})", reason.as_str()))
                ),
            },

            ReconcileEvent::VersionSynced { address, version } => format!(
                "  {} Version {} recorded on {}",
                self.icon(Icon::Success),
                version,
                address
            ),

            ReconcileEvent::DeployFinished {
                root_address,
                deployed_count,
                dry_run,
            } => {
                let verb = if *dry_run { "would be deployed" } else { "deployed" };
                let mut line = format!(
                    "{} {} {}",
                    self.icon(Icon::Success),
                    plural(*deployed_count, "module"),
                    verb
                );
                if let Some(address) = root_address {
                    line.push_str(&format!("\nRoot address: {}", address));
                }
                line
            }
        };
        Some(line)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn drift_detail(status: &DriftStatus) -> Option<String> {
    match status {
        DriftStatus::InSync { reported } => Some(format!("(reported {})", reported)),
        DriftStatus::LocalStale { compiled, deployed } => Some(format!(
            "(compiled {}, deployed {})",
            compiled,
            deployed.as_deref().unwrap_or("none")
        )),
        DriftStatus::RemoteMismatch { expected, reported } => {
            Some(format!("(expected {}, reported {})", expected, reported))
        }
        DriftStatus::QueryFailed { reason } => Some(format!("({})", reason)),
        DriftStatus::Unverified => None,
    }
}

impl ReconcileEventSink for ConsoleEventSink {
    fn on_event(&self, event: ReconcileEvent) {
        let Some(line) = self.format_event(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
