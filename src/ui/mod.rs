//! Console rendering primitives shared by the event sinks and the CLI

pub mod primitives;
pub mod terminal;
pub mod theme;

pub use primitives::{paint, Icon, SemanticColor};
pub use terminal::{detect_capabilities, TerminalCapabilities};
