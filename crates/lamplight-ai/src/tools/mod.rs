//! Tools the model can call.
//!
//! A tool is a [`ToolDescriptor`] (name, description, typed parameters)
//! bound to a handler closure in a [`ToolRegistry`]. The registry checks
//! arguments against the descriptor before the handler runs.

mod descriptor;
mod registry;


pub use descriptor::{to_ollama_tool, ParamKind, ParamSpec, ToolDescriptor};
pub use registry::{require_bool, require_i64, ToolArguments, ToolHandler, ToolRegistry};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("tool '{0}' is already registered")]
    DuplicateToolName(String),
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
    #[error("bad arguments for '{tool}': {reason}")]
    ArgumentMismatch { tool: String, reason: String },
    #[error("tool failed: {0}")]
    HandlerError(String),
    #[error("not found: {0}")]
    NotFound(String),
}
