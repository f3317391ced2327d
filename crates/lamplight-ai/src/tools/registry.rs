//! Name -> handler table with argument checking.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::descriptor::ToolDescriptor;
use super::ToolError;
use crate::ToolDefinition;

/// Arguments after they have been checked against the descriptor.
pub type ToolArguments = serde_json::Map<String, Value>;

/// Runs a tool. Receives checked arguments, returns a JSON result.
pub type ToolHandler = Box<dyn Fn(&ToolArguments) -> Result<Value, ToolError> + Send + Sync>;

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

/// Registered tools, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `descriptor.name` to `handler`. An existing binding is kept.
    pub fn register(&mut self, descriptor: ToolDescriptor, handler: ToolHandler) -> Result<(), ToolError> {
        if self.by_name.contains_key(&descriptor.name) {
            return Err(ToolError::DuplicateToolName(descriptor.name));
        }
        debug!(tool = %descriptor.name, "Registered tool");
        self.by_name.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool { descriptor, handler });
        Ok(())
    }

    /// Check `arguments` against the tool's parameters and run it.
    ///
    /// `arguments` must be a JSON object, or `null` for no arguments.
    pub fn invoke(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        let tool = self
            .by_name
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let args = bind_arguments(&tool.descriptor, arguments)?;
        let logged = Value::Object(args.clone());
        debug!(tool = %name, args = %logged, "Invoking tool");
        (tool.handler)(&args)
    }

    pub fn list_descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Descriptors rendered for advertisement to a provider.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.descriptor.to_definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| &t.descriptor.name).collect::<Vec<_>>())
            .finish()
    }
}

fn bind_arguments(descriptor: &ToolDescriptor, arguments: &Value) -> Result<ToolArguments, ToolError> {
    let mismatch = |reason: String| ToolError::ArgumentMismatch {
        tool: descriptor.name.clone(),
        reason,
    };

    let empty = ToolArguments::new();
    let given = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => return Err(mismatch(format!("expected an object, got {other}"))),
    };

    if let Some(unknown) = given.keys().find(|k| descriptor.param(k).is_none()) {
        return Err(mismatch(format!("unexpected parameter '{unknown}'")));
    }

    let mut bound = ToolArguments::new();
    for param in &descriptor.parameters {
        match given.get(&param.name) {
            None | Some(Value::Null) if param.required => {
                return Err(mismatch(format!("missing required parameter '{}'", param.name)));
            }
            None | Some(Value::Null) => {}
            Some(value) => {
                let coerced = param.kind.coerce(value).ok_or_else(|| {
                    mismatch(format!(
                        "parameter '{}' expects {}, got {value}",
                        param.name,
                        param.kind.json_type()
                    ))
                })?;
                bound.insert(param.name.clone(), coerced);
            }
        }
    }
    Ok(bound)
}

/// Read a checked integer argument.
pub fn require_i64(args: &ToolArguments, name: &str) -> Result<i64, ToolError> {
    args.get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| ToolError::HandlerError(format!("integer argument '{name}' missing")))
}

/// Read a checked boolean argument.
pub fn require_bool(args: &ToolArguments, name: &str) -> Result<bool, ToolError> {
    args.get(name)
        .and_then(Value::as_bool)
        .ok_or_else(|| ToolError::HandlerError(format!("boolean argument '{name}' missing")))
}
