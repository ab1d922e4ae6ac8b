//! Warning sink for the transforms.
//!
//! A transform never aborts on a construct it cannot safely rewrite; it
//! reports the node here and leaves it unchanged. The sink is a collaborator
//! chosen by the caller: the CLI collects warnings to render them, library
//! embedders can forward them to `tracing`.

use serde_json::Value;
use tracing::warn;

use crate::estree::node_type;

/// One reported warning, with enough node context to point at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub category: String,
    pub node_type: Option<String>,
    /// Start line/column as attached by the parser under `loc` (ESTree:
    /// 1-based line, 0-based column). `None` when the document carries no
    /// location info.
    pub loc: Option<(u64, u64)>,
}

impl Warning {
    pub fn new(node: &Value, message: &str, category: &str) -> Self {
        Self {
            message: message.to_string(),
            category: category.to_string(),
            node_type: node_type(node).map(str::to_owned),
            loc: start_location(node),
        }
    }
}

/// The start line/column of a node's `loc` attachment, when present.
pub fn start_location(node: &Value) -> Option<(u64, u64)> {
    let start = node.get("loc")?.get("start")?;
    let line = start.get("line")?.as_u64()?;
    let column = start.get("column")?.as_u64()?;
    Some((line, column))
}

/// Diagnostic interface handed to every transform.
pub trait Logger {
    fn warn(&mut self, node: &Value, message: &str, category: &str);
}

/// Forwards warnings to the `tracing` facade with structured fields.
#[derive(Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&mut self, node: &Value, message: &str, category: &str) {
        let warning = Warning::new(node, message, category);
        let node_ty = warning.node_type.as_deref().unwrap_or("<unknown>");
        match warning.loc {
            Some((line, column)) => warn!(
                category = %warning.category,
                node = %node_ty,
                line,
                column,
                "{}", warning.message
            ),
            None => warn!(
                category = %warning.category,
                node = %node_ty,
                "{}", warning.message
            ),
        }
    }
}

/// Collects warnings in memory for later rendering or assertions.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    warnings: Vec<Warning>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

impl Logger for MemoryLogger {
    fn warn(&mut self, node: &Value, message: &str, category: &str) {
        self.warnings.push(Warning::new(node, message, category));
    }
}
