//! Shared accessors and predicates over ESTree-shaped JSON nodes.
//!
//! The engine operates on documents produced by an external ESTree parser
//! (acorn, espree, babel). Nodes are JSON objects carrying a string `type`
//! tag; this module keeps the raw field probing in one place so the rest of
//! the crate can stay declarative.

use serde_json::Value;

/// The `type` tag of a node, if `value` is an ESTree node at all.
pub fn node_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

/// True for any JSON object carrying a string `type` tag.
pub fn is_node(value: &Value) -> bool {
    node_type(value).is_some()
}

/// True when `value` is a node of the given type.
pub fn is_type(value: &Value, ty: &str) -> bool {
    node_type(value) == Some(ty)
}

/// Matches `Identifier` nodes.
pub fn is_identifier(value: &Value) -> bool {
    is_type(value, "Identifier")
}

/// The name of an `Identifier` node.
pub fn identifier_name(value: &Value) -> Option<&str> {
    if is_identifier(value) {
        value.get("name").and_then(Value::as_str)
    } else {
        None
    }
}

/// Matches `Literal` nodes whose value is a string.
pub fn is_string_literal(value: &Value) -> bool {
    is_type(value, "Literal") && value.get("value").is_some_and(Value::is_string)
}
