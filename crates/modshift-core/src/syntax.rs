//! Constructors for the nodes the transforms synthesize.
//!
//! Each builder returns a fresh ESTree-shaped JSON node; synthesized nodes
//! are never shared between substitutions.

use serde_json::{Value, json};

/// `import <specifiers> from <source>;`
pub fn import_declaration(specifiers: Vec<Value>, source: Value) -> Value {
    json!({
        "type": "ImportDeclaration",
        "specifiers": specifiers,
        "source": source,
    })
}

/// A named binding: `{<imported>}` or `{<imported> as <local>}`.
pub fn import_specifier(local: Value, imported: Value) -> Value {
    json!({
        "type": "ImportSpecifier",
        "local": local,
        "imported": imported,
    })
}

/// The default binding: `import <local> from ...`.
pub fn import_default_specifier(local: Value) -> Value {
    json!({
        "type": "ImportDefaultSpecifier",
        "local": local,
    })
}

/// `<kind> <declarations>;` with the original declaration kind.
pub fn variable_declaration(kind: &str, declarations: Vec<Value>) -> Value {
    json!({
        "type": "VariableDeclaration",
        "kind": kind,
        "declarations": declarations,
    })
}
