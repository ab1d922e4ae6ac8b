//! Core transform engine for the modshift codemod.
//!
//! modshift rewrites CommonJS module-loading idioms found in an ESTree
//! document into ES module import declarations. Parsing source text and
//! printing the rewritten tree belong to external collaborators; this crate
//! consumes and produces the JSON AST those tools exchange.
//!
//! ```
//! use modshift_core::logger::MemoryLogger;
//! use serde_json::json;
//!
//! let mut ast = json!({
//!     "type": "Program",
//!     "body": [{
//!         "type": "VariableDeclaration",
//!         "kind": "const",
//!         "declarations": [{
//!             "type": "VariableDeclarator",
//!             "id": {"type": "Identifier", "name": "fs"},
//!             "init": {
//!                 "type": "CallExpression",
//!                 "callee": {"type": "Identifier", "name": "require"},
//!                 "arguments": [{"type": "Literal", "value": "fs"}],
//!             },
//!         }],
//!     }],
//! });
//! let mut logger = MemoryLogger::new();
//! modshift_core::transform_program(&mut ast, &mut logger).unwrap();
//! assert_eq!(ast["body"][0]["type"], "ImportDeclaration");
//! ```

pub mod config;
pub mod estree;
pub mod logger;
pub mod matcher;
pub mod syntax;
pub mod transform;
pub mod traverse;

use serde_json::Value;

use logger::Logger;
use transform::commonjs::CommonJsImports;
use transform::{TransformError, TransformRegistry};

/// A registry with every built-in transform registered.
pub fn default_registry() -> TransformRegistry {
    let mut registry = TransformRegistry::new();
    registry.register(Box::new(CommonJsImports::new()));
    registry
}

/// Run all built-in transforms over `program` with default configuration.
pub fn transform_program(
    program: &mut Value,
    logger: &mut dyn Logger,
) -> Result<(), TransformError> {
    default_registry().run_all(program, logger)
}
