//! commonjs-imports transform: rewrites `require` declarations into ES imports.
//!
//! Recognizes the CommonJS module-loading idioms that have a direct ES module
//! equivalent and replaces each matching variable-declaration statement:
//!
//! - `const a = require('x')`         becomes `import a from 'x'`
//! - `const {a, b: c} = require('x')` becomes `import {a, b as c} from 'x'`
//! - `const a = require('x').default` becomes `import a from 'x'`
//! - `const a = require('x').foo`     becomes `import {foo as a} from 'x'`
//!
//! A declarator that fits none of these shapes stays a variable declaration
//! of the original kind. A require declaration below the program root is left
//! untouched and reported, since import declarations are only valid at the
//! top level.

use std::sync::LazyLock;

use serde_json::Value;

use crate::declare_transform;
use crate::estree::{identifier_name, is_identifier, is_string_literal, is_type};
use crate::logger::Logger;
use crate::matcher::Pattern;
use crate::syntax::{
    import_declaration, import_default_specifier, import_specifier, variable_declaration,
};
use crate::transform::{Transform, TransformMetadata};
use crate::traverse::{self, Action, ReplaceVisitor};

declare_transform!(
    CommonJsImports,
    id = "C001",
    name = "commonjs-imports",
    description = "Rewrite require() variable declarations into ES module imports"
);

impl Transform for CommonJsImports {
    fn metadata(&self) -> &TransformMetadata {
        &self.metadata
    }

    fn apply(&self, program: &mut Value, logger: &mut dyn Logger) {
        traverse::replace(program, &mut RequireRewriter { logger });
    }
}

struct RequireRewriter<'a> {
    logger: &'a mut dyn Logger,
}

impl ReplaceVisitor for RequireRewriter<'_> {
    fn enter(&mut self, node: &Value, parent_type: Option<&str>) -> Action {
        if !is_var_with_require_calls(node) {
            return Action::Keep;
        }
        if parent_type != Some("Program") {
            self.logger
                .warn(node, "import can only be at root level", "commonjs");
            return Action::Keep;
        }
        Action::Replace(rewrite_statement(node))
    }
}

fn is_var_with_require_calls(node: &Value) -> bool {
    is_type(node, "VariableDeclaration")
        && node
            .get("declarations")
            .and_then(Value::as_array)
            .is_some_and(|declarators| {
                declarators.iter().any(|dec| {
                    MATCH_REQUIRE.matches(dec).is_some()
                        || MATCH_REQUIRE_WITH_PROPERTY.matches(dec).is_some()
                })
            })
}

/// Split one variable declaration into per-declarator replacement statements,
/// keeping the original order. Declarators that classify as imports become
/// import declarations; the rest are rewrapped one per statement with the
/// original declaration kind.
fn rewrite_statement(statement: &Value) -> Vec<Value> {
    let kind = statement
        .get("kind")
        .and_then(Value::as_str)
        .unwrap_or("var");
    let declarators = statement
        .get("declarations")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut replacements: Vec<Value> = declarators
        .iter()
        .map(|dec| classify(dec).unwrap_or_else(|| variable_declaration(kind, vec![dec.clone()])))
        .collect();

    // Comment attachments survive on the first replacement; where they end
    // up in the output is the printer's concern.
    if let (Some(first), Some(comments)) = (replacements.first_mut(), statement.get("comments")) {
        first["comments"] = comments.clone();
    }
    replacements
}

/// Convert one declarator to an import declaration when it is a recognized
/// require idiom. `None` means "keep it as a variable declaration".
fn classify(declarator: &Value) -> Option<Value> {
    if let Some(m) = MATCH_REQUIRE.matches(declarator) {
        let id = &m["id"];
        let source = m["sources"][0].clone();
        if is_object_pattern(id) {
            Some(pattern_to_named_import(id, source))
        } else {
            Some(import_declaration(
                vec![import_default_specifier(id.clone())],
                source,
            ))
        }
    } else if let Some(m) = MATCH_REQUIRE_WITH_PROPERTY.matches(declarator) {
        let source = m["sources"][0].clone();
        Some(import_declaration(
            vec![specifier_for(m["id"].clone(), m["property"].clone())],
            source,
        ))
    } else {
        None
    }
}

fn pattern_to_named_import(object_pattern: &Value, source: Value) -> Value {
    let specifiers = object_pattern["properties"]
        .as_array()
        .map(|props| {
            props
                .iter()
                .map(|prop| specifier_for(prop["value"].clone(), prop["key"].clone()))
                .collect()
        })
        .unwrap_or_default();
    import_declaration(specifiers, source)
}

/// `{default: x}` and `.default` both denote the default binding, not a
/// named import literally called `default`.
fn specifier_for(local: Value, imported: Value) -> Value {
    if identifier_name(&imported) == Some("default") {
        import_default_specifier(local)
    } else {
        import_specifier(local, imported)
    }
}

// matches Property with identifier key and value (shorthand or renamed),
// never computed
static IS_SIMPLE_PROPERTY: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::fields([
        ("type", Pattern::exact("Property")),
        ("key", Pattern::predicate(is_identifier)),
        ("computed", Pattern::exact(false)),
        ("value", Pattern::predicate(is_identifier)),
    ])
});

fn is_simple_property(node: &Value) -> bool {
    IS_SIMPLE_PROPERTY.matches(node).is_some()
}

// matches: {a, b: myB, c, ...}; any computed key, non-identifier member or
// nested pattern disqualifies the whole pattern
fn is_object_pattern(node: &Value) -> bool {
    is_type(node, "ObjectPattern")
        && node
            .get("properties")
            .and_then(Value::as_array)
            .is_some_and(|props| props.iter().all(is_simple_property))
}

// matches: require(<string literal>), capturing the argument list
fn require_call() -> Pattern {
    Pattern::fields([
        ("type", Pattern::exact("CallExpression")),
        (
            "callee",
            Pattern::fields([
                ("type", Pattern::exact("Identifier")),
                ("name", Pattern::exact("require")),
            ]),
        ),
        (
            "arguments",
            Pattern::capture(
                "sources",
                Pattern::predicate(|args| {
                    args.as_array()
                        .is_some_and(|args| args.len() == 1 && is_string_literal(&args[0]))
                }),
            ),
        ),
    ])
}

// matches: <id> = require(<source>)
static MATCH_REQUIRE: LazyLock<Pattern> = LazyLock::new(|| {
    let pattern = Pattern::fields([
        ("type", Pattern::exact("VariableDeclarator")),
        (
            "id",
            Pattern::capture(
                "id",
                Pattern::predicate(|id| is_identifier(id) || is_object_pattern(id)),
            ),
        ),
        ("init", require_call()),
    ]);
    pattern.validate().expect("invalid require pattern");
    pattern
});

// matches: <id> = require(<source>).<property>
static MATCH_REQUIRE_WITH_PROPERTY: LazyLock<Pattern> = LazyLock::new(|| {
    let pattern = Pattern::fields([
        ("type", Pattern::exact("VariableDeclarator")),
        (
            "id",
            Pattern::capture("id", Pattern::predicate(is_identifier)),
        ),
        (
            "init",
            Pattern::fields([
                ("type", Pattern::exact("MemberExpression")),
                ("computed", Pattern::exact(false)),
                ("object", require_call()),
                (
                    "property",
                    Pattern::capture(
                        "property",
                        Pattern::fields([("type", Pattern::exact("Identifier"))]),
                    ),
                ),
            ]),
        ),
    ]);
    pattern.validate().expect("invalid require pattern");
    pattern
});
