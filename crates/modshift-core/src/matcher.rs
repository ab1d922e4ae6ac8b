//! Declarative pattern matching over ESTree-shaped JSON nodes.
//!
//! A [`Pattern`] describes the shape a node must have; a successful match
//! yields the sub-values that [`Pattern::capture`] wrappers were bound to.
//! Field matching is open: fields a pattern does not mention never cause a
//! failure, and a field the node lacks is simply a non-match, never an error.
//! Matching is pure and deterministic; the tree is never mutated.

use std::collections::{HashMap, HashSet};
use std::ops::Index;

use serde_json::Value;

/// Errors detected when validating a pattern's construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("duplicate capture name '{0}' in pattern")]
    DuplicateCapture(String),
}

/// A declarative description of a node shape.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches values deep-equal to the expected one.
    Exact(Value),
    /// Matches objects whose listed fields each match their sub-pattern.
    /// Unlisted fields are unconstrained.
    Fields(Vec<(&'static str, Pattern)>),
    /// Matches values the function accepts. The function sees the raw value.
    Predicate(fn(&Value) -> bool),
    /// Matches whatever the inner pattern matches, and on success records
    /// the matched value under the given name.
    Capture(&'static str, Box<Pattern>),
}

impl Pattern {
    pub fn exact(expected: impl Into<Value>) -> Self {
        Pattern::Exact(expected.into())
    }

    pub fn fields(fields: impl IntoIterator<Item = (&'static str, Pattern)>) -> Self {
        Pattern::Fields(fields.into_iter().collect())
    }

    pub fn predicate(test: fn(&Value) -> bool) -> Self {
        Pattern::Predicate(test)
    }

    pub fn capture(name: &'static str, inner: Pattern) -> Self {
        Pattern::Capture(name, Box::new(inner))
    }

    /// Match `node` against this pattern, returning the captured sub-values
    /// on success.
    pub fn matches<'a>(&self, node: &'a Value) -> Option<Captures<'a>> {
        let mut captures = Captures::default();
        if self.matches_into(node, &mut captures) {
            Some(captures)
        } else {
            None
        }
    }

    fn matches_into<'a>(&self, node: &'a Value, captures: &mut Captures<'a>) -> bool {
        match self {
            Pattern::Exact(expected) => node == expected,
            Pattern::Fields(fields) => fields.iter().all(|(name, sub)| {
                node.get(*name)
                    .is_some_and(|child| sub.matches_into(child, captures))
            }),
            Pattern::Predicate(test) => test(node),
            Pattern::Capture(name, inner) => {
                if inner.matches_into(node, captures) {
                    captures.map.insert(*name, node);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Check that every capture name in this pattern tree is unique.
    ///
    /// A colliding name would silently overwrite an earlier capture during
    /// matching, so catalogs validate their patterns once at construction.
    /// Predicates are opaque to this check; a predicate must not capture.
    pub fn validate(&self) -> Result<(), PatternError> {
        let mut seen = HashSet::new();
        self.collect_capture_names(&mut seen)
    }

    fn collect_capture_names(
        &self,
        seen: &mut HashSet<&'static str>,
    ) -> Result<(), PatternError> {
        match self {
            Pattern::Exact(_) | Pattern::Predicate(_) => Ok(()),
            Pattern::Fields(fields) => {
                for (_, sub) in fields {
                    sub.collect_capture_names(seen)?;
                }
                Ok(())
            }
            Pattern::Capture(name, inner) => {
                if !seen.insert(*name) {
                    return Err(PatternError::DuplicateCapture((*name).to_string()));
                }
                inner.collect_capture_names(seen)
            }
        }
    }
}

/// The sub-values a successful match bound, keyed by capture name.
#[derive(Debug, Default, Clone)]
pub struct Captures<'a> {
    map: HashMap<&'static str, &'a Value>,
}

impl<'a> Captures<'a> {
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Panics when the name was not captured; catalogs guarantee by validation
/// that every name their classifiers read is present on success.
impl Index<&str> for Captures<'_> {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(value) => value,
            None => panic!("capture '{name}' not bound by pattern"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_identifier(node: &Value) -> bool {
        node.get("type").and_then(Value::as_str) == Some("Identifier")
    }

    #[test]
    fn exact_matches_deep_equal_values() {
        let pattern = Pattern::exact("Identifier");
        assert!(pattern.matches(&json!("Identifier")).is_some());
        assert!(pattern.matches(&json!("Literal")).is_none());

        let object = Pattern::exact(json!({"a": [1, 2]}));
        assert!(object.matches(&json!({"a": [1, 2]})).is_some());
        assert!(object.matches(&json!({"a": [1, 2], "b": 3})).is_none());
    }

    #[test]
    fn fields_match_each_listed_field() {
        let pattern = Pattern::fields([
            ("type", Pattern::exact("Identifier")),
            ("name", Pattern::exact("require")),
        ]);

        assert!(
            pattern
                .matches(&json!({"type": "Identifier", "name": "require"}))
                .is_some()
        );
        assert!(
            pattern
                .matches(&json!({"type": "Identifier", "name": "import"}))
                .is_none()
        );
    }

    #[test]
    fn fields_matching_is_open() {
        let pattern = Pattern::fields([("type", Pattern::exact("Identifier"))]);
        let node = json!({"type": "Identifier", "name": "x", "loc": {"start": {}}});

        assert!(pattern.matches(&node).is_some());
    }

    #[test]
    fn missing_field_is_a_non_match() {
        let pattern = Pattern::fields([("computed", Pattern::exact(false))]);

        assert!(pattern.matches(&json!({"type": "Property"})).is_none());
        assert!(
            pattern
                .matches(&json!({"type": "Property", "computed": false}))
                .is_some()
        );
    }

    #[test]
    fn nested_field_patterns() {
        let pattern = Pattern::fields([
            ("type", Pattern::exact("CallExpression")),
            (
                "callee",
                Pattern::fields([
                    ("type", Pattern::exact("Identifier")),
                    ("name", Pattern::exact("require")),
                ]),
            ),
        ]);
        let node = json!({
            "type": "CallExpression",
            "callee": {"type": "Identifier", "name": "require"},
            "arguments": [],
        });

        assert!(pattern.matches(&node).is_some());
    }

    #[test]
    fn predicate_sees_the_raw_value() {
        let pattern = Pattern::fields([("id", Pattern::predicate(is_identifier))]);

        assert!(
            pattern
                .matches(&json!({"id": {"type": "Identifier", "name": "a"}}))
                .is_some()
        );
        assert!(
            pattern
                .matches(&json!({"id": {"type": "ObjectPattern"}}))
                .is_none()
        );
    }

    #[test]
    fn capture_records_the_matched_value() {
        let pattern = Pattern::fields([(
            "id",
            Pattern::capture("id", Pattern::predicate(is_identifier)),
        )]);
        let node = json!({"id": {"type": "Identifier", "name": "a"}});

        let captures = pattern.matches(&node).unwrap();
        assert_eq!(captures["id"], json!({"type": "Identifier", "name": "a"}));
    }

    #[test]
    fn failed_capture_fails_the_match() {
        let pattern = Pattern::capture("id", Pattern::exact("x"));

        assert!(pattern.matches(&json!("y")).is_none());
    }

    #[test]
    fn captures_merge_across_fields() {
        let pattern = Pattern::fields([
            ("a", Pattern::capture("first", Pattern::predicate(|_| true))),
            ("b", Pattern::capture("second", Pattern::predicate(|_| true))),
        ]);
        let node = json!({"a": 1, "b": 2});

        let captures = pattern.matches(&node).unwrap();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures["first"], json!(1));
        assert_eq!(captures["second"], json!(2));
    }

    #[test]
    fn matching_is_deterministic() {
        let pattern = Pattern::fields([
            ("type", Pattern::exact("Identifier")),
            ("name", Pattern::capture("name", Pattern::predicate(|_| true))),
        ]);
        let node = json!({"type": "Identifier", "name": "x"});

        let first = pattern.matches(&node).unwrap();
        let second = pattern.matches(&node).unwrap();
        assert_eq!(first["name"], second["name"]);
    }

    #[test]
    fn validate_accepts_unique_capture_names() {
        let pattern = Pattern::fields([
            ("a", Pattern::capture("a", Pattern::predicate(|_| true))),
            ("b", Pattern::capture("b", Pattern::predicate(|_| true))),
        ]);

        assert_eq!(pattern.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_duplicate_capture_names() {
        let pattern = Pattern::fields([
            ("a", Pattern::capture("dup", Pattern::predicate(|_| true))),
            ("b", Pattern::capture("dup", Pattern::predicate(|_| true))),
        ]);

        assert_eq!(
            pattern.validate(),
            Err(PatternError::DuplicateCapture("dup".to_string()))
        );
    }

    #[test]
    fn validate_rejects_nested_duplicate_capture_names() {
        let pattern = Pattern::capture(
            "dup",
            Pattern::fields([("x", Pattern::capture("dup", Pattern::predicate(|_| true)))]),
        );

        assert_eq!(
            pattern.validate(),
            Err(PatternError::DuplicateCapture("dup".to_string()))
        );
    }

    #[test]
    #[should_panic(expected = "capture 'missing' not bound")]
    fn indexing_an_unbound_capture_panics() {
        let captures = Captures::default();
        let _ = &captures["missing"];
    }
}
