//! Enter-phase tree traversal with node replacement.
//!
//! The driver walks an ESTree document once and shows every node to the
//! visitor before descending into its children. Visitors never touch the
//! tree themselves; they describe a replacement through [`Action`] and the
//! driver applies it, so a visitor cannot alias the sequence it is being
//! iterated over. Replacement subtrees are not re-entered.

use serde_json::Value;
use tracing::debug;

use crate::estree::{is_node, node_type};

/// What to do with the node the visitor was just shown.
#[derive(Debug)]
pub enum Action {
    /// Leave the node in place and descend into its children.
    Keep,
    /// Substitute the node with the given nodes. A multi-node replacement is
    /// honored where the node sits in a list (a statement body); elsewhere
    /// only a single-node replacement can be applied.
    Replace(Vec<Value>),
}

pub trait ReplaceVisitor {
    /// Called once per node, before its children. `parent_type` is the
    /// `type` tag of the owning node, `None` at the document root.
    fn enter(&mut self, node: &Value, parent_type: Option<&str>) -> Action;
}

/// Walk `root`, letting `visitor` replace nodes as it goes.
pub fn replace(root: &mut Value, visitor: &mut dyn ReplaceVisitor) {
    if !is_node(root) {
        return;
    }
    match visitor.enter(root, None) {
        Action::Keep => walk_children(root, visitor),
        Action::Replace(mut nodes) => {
            if nodes.len() == 1 {
                *root = nodes.remove(0);
            } else {
                debug!(
                    count = nodes.len(),
                    "ignoring multi-node replacement at the document root"
                );
                walk_children(root, visitor);
            }
        }
    }
}

fn walk_children(node: &mut Value, visitor: &mut dyn ReplaceVisitor) {
    // The parent tag outlives the mutable walk below.
    let parent_type = node_type(node).map(str::to_owned);
    let Some(fields) = node.as_object_mut() else {
        return;
    };
    for (_, child) in fields.iter_mut() {
        match child {
            Value::Object(_) => visit_child(child, parent_type.as_deref(), visitor),
            Value::Array(items) => visit_list(items, parent_type.as_deref(), visitor),
            _ => {}
        }
    }
}

fn visit_child(child: &mut Value, parent_type: Option<&str>, visitor: &mut dyn ReplaceVisitor) {
    if !is_node(child) {
        return;
    }
    match visitor.enter(child, parent_type) {
        Action::Keep => walk_children(child, visitor),
        Action::Replace(mut nodes) if nodes.len() == 1 => *child = nodes.remove(0),
        Action::Replace(nodes) => {
            debug!(
                count = nodes.len(),
                "ignoring multi-node replacement outside a statement list"
            );
            walk_children(child, visitor);
        }
    }
}

fn visit_list(items: &mut Vec<Value>, parent_type: Option<&str>, visitor: &mut dyn ReplaceVisitor) {
    let owned = std::mem::take(items);
    let mut rebuilt = Vec::with_capacity(owned.len());
    for mut item in owned {
        if !is_node(&item) {
            rebuilt.push(item);
            continue;
        }
        match visitor.enter(&item, parent_type) {
            Action::Keep => {
                walk_children(&mut item, visitor);
                rebuilt.push(item);
            }
            Action::Replace(nodes) => rebuilt.extend(nodes),
        }
    }
    *items = rebuilt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Recorder {
        visited: Vec<(String, Option<String>)>,
    }

    impl ReplaceVisitor for Recorder {
        fn enter(&mut self, node: &Value, parent_type: Option<&str>) -> Action {
            self.visited.push((
                node_type(node).unwrap_or("?").to_string(),
                parent_type.map(str::to_owned),
            ));
            Action::Keep
        }
    }

    struct SplitNumbers;

    impl ReplaceVisitor for SplitNumbers {
        fn enter(&mut self, node: &Value, _parent_type: Option<&str>) -> Action {
            if node_type(node) == Some("Pair") {
                Action::Replace(vec![
                    json!({"type": "Single", "value": node["a"]}),
                    json!({"type": "Single", "value": node["b"]}),
                ])
            } else {
                Action::Keep
            }
        }
    }

    #[test]
    fn visits_every_node_with_its_parent_type() {
        let mut tree = json!({
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {"type": "Identifier", "name": "x"},
            }],
        });
        let mut recorder = Recorder { visited: Vec::new() };

        replace(&mut tree, &mut recorder);

        assert_eq!(
            recorder.visited,
            vec![
                ("Program".to_string(), None),
                ("ExpressionStatement".to_string(), Some("Program".to_string())),
                ("Identifier".to_string(), Some("ExpressionStatement".to_string())),
            ]
        );
    }

    #[test]
    fn multi_node_replacement_splices_into_the_list() {
        let mut tree = json!({
            "type": "Program",
            "body": [
                {"type": "Marker", "name": "head"},
                {"type": "Pair", "a": 1, "b": 2},
                {"type": "Marker", "name": "tail"},
            ],
        });

        replace(&mut tree, &mut SplitNumbers);

        assert_eq!(
            tree["body"],
            json!([
                {"type": "Marker", "name": "head"},
                {"type": "Single", "value": 1},
                {"type": "Single", "value": 2},
                {"type": "Marker", "name": "tail"},
            ])
        );
    }

    #[test]
    fn single_node_replacement_applies_in_child_position() {
        struct Rename;
        impl ReplaceVisitor for Rename {
            fn enter(&mut self, node: &Value, _parent: Option<&str>) -> Action {
                if node_type(node) == Some("Old") {
                    Action::Replace(vec![json!({"type": "New"})])
                } else {
                    Action::Keep
                }
            }
        }

        let mut tree = json!({"type": "Wrapper", "inner": {"type": "Old"}});
        replace(&mut tree, &mut Rename);

        assert_eq!(tree["inner"], json!({"type": "New"}));
    }

    #[test]
    fn multi_node_replacement_outside_a_list_is_ignored() {
        let mut tree = json!({"type": "Wrapper", "inner": {"type": "Pair", "a": 1, "b": 2}});

        replace(&mut tree, &mut SplitNumbers);

        assert_eq!(tree["inner"]["type"], "Pair");
    }

    #[test]
    fn non_node_values_pass_through_untouched() {
        let mut tree = json!({
            "type": "Program",
            "sourceType": "module",
            "range": [0, 10],
            "loc": {"start": {"line": 1, "column": 0}},
            "body": [],
        });
        let before = tree.clone();
        let mut recorder = Recorder { visited: Vec::new() };

        replace(&mut tree, &mut recorder);

        assert_eq!(tree, before);
        assert_eq!(recorder.visited.len(), 1);
    }

    #[test]
    fn replacements_are_not_revisited() {
        struct CountPairs {
            seen: usize,
        }
        impl ReplaceVisitor for CountPairs {
            fn enter(&mut self, node: &Value, _parent: Option<&str>) -> Action {
                if node_type(node) == Some("Pair") {
                    self.seen += 1;
                    // The replacement contains another Pair; it must not be
                    // shown to the visitor again.
                    Action::Replace(vec![json!({"type": "Pair", "a": 0, "b": 0})])
                } else {
                    Action::Keep
                }
            }
        }

        let mut tree = json!({"type": "Program", "body": [{"type": "Pair", "a": 1, "b": 2}]});
        let mut counter = CountPairs { seen: 0 };

        replace(&mut tree, &mut counter);

        assert_eq!(counter.seen, 1);
    }
}
