//! Transform system for module-idiom rewrites.
//!
//! Each transform rewrites one family of idioms over an ESTree document.
//! Transforms are infallible by contract: a construct they cannot safely
//! rewrite stays untouched, optionally with a warning through the logger.

pub mod commonjs;

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::config::TransformsConfig;
use crate::estree::node_type;
use crate::logger::Logger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub trait Transform: Send + Sync {
    fn metadata(&self) -> &TransformMetadata;
    fn apply(&self, program: &mut Value, logger: &mut dyn Logger);
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("document root must be a Program node, found {found}")]
    UnsupportedRoot { found: String },
}

pub struct TransformRegistry {
    transforms: Vec<Box<dyn Transform>>,
    enabled: Vec<String>,
    disabled: HashSet<String>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
            enabled: Vec::new(),
            disabled: HashSet::new(),
        }
    }

    pub fn register(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    pub fn configure(&mut self, config: &TransformsConfig) {
        self.enabled = config.enabled.clone();
        self.disabled = config.disabled.iter().cloned().collect();
    }

    pub fn transforms(&self) -> impl Iterator<Item = &dyn Transform> {
        self.transforms.iter().map(|t| t.as_ref())
    }

    pub fn get(&self, id_or_name: &str) -> Option<&dyn Transform> {
        self.transforms
            .iter()
            .find(|t| {
                let metadata = t.metadata();
                metadata.id == id_or_name || metadata.name == id_or_name
            })
            .map(|t| t.as_ref())
    }

    /// Run every enabled transform over the document, in registration order.
    ///
    /// The root must be a `Program` node; everything below that degrades to
    /// "leave the input unchanged" per transform.
    pub fn run_all(
        &self,
        program: &mut Value,
        logger: &mut dyn Logger,
    ) -> Result<(), TransformError> {
        match node_type(program) {
            Some("Program") => {}
            found => {
                return Err(TransformError::UnsupportedRoot {
                    found: found.unwrap_or("a non-node value").to_string(),
                });
            }
        }

        for transform in self.transforms.iter().filter(|t| self.should_run(t.as_ref())) {
            debug!(transform = transform.metadata().name, "applying transform");
            transform.apply(program, logger);
        }
        Ok(())
    }

    fn should_run(&self, transform: &dyn Transform) -> bool {
        let metadata = transform.metadata();
        if self.disabled.contains(metadata.id) || self.disabled.contains(metadata.name) {
            return false;
        }
        self.enabled.is_empty()
            || self
                .enabled
                .iter()
                .any(|e| e == metadata.id || e == metadata.name)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[macro_export]
macro_rules! declare_transform {
    (
        $name:ident,
        id = $id:literal,
        name = $t_name:literal,
        description = $desc:literal
    ) => {
        pub struct $name {
            metadata: $crate::transform::TransformMetadata,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    metadata: $crate::transform::TransformMetadata {
                        id: $id,
                        name: $t_name,
                        description: $desc,
                    },
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
