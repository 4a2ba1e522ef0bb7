//! Execution context supplied by the workflow host
//!
//! The host owns parameter resolution and the continue-on-fail mode; this
//! module defines the seam the handlers read through, plus the record type
//! every operation produces.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Host-side view of one batch execution.
///
/// `resource` and `operation` are batch-level; everything else is read per
/// item index because hosts may resolve parameter expressions per item.
pub trait Execution {
    /// Resolved value of a named parameter for the given item, or `None`
    /// when the host did not supply it.
    fn parameter(&self, name: &str, index: usize) -> Option<Value>;

    /// Number of input items in the batch.
    fn item_count(&self) -> usize;

    /// Whether per-item failures become error records instead of aborting.
    fn continue_on_fail(&self) -> bool;
}

/// One produced record, tied back to the input item that caused it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    pub json: Value,
    pub source_item: usize,
}

impl OutputRecord {
    pub fn new(json: Value, source_item: usize) -> Self {
        Self { json, source_item }
    }

    /// Error-carrying record emitted in continue-on-fail mode.
    pub fn error(message: impl std::fmt::Display, source_item: usize) -> Self {
        Self {
            json: json!({ "error": message.to_string() }),
            source_item,
        }
    }
}

/// In-process [`Execution`] implementation: a batch-wide parameter map with
/// optional per-item overrides. Used by the CLI host and by tests.
#[derive(Debug, Clone, Default)]
pub struct BatchExecution {
    parameters: Map<String, Value>,
    items: Vec<Map<String, Value>>,
    continue_on_fail: bool,
}

impl BatchExecution {
    /// A batch of `item_count` items sharing one parameter map.
    pub fn new(parameters: Map<String, Value>, item_count: usize) -> Self {
        Self {
            parameters,
            items: vec![Map::new(); item_count],
            continue_on_fail: false,
        }
    }

    /// A batch whose per-item maps override the shared parameters.
    pub fn with_items(parameters: Map<String, Value>, items: Vec<Map<String, Value>>) -> Self {
        Self {
            parameters,
            items,
            continue_on_fail: false,
        }
    }

    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

impl Execution for BatchExecution {
    fn parameter(&self, name: &str, index: usize) -> Option<Value> {
        self.items
            .get(index)
            .and_then(|overrides| overrides.get(name))
            .or_else(|| self.parameters.get(name))
            .cloned()
    }

    fn item_count(&self) -> usize {
        // A batch always carries at least one item, matching workflow-host
        // convention for trigger-less runs.
        self.items.len().max(1)
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}
