//! Per-resource pipeline: normalize, reduce or restrict, redact, render

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::ActionSet;
use crate::extract::extract_changes;
use crate::markup::to_markup;
use crate::normalize::normalize;
use crate::redact::{RedactionKeys, redact};
use crate::render::{AnnotatedLine, RenderOptions, render};
use crate::restrict::restrict_value;

/// One planned change to one resource, as supplied by the plan reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub address: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub actions: ActionSet,
    /// Prior state; `None` when the resource does not exist yet
    #[serde(default)]
    pub before: Option<Value>,
    /// Planned state; `None` when the resource is being destroyed
    #[serde(default)]
    pub after: Option<Value>,
}

impl ResourceChange {
    pub fn new(
        address: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<String>,
        actions: ActionSet,
    ) -> Self {
        Self {
            address: address.into(),
            resource_type: resource_type.into(),
            name: name.into(),
            actions,
            before: None,
            after: None,
        }
    }

    pub fn with_before(mut self, before: Value) -> Self {
        self.before = Some(before);
        self
    }

    pub fn with_after(mut self, after: Value) -> Self {
        self.after = Some(after);
        self
    }

    /// Normalized before side, an empty mapping when absent
    pub fn normalized_before(&self) -> Value {
        normalize_side(self.before.as_ref())
    }

    /// Normalized after side, an empty mapping when absent
    pub fn normalized_after(&self) -> Value {
        normalize_side(self.after.as_ref())
    }

    /// Whether the resource is worth showing: not a no-op, and the
    /// normalized sides differ.
    pub fn has_effective_change(&self) -> bool {
        !self.actions.is_noop() && self.normalized_before() != self.normalized_after()
    }
}

fn normalize_side(side: Option<&Value>) -> Value {
    match side {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => normalize(value),
    }
}

fn or_empty(side: Option<Value>) -> Value {
    side.unwrap_or_else(|| Value::Object(Map::new()))
}

/// Before/after pair ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDiff {
    pub before: Value,
    pub after: Value,
    pub suppress_removals: bool,
}

/// Run everything up to rendering. Returns `None` for a no-op.
pub fn prepare(change: &ResourceChange, keys: &RedactionKeys) -> Option<PreparedDiff> {
    if change.actions.is_noop() {
        tracing::debug!(address = %change.address, "Skipping no-op resource");
        return None;
    }

    let before = change.normalized_before();
    let after = change.normalized_after();

    let (before, after, suppress_removals) = if change.actions.is_plain_update() {
        tracing::trace!(address = %change.address, "Reducing update to changed paths");
        let (b, a) = extract_changes(&before, &after);
        (or_empty(b), or_empty(a), false)
    } else if change.actions.is_replace() {
        tracing::trace!(address = %change.address, "Restricting replaced resource to surviving keys");
        (restrict_value(&before, &after), after, true)
    } else {
        (before, after, false)
    };

    Some(PreparedDiff {
        before: redact(&before, keys),
        after: redact(&after, keys),
        suppress_removals,
    })
}

/// Render one resource change as annotated lines.
///
/// A no-op renders nothing. A replace always suppresses removals on top of
/// whatever `options` asks for.
pub fn render_resource(
    change: &ResourceChange,
    keys: &RedactionKeys,
    options: &RenderOptions,
) -> Vec<AnnotatedLine> {
    match prepare(change, keys) {
        Some(prepared) => {
            let options = options
                .suppressing_removals(options.suppress_removals || prepared.suppress_removals);
            render(&prepared.before, &prepared.after, &options)
        }
        None => Vec::new(),
    }
}

/// Render one resource change as an HTML markup blob.
pub fn render_resource_markup(change: &ResourceChange, keys: &RedactionKeys) -> String {
    to_markup(&render_resource(change, keys, &RenderOptions::default()))
}
