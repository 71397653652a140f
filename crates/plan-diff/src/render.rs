//! Annotated, YAML-like rendering of the difference between two values

use serde::Serialize;
use serde_json::{Map, Value};

use crate::markup::Escape;

/// Maximum nesting depth rendered line by line
const MAX_RENDER_DEPTH: usize = 128;

/// Classification attached to a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Added,
    Updated,
    Removed,
    Unchanged,
}

impl Tag {
    fn compare(before: Option<&Value>, after: &Value) -> Self {
        match before {
            None => Tag::Added,
            Some(b) if b == after => Tag::Unchanged,
            Some(_) => Tag::Updated,
        }
    }

    /// CSS class used by the markup output; unchanged lines have none.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Tag::Added => Some("diff-add"),
            Tag::Updated => Some("diff-update"),
            Tag::Removed => Some("diff-del"),
            Tag::Unchanged => None,
        }
    }

    /// Single-character prefix for plain-text output
    pub fn marker(&self) -> char {
        match self {
            Tag::Added => '+',
            Tag::Updated => '~',
            Tag::Removed => '-',
            Tag::Unchanged => ' ',
        }
    }
}

/// One line of rendered output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedLine {
    pub depth: usize,
    pub tag: Tag,
    /// Line content, escaped according to [`RenderOptions::escape`]
    pub text: String,
}

impl AnnotatedLine {
    pub fn new(depth: usize, tag: Tag, text: impl Into<String>) -> Self {
        Self {
            depth,
            tag,
            text: text.into(),
        }
    }

    /// Text indented by two spaces per depth level
    pub fn indented(&self) -> String {
        format!("{}{}", "  ".repeat(self.depth), self.text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Skip keys and indices that only exist in `before`
    pub suppress_removals: bool,
    pub escape: Escape,
}

impl RenderOptions {
    pub fn suppressing_removals(mut self, suppress: bool) -> Self {
        self.suppress_removals = suppress;
        self
    }

    pub fn with_escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }
}

/// Render the difference between `before` and `after`.
///
/// The shape of `after` drives the walk. When `before` has a different
/// shape it is treated as an empty mapping or sequence, so a type change
/// shows up as added content rather than failing. Mapping keys are visited
/// in sorted order, then keys only `before` has are listed as removed.
/// Sequences are compared position by position.
///
/// ```
/// use plan_diff::{render, RenderOptions, Tag};
/// use serde_json::json;
///
/// let lines = render(&json!({"a": 1, "b": 2}), &json!({"a": 1}), &RenderOptions::default());
/// assert_eq!(lines[0].text, "a: 1");
/// assert_eq!(lines[1].tag, Tag::Removed);
/// ```
pub fn render(before: &Value, after: &Value, options: &RenderOptions) -> Vec<AnnotatedLine> {
    let mut renderer = Renderer {
        options,
        lines: Vec::new(),
    };
    renderer.value(before, after, 0);
    renderer.lines
}

/// Where a value sits inside its parent
#[derive(Clone, Copy)]
enum Label<'k> {
    Key(&'k str),
    Item,
}

struct Renderer<'o> {
    options: &'o RenderOptions,
    lines: Vec<AnnotatedLine>,
}

impl Renderer<'_> {
    fn value(&mut self, before: &Value, after: &Value, depth: usize) {
        match after {
            Value::Object(after_map) => {
                let empty = Map::new();
                let before_map = before.as_object().unwrap_or(&empty);
                self.mapping(before_map, after_map, depth);
            }
            Value::Array(after_items) => {
                let before_items = before.as_array().map(Vec::as_slice).unwrap_or_default();
                self.sequence(before_items, after_items, depth);
            }
            scalar => {
                let tag = Tag::compare(Some(before), scalar);
                let text = self.scalar(scalar);
                self.push(depth, tag, text);
            }
        }
    }

    fn mapping(&mut self, before: &Map<String, Value>, after: &Map<String, Value>, depth: usize) {
        let mut keys: Vec<&String> = after.keys().collect();
        keys.sort();

        for key in keys {
            let before_value = before.get(key);
            let after_value = &after[key];
            let tag = Tag::compare(before_value, after_value);
            self.entry(Label::Key(key), before_value, after_value, tag, depth);
        }

        if self.options.suppress_removals {
            return;
        }

        let mut removed: Vec<(&String, &Value)> = before
            .iter()
            .filter(|(key, _)| !after.contains_key(*key))
            .collect();
        removed.sort_by(|a, b| a.0.cmp(b.0));

        for (key, value) in removed {
            let text = self.inline(Label::Key(key), value);
            self.push(depth, Tag::Removed, text);
        }
    }

    fn sequence(&mut self, before: &[Value], after: &[Value], depth: usize) {
        let len = before.len().max(after.len());

        for index in 0..len {
            match (before.get(index), after.get(index)) {
                (before_item, Some(after_item)) => {
                    let tag = Tag::compare(before_item, after_item);
                    self.entry(Label::Item, before_item, after_item, tag, depth);
                }
                (Some(before_item), None) => {
                    if !self.options.suppress_removals {
                        let text = self.inline(Label::Item, before_item);
                        self.push(depth, Tag::Removed, text);
                    }
                }
                (None, None) => unreachable!(),
            }
        }
    }

    /// Emit a keyed or listed value: a header plus nested lines for
    /// containers, a single inline line for scalars. Containers at the depth
    /// limit are emitted inline as compact JSON.
    fn entry(
        &mut self,
        label: Label<'_>,
        before: Option<&Value>,
        after: &Value,
        tag: Tag,
        depth: usize,
    ) {
        match after {
            Value::Object(_) | Value::Array(_) if depth < MAX_RENDER_DEPTH => {
                let header = self.header(label);
                self.push(depth, tag, header);
                self.value(before.unwrap_or(&Value::Null), after, depth + 1);
            }
            _ => {
                let text = self.inline(label, after);
                self.push(depth, tag, text);
            }
        }
    }

    fn header(&self, label: Label<'_>) -> String {
        match label {
            Label::Key(key) => format!("{}:", self.options.escape.apply(key)),
            Label::Item => "-".to_string(),
        }
    }

    fn inline(&self, label: Label<'_>, value: &Value) -> String {
        let text = self.scalar(value);
        match label {
            Label::Key(key) => format!("{}: {}", self.options.escape.apply(key), text),
            Label::Item => format!("- {text}"),
        }
    }

    fn scalar(&self, value: &Value) -> String {
        let raw = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.options.escape.apply(&raw).into_owned()
    }

    fn push(&mut self, depth: usize, tag: Tag, text: String) {
        self.lines.push(AnnotatedLine::new(depth, tag, text));
    }
}
