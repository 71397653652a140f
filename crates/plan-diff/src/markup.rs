//! Presentation of annotated lines as inline HTML markup

use std::borrow::Cow;

use crate::render::AnnotatedLine;

/// How rendered keys and scalars are escaped before they are put on a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escape {
    /// Neutralize markup-significant characters, for HTML embedding
    #[default]
    Html,
    /// Leave text as-is, for terminals and plain text
    None,
}

impl Escape {
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Escape::Html => escape_html(text),
            Escape::None => Cow::Borrowed(text),
        }
    }
}

/// Escape `& < > " '` for safe embedding in HTML text and attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Join lines into one blob, two spaces of indent per depth.
///
/// Tagged lines are wrapped in `<span class="diff-add|diff-update|diff-del">`;
/// unchanged lines carry no markup. Line text is expected to be escaped
/// already (see [`Escape::Html`]).
pub fn to_markup(lines: &[AnnotatedLine]) -> String {
    lines
        .iter()
        .map(|line| {
            let pad = "  ".repeat(line.depth);
            match line.tag.css_class() {
                Some(class) => format!(r#"{pad}<span class="{class}">{}</span>"#, line.text),
                None => format!("{pad}{}", line.text),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
