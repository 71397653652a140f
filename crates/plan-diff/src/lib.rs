//! Annotated before/after diffs for infrastructure plans
//!
//! Each stage is a pure function over `serde_json::Value` trees:
//! [`normalize`] strips empty values, [`extract_changes`] reduces an update
//! to its changed paths, [`restrict_before`] drops fields a replace will not
//! keep, [`redact`] masks sensitive keys, and [`render`] produces annotated
//! lines. [`render_resource`] chains them for one planned resource, and
//! [`build_report`] turns a whole plan into change entries.

pub mod action;
pub mod error;
pub mod extract;
pub mod markup;
pub mod normalize;
pub mod redact;
pub mod render;
pub mod report;
pub mod resource;
pub mod restrict;

pub use action::{Action, ActionSet};
pub use error::{Error, Result};
pub use extract::{Extracted, extract_changes};
pub use markup::{Escape, escape_html, to_markup};
pub use normalize::normalize;
pub use redact::{REDACTION_MASK, RedactionKeys, redact};
pub use render::{AnnotatedLine, RenderOptions, Tag, render};
pub use report::{
    ChangeEntry, Report, ReportOptions, build_entries, build_report, group_entries,
};
pub use resource::{
    PreparedDiff, ResourceChange, prepare, render_resource, render_resource_markup,
};
pub use restrict::{restrict_before, restrict_value};
