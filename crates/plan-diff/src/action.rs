//! Declared lifecycle actions for a planned resource change

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single action tag as reported by the planning tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Create,
    Update,
    Delete,
    /// Nothing changes; callers skip the resource.
    NoOp,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::NoOp => "no-op",
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "no-op" => Ok(Action::NoOp),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of actions declared for one resource.
///
/// The shape of the list decides how a resource is diffed:
/// - exactly `["no-op"]`: skipped
/// - exactly `["update"]`: reduced to the changed paths first
/// - both `create` and `delete`: a replace, removals are suppressed
/// - anything else: full-tree add/delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(Vec<Action>);

impl ActionSet {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self(actions.into_iter().collect())
    }

    /// Parse a list of raw tags, failing on the first unknown one.
    pub fn parse<I, S>(tags: I) -> std::result::Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .map(|tag| tag.as_ref().parse())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn actions(&self) -> &[Action] {
        &self.0
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_noop(&self) -> bool {
        self.0 == [Action::NoOp]
    }

    pub fn is_plain_update(&self) -> bool {
        self.0 == [Action::Update]
    }

    pub fn is_replace(&self) -> bool {
        self.contains(Action::Create) && self.contains(Action::Delete)
    }
}

impl From<Vec<Action>> for ActionSet {
    fn from(actions: Vec<Action>) -> Self {
        Self(actions)
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.0.iter().map(Action::as_str).collect();
        f.write_str(&tags.join(", "))
    }
}
