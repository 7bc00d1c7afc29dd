// revpool/src/core/action.rs

//! Defines the actions a claimed task's owner may perform, and the
//! payload-free discriminant used in step configuration.
//!
//! Actions are a tagged union rather than request-parameter strings: a
//! reject always carries its reason, an edit always carries its patch, and
//! legality against the step's configured set is checked on the
//! discriminant before any effect runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action submitted against a claimed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
  /// Advance the item past the current step (or publish it, on the final step).
  Approve,
  /// Return the item to the submitter's workspace. The reason is mandatory.
  Reject { reason: String },
  /// Mutate the submission's metadata in place; the task stays claimed.
  EditMetadata { patch: serde_json::Value },
}

impl Action {
  pub fn kind(&self) -> ActionKind {
    match self {
      Action::Approve => ActionKind::Approve,
      Action::Reject { .. } => ActionKind::Reject,
      Action::EditMetadata { .. } => ActionKind::EditMetadata,
    }
  }
}

/// Discriminant of [`Action`], used in a step's configured legality set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
  Approve,
  Reject,
  EditMetadata,
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ActionKind::Approve => "approve",
      ActionKind::Reject => "reject",
      ActionKind::EditMetadata => "edit_metadata",
    };
    f.write_str(name)
  }
}
