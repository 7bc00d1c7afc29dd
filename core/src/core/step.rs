// revpool/src/core/step.rs

//! Defines the structure of a single review step within a collection's workflow.

use crate::core::action::ActionKind;
use crate::core::ids::GroupId;
use serde::{Deserialize, Serialize};

/// Configuration for one step, as handed to the registry at
/// collection-creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
  /// Step name, unique within the collection's workflow (e.g. "reviewstep").
  pub name: String,
  /// The group whose members may claim this step's pool tasks.
  pub group: GroupId,
  /// Action kinds legal while a task of this step is claimed.
  pub actions: Vec<ActionKind>,
  /// Action-context name stamped onto claimed tasks of this step
  /// (e.g. "reviewaction", "editaction", "finaleditaction").
  pub primary_action: String,
}

impl StepConfig {
  pub fn new(
    name: impl Into<String>,
    group: GroupId,
    actions: Vec<ActionKind>,
    primary_action: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      group,
      actions,
      primary_action: primary_action.into(),
    }
  }
}

/// A registered step: a [`StepConfig`] plus its 1-based position in the
/// collection's workflow. Immutable after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
  pub name: String,
  /// 1-based position within the workflow.
  pub ordinal: usize,
  pub group: GroupId,
  pub actions: Vec<ActionKind>,
  pub primary_action: String,
}

impl Step {
  /// Whether `kind` is in this step's configured legality set.
  pub fn permits(&self, kind: ActionKind) -> bool {
    self.actions.contains(&kind)
  }
}
