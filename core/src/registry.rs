// revpool/src/registry.rs

//! Defines the `StepRegistry`, the per-collection workflow configuration:
//! an ordered list of steps, each with a reviewer group and a set of
//! permitted actions.
//!
//! Configuration is written once, at collection-creation time, and is pure
//! lookup afterwards. A collection with no entry (or a registered empty
//! step list) has no workflow: submissions to it skip the task engine and
//! archive immediately. That is a valid, common configuration, not an
//! error.

use crate::core::action::ActionKind;
use crate::core::ids::CollectionId;
use crate::core::step::{Step, StepConfig};
use crate::error::{RevpoolError, RevpoolResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

/// Per-collection workflow configuration.
#[derive(Default)]
pub struct StepRegistry {
  workflows: RwLock<HashMap<CollectionId, Arc<Vec<Step>>>>,
}

impl StepRegistry {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a collection's workflow. Called once per collection;
  /// registering the same collection twice is a configuration error
  /// (mid-workflow reconfiguration is not supported).
  ///
  /// An empty `configs` list is accepted and means "no workflow":
  /// submissions archive immediately.
  pub fn register(&self, collection: CollectionId, configs: Vec<StepConfig>) -> RevpoolResult<()> {
    for (idx, config) in configs.iter().enumerate() {
      if config.actions.is_empty() {
        return Err(RevpoolError::Config {
          message: format!("step '{}' has an empty action set", config.name),
        });
      }
      if configs[..idx].iter().any(|prior| prior.name == config.name) {
        return Err(RevpoolError::Config {
          message: format!("duplicate step name '{}'", config.name),
        });
      }
    }

    let steps: Vec<Step> = configs
      .into_iter()
      .enumerate()
      .map(|(idx, config)| Step {
        name: config.name,
        ordinal: idx + 1,
        group: config.group,
        actions: config.actions,
        primary_action: config.primary_action,
      })
      .collect();

    let mut workflows = self.workflows.write();
    if workflows.contains_key(&collection) {
      return Err(RevpoolError::Config {
        message: format!("collection {} already has a configured workflow", collection),
      });
    }
    event!(
      Level::DEBUG,
      %collection,
      step_count = steps.len(),
      "Registering collection workflow."
    );
    workflows.insert(collection, Arc::new(steps));
    Ok(())
  }

  /// The ordered step list for `collection`, or `None` when the collection
  /// has no configured workflow.
  pub fn steps_for(&self, collection: CollectionId) -> Option<Arc<Vec<Step>>> {
    self.workflows.read().get(&collection).cloned()
  }

  /// Number of steps configured for `collection` (zero when unconfigured).
  pub fn step_count(&self, collection: CollectionId) -> usize {
    self.steps_for(collection).map_or(0, |steps| steps.len())
  }

  /// Looks a step up by name within a collection's workflow.
  pub fn step_by_name(&self, collection: CollectionId, name: &str) -> RevpoolResult<Step> {
    self
      .steps_for(collection)
      .and_then(|steps| steps.iter().find(|s| s.name == name).cloned())
      .ok_or_else(|| {
        RevpoolError::not_found(format!("step '{}' in collection {}", name, collection))
      })
  }

  /// The step at a 1-based ordinal, or `None` past the end of the workflow
  /// (the engine treats past-the-end as "archive the item").
  pub fn step_at(&self, collection: CollectionId, ordinal: usize) -> Option<Step> {
    if ordinal == 0 {
      return None;
    }
    self
      .steps_for(collection)
      .and_then(|steps| steps.get(ordinal - 1).cloned())
  }

  /// Whether `kind` is legal while a task of `step` is claimed.
  pub fn action_legal_for_step(&self, step: &Step, kind: ActionKind) -> bool {
    step.permits(kind)
  }
}
