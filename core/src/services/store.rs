// revpool/src/services/store.rs

//! Defines the `SubmissionStore` trait, the engine's window onto the
//! item/submission side of the repository, and an in-memory
//! implementation.

use crate::core::ids::{EPersonId, WorkflowItemId};
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// The submission-side operations the engine invokes at the edges of the
/// task state machine: publishing on final approval, returning to the
/// submitter's workspace on rejection, and applying metadata patches from
/// edit-metadata actions.
///
/// Item internals (bitstreams, full metadata schemas, indexing) are out of
/// the engine's sight; this trait is the whole contract.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
  /// Publishes the item into the archive.
  async fn archive_item(&self, item: WorkflowItemId) -> AnyResult<()>;

  /// Converts the submission back into a workspace item owned by (and
  /// discoverable only by) `submitter`.
  async fn return_to_workspace(&self, item: WorkflowItemId, submitter: EPersonId) -> AnyResult<()>;

  /// Applies a metadata patch to the in-progress submission.
  async fn update_metadata(&self, item: WorkflowItemId, patch: serde_json::Value) -> AnyResult<()>;

  async fn is_in_archive(&self, item: WorkflowItemId) -> AnyResult<bool>;
}

/// Submission state held in process memory.
#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
  archived: RwLock<HashSet<WorkflowItemId>>,
  workspace: RwLock<HashMap<WorkflowItemId, EPersonId>>,
  metadata: RwLock<HashMap<WorkflowItemId, Vec<serde_json::Value>>>,
}

impl InMemorySubmissionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// The workspace owner of a returned submission, if any.
  pub fn workspace_owner(&self, item: WorkflowItemId) -> Option<EPersonId> {
    self.workspace.read().get(&item).copied()
  }

  /// Patches applied to an item so far, in application order.
  pub fn applied_patches(&self, item: WorkflowItemId) -> Vec<serde_json::Value> {
    self.metadata.read().get(&item).cloned().unwrap_or_default()
  }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
  async fn archive_item(&self, item: WorkflowItemId) -> AnyResult<()> {
    self.archived.write().insert(item);
    self.workspace.write().remove(&item);
    Ok(())
  }

  async fn return_to_workspace(&self, item: WorkflowItemId, submitter: EPersonId) -> AnyResult<()> {
    self.workspace.write().insert(item, submitter);
    Ok(())
  }

  async fn update_metadata(&self, item: WorkflowItemId, patch: serde_json::Value) -> AnyResult<()> {
    self.metadata.write().entry(item).or_default().push(patch);
    Ok(())
  }

  async fn is_in_archive(&self, item: WorkflowItemId) -> AnyResult<bool> {
    Ok(self.archived.read().contains(&item))
  }
}
