// revpool/src/engine/mod.rs

//! Defines the `TaskEngine`, owner of the pool-task/claimed-task state
//! machine, its construction, and the step-entry transition. Claim,
//! unclaim and action dispatch live in `transitions`; read-side lookups in
//! `queries`.

pub mod queries;
pub mod transitions;

pub use queries::UserTasks;

use crate::core::ids::{CollectionId, EPersonId, TaskId, WorkflowItemId};
use crate::core::item::WorkflowItem;
use crate::core::outcome::SubmitOutcome;
use crate::core::task::{ClaimedTask, PoolTask};
use crate::error::{RevpoolError, RevpoolResult};
use crate::registry::StepRegistry;
use crate::services::{GroupDirectory, SubmissionStore};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// The engine's persisted records. Mutated only inside the engine's
/// transition methods, always under the single state lock. That lock is
/// the transaction boundary, and it is never held across an `.await`.
#[derive(Default)]
pub(crate) struct EngineState {
  pub(crate) items: HashMap<WorkflowItemId, WorkflowItem>,
  pub(crate) pool: HashMap<TaskId, PoolTask>,
  pub(crate) claimed: HashMap<TaskId, ClaimedTask>,
}

/// The workflow task engine.
///
/// State per workflow item is `(current step, pooled | claimed)`; the
/// terminal states (archived, returned to workspace) destroy the item's
/// record. Transitions are driven by `submit`, `claim`, `unclaim` and
/// `perform_action`.
pub struct TaskEngine {
  pub(crate) registry: Arc<StepRegistry>,
  pub(crate) groups: Arc<dyn GroupDirectory>,
  pub(crate) store: Arc<dyn SubmissionStore>,
  pub(crate) state: Mutex<EngineState>,
}

impl TaskEngine {
  pub fn new(
    registry: Arc<StepRegistry>,
    groups: Arc<dyn GroupDirectory>,
    store: Arc<dyn SubmissionStore>,
  ) -> Self {
    Self {
      registry,
      groups,
      store,
      state: Mutex::new(EngineState::default()),
    }
  }

  /// The step registry this engine was built against.
  pub fn registry(&self) -> &StepRegistry {
    &self.registry
  }

  /// Finalizes a submission into `collection`.
  ///
  /// A collection with no configured workflow archives the item
  /// immediately; no pool task is ever created. Otherwise the item enters
  /// step 1 and a pool task awaits that step's reviewer group.
  #[instrument(
    name = "TaskEngine::submit",
    skip_all,
    fields(collection = %collection, submitter = %submitter),
    err(Display)
  )]
  pub async fn submit(
    &self,
    collection: CollectionId,
    submitter: EPersonId,
  ) -> RevpoolResult<SubmitOutcome> {
    let item_id = WorkflowItemId::new();
    let record = WorkflowItem {
      id: item_id,
      collection,
      submitter,
      current_step: None,
    };
    {
      self.state.lock().items.insert(item_id, record);
    }

    let entered = match self.enter_step(item_id, 1).await {
      Ok(entered) => entered,
      Err(err) => {
        // The generated id was never handed out; without this removal the
        // record would be unreachable forever.
        self.state.lock().items.remove(&item_id);
        return Err(err);
      }
    };

    match entered {
      Some(pool_task) => {
        // Snapshot the record as updated by enter_step.
        let item = self
          .state
          .lock()
          .items
          .get(&item_id)
          .cloned()
          .ok_or_else(|| RevpoolError::not_found(format!("workflowitem {}", item_id)))?;
        event!(Level::INFO, item = %item_id, step = %pool_task.step_name, "Submission entered workflow.");
        Ok(SubmitOutcome::EnteredWorkflow { item, pool_task })
      }
      None => {
        event!(Level::INFO, item = %item_id, "Collection has no workflow; item archived immediately.");
        Ok(SubmitOutcome::Archived { item: item_id })
      }
    }
  }

  /// Moves `item` to the step at `ordinal`, pooling a task there.
  ///
  /// An ordinal past the configured step count archives the item instead
  /// (publishes it via the submission store, destroys the workflow record)
  /// and emits no task. That covers both the zero-step collection and
  /// approval on the final step.
  pub(crate) async fn enter_step(
    &self,
    item_id: WorkflowItemId,
    ordinal: usize,
  ) -> RevpoolResult<Option<PoolTask>> {
    let collection = {
      let state = self.state.lock();
      match state.items.get(&item_id) {
        Some(record) => record.collection,
        None => return Err(RevpoolError::not_found(format!("workflowitem {}", item_id))),
      }
    };

    match self.registry.step_at(collection, ordinal) {
      Some(step) => {
        let task = PoolTask {
          id: TaskId::new(),
          workflow_item: item_id,
          step_name: step.name.clone(),
          step_ordinal: step.ordinal,
          group: step.group,
          created_at: Utc::now(),
        };
        let mut state = self.state.lock();
        if let Some(record) = state.items.get_mut(&item_id) {
          record.current_step = Some(ordinal);
        }
        state.pool.insert(task.id, task.clone());
        event!(
          Level::DEBUG,
          item = %item_id,
          step = %task.step_name,
          task = %task.id,
          "Pool task created for step."
        );
        Ok(Some(task))
      }
      None => {
        self.store.archive_item(item_id).await?;
        let mut state = self.state.lock();
        state.items.remove(&item_id);
        event!(Level::INFO, item = %item_id, "Item archived; workflow record destroyed.");
        Ok(None)
      }
    }
  }
}
