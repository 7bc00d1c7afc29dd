// revpool/examples/basic_review.rs

use revpool::{
  Action, ActionKind, ActionOutcome, Actor, CollectionId, EPersonId, GroupId,
  InMemoryGroupDirectory, InMemorySubmissionStore, RevpoolError, StepConfig, StepRegistry,
  SubmitOutcome, TaskEngine,
};
use revpool::{GroupDirectory, SubmissionStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), RevpoolError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Review Workflow Example ---");

  // 1. Configure a collection with a two-step workflow.
  let registry = Arc::new(StepRegistry::new());
  let collection = CollectionId::new();
  let review_group = GroupId::new();
  let final_group = GroupId::new();
  registry.register(
    collection,
    vec![
      StepConfig::new(
        "reviewstep",
        review_group,
        vec![ActionKind::Approve, ActionKind::Reject],
        "reviewaction",
      ),
      StepConfig::new(
        "finaleditstep",
        final_group,
        vec![ActionKind::Approve, ActionKind::EditMetadata],
        "finaleditaction",
      ),
    ],
  )?;

  // 2. Wire the engine with in-memory collaborators.
  let groups = Arc::new(InMemoryGroupDirectory::new());
  let store = Arc::new(InMemorySubmissionStore::new());
  let engine = TaskEngine::new(registry, groups.clone(), store.clone());

  let submitter = EPersonId::new();
  let reviewer = EPersonId::new();
  let editor = EPersonId::new();
  groups.add_member(reviewer, review_group).await.map_err(RevpoolError::from)?;
  groups.add_member(editor, final_group).await.map_err(RevpoolError::from)?;

  // 3. Submit: the item enters the review step.
  let (item, pool_task) = match engine.submit(collection, submitter).await? {
    SubmitOutcome::EnteredWorkflow { item, pool_task } => (item, pool_task),
    SubmitOutcome::Archived { item } => {
      info!("collection had no workflow; item {} archived immediately", item);
      return Ok(());
    }
  };
  info!("item {} awaits '{}'", item.id, pool_task.step_name);

  // 4. The reviewer claims and approves.
  let claimed = engine.claim(pool_task.id, Actor::user(reviewer)).await?;
  info!("reviewer claimed task ({})", claimed.action);
  let outcome = engine
    .perform_action(claimed.id, Actor::user(reviewer), Action::Approve)
    .await?;
  let next_task = match outcome {
    ActionOutcome::Advanced { pool_task } => pool_task,
    other => panic!("expected an advance, got {:?}", other),
  };
  info!("item advanced to '{}'", next_task.step_name);

  // 5. The editor claims, touches the metadata, and approves the final step.
  let claimed = engine.claim(next_task.id, Actor::user(editor)).await?;
  engine
    .perform_action(
      claimed.id,
      Actor::user(editor),
      Action::EditMetadata { patch: serde_json::json!({"dc.title": "Polished title"}) },
    )
    .await?;
  let outcome = engine
    .perform_action(claimed.id, Actor::user(editor), Action::Approve)
    .await?;
  assert_eq!(outcome, ActionOutcome::Archived);

  let archived = store.is_in_archive(item.id).await.map_err(RevpoolError::from)?;
  info!("item {} archived: {}", item.id, archived);

  Ok(())
}
