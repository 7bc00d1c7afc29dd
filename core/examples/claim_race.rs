// revpool/examples/claim_race.rs
use revpool::GroupDirectory;
//
// Demonstrates the exclusivity of the claim: several eligible reviewers
// race for the same pool task; exactly one wins, the rest see NotFound.

use revpool::{
  ActionKind, Actor, CollectionId, EPersonId, GroupId, InMemoryGroupDirectory,
  InMemorySubmissionStore, RevpoolError, StepConfig, StepRegistry, SubmitOutcome, TaskEngine,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), RevpoolError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let registry = Arc::new(StepRegistry::new());
  let collection = CollectionId::new();
  let review_group = GroupId::new();
  registry.register(
    collection,
    vec![StepConfig::new(
      "reviewstep",
      review_group,
      vec![ActionKind::Approve, ActionKind::Reject],
      "reviewaction",
    )],
  )?;

  let groups = Arc::new(InMemoryGroupDirectory::new());
  let store = Arc::new(InMemorySubmissionStore::new());
  let engine = Arc::new(TaskEngine::new(registry, groups.clone(), store));

  let mut reviewers = Vec::new();
  for _ in 0..8 {
    let reviewer = EPersonId::new();
    groups.add_member(reviewer, review_group).await.map_err(RevpoolError::from)?;
    reviewers.push(reviewer);
  }

  let pool_task = match engine.submit(collection, EPersonId::new()).await? {
    SubmitOutcome::EnteredWorkflow { pool_task, .. } => pool_task,
    SubmitOutcome::Archived { .. } => unreachable!("one step is configured"),
  };

  let mut handles = Vec::new();
  for reviewer in reviewers {
    let engine = engine.clone();
    let task_id = pool_task.id;
    handles.push(tokio::spawn(async move {
      (reviewer, engine.claim(task_id, Actor::user(reviewer)).await)
    }));
  }

  for handle in handles {
    match handle.await.expect("task join") {
      (reviewer, Ok(claimed)) => {
        info!("reviewer {} won the claim (claimed task {})", reviewer, claimed.id)
      }
      (reviewer, Err(RevpoolError::NotFound { .. })) => {
        info!("reviewer {} lost the race; should try another task", reviewer)
      }
      (_, Err(other)) => return Err(other),
    }
  }

  Ok(())
}
