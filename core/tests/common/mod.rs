// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use revpool::{
  ActionKind, CollectionId, EPersonId, GroupId, InMemoryGroupDirectory, InMemorySubmissionStore,
  StepConfig, StepRegistry, TaskEngine, WorkflowGuard,
};
use revpool::GroupDirectory;
use std::sync::Arc;
use tracing::Level;

// --- Common Fixture ---

/// Engine plus collaborators wired with the standard 3-step review
/// workflow: reviewstep -> editstep -> finaleditstep, one reviewer group
/// per step with one member each.
pub struct Fixture {
  pub engine: Arc<TaskEngine>,
  pub guard: WorkflowGuard,
  pub registry: Arc<StepRegistry>,
  pub groups: Arc<InMemoryGroupDirectory>,
  pub store: Arc<InMemorySubmissionStore>,

  pub collection: CollectionId,
  pub submitter: EPersonId,
  pub admin: EPersonId,
  pub reviewer1: EPersonId,
  pub reviewer2: EPersonId,
  pub reviewer3: EPersonId,
  pub review_group: GroupId,
  pub edit_group: GroupId,
  pub final_group: GroupId,
}

/// The standard step configuration used across the test suite.
pub fn three_step_config(
  review_group: GroupId,
  edit_group: GroupId,
  final_group: GroupId,
) -> Vec<StepConfig> {
  vec![
    StepConfig::new(
      "reviewstep",
      review_group,
      vec![ActionKind::Approve, ActionKind::Reject],
      "reviewaction",
    ),
    StepConfig::new(
      "editstep",
      edit_group,
      vec![ActionKind::Approve, ActionKind::Reject, ActionKind::EditMetadata],
      "editaction",
    ),
    StepConfig::new(
      "finaleditstep",
      final_group,
      vec![ActionKind::Approve, ActionKind::EditMetadata],
      "finaleditaction",
    ),
  ]
}

pub async fn three_step_fixture() -> Fixture {
  setup_tracing();

  let registry = Arc::new(StepRegistry::new());
  let groups = Arc::new(InMemoryGroupDirectory::new());
  let store = Arc::new(InMemorySubmissionStore::new());

  let collection = CollectionId::new();
  let review_group = GroupId::new();
  let edit_group = GroupId::new();
  let final_group = GroupId::new();
  registry
    .register(collection, three_step_config(review_group, edit_group, final_group))
    .expect("workflow registration");

  let submitter = EPersonId::new();
  let admin = EPersonId::new();
  let reviewer1 = EPersonId::new();
  let reviewer2 = EPersonId::new();
  let reviewer3 = EPersonId::new();
  groups.add_member(reviewer1, review_group).await.unwrap();
  groups.add_member(reviewer2, edit_group).await.unwrap();
  groups.add_member(reviewer3, final_group).await.unwrap();

  let engine = Arc::new(TaskEngine::new(
    registry.clone(),
    groups.clone(),
    store.clone(),
  ));
  let guard = WorkflowGuard::new(engine.clone());
  for id in [submitter, admin, reviewer1, reviewer2, reviewer3] {
    guard.register_eperson(id);
  }

  Fixture {
    engine,
    guard,
    registry,
    groups,
    store,
    collection,
    submitter,
    admin,
    reviewer1,
    reviewer2,
    reviewer3,
    review_group,
    edit_group,
    final_group,
  }
}

/// Fixture variant with a single review step whose group holds `members`.
pub async fn single_step_fixture(members: &[EPersonId]) -> Fixture {
  let fix = three_step_fixture().await;

  // Side collection with a one-step workflow on the same engine.
  let collection = CollectionId::new();
  let review_group = GroupId::new();
  fix
    .registry
    .register(
      collection,
      vec![StepConfig::new(
        "reviewstep",
        review_group,
        vec![ActionKind::Approve, ActionKind::Reject],
        "reviewaction",
      )],
    )
    .expect("workflow registration");
  for member in members {
    fix.groups.add_member(*member, review_group).await.unwrap();
    fix.guard.register_eperson(*member);
  }

  Fixture {
    collection,
    review_group,
    ..fix
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
