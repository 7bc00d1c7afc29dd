// tests/guard_tests.rs
mod common;

use common::*;
use revpool::{
  Action, Actor, EPersonId, RevpoolError, SubmitOutcome, SupervisionOrders, TaskId, TaskRef,
  WorkflowItemId,
};
use revpool::GroupDirectory;

#[tokio::test]
async fn test_anonymous_callers_are_unauthorized_everywhere() {
  let fix = three_step_fixture().await;
  let anon = Actor::Anonymous;
  let uuid = fix.reviewer1.to_string();

  assert!(matches!(
    fix.guard.list_pool_tasks(anon, &uuid).await,
    Err(RevpoolError::Unauthorized)
  ));
  assert!(matches!(
    fix.guard.list_claimed_tasks(anon, &uuid).await,
    Err(RevpoolError::Unauthorized)
  ));
  assert!(matches!(
    fix.guard.claim_task(anon, &TaskId::new().to_string()).await,
    Err(RevpoolError::Unauthorized)
  ));
  assert!(matches!(
    fix.guard.unclaim_task(anon, &TaskId::new().to_string()).await,
    Err(RevpoolError::Unauthorized)
  ));
  assert!(matches!(
    fix
      .guard
      .perform_action(anon, &TaskId::new().to_string(), Action::Approve)
      .await,
    Err(RevpoolError::Unauthorized)
  ));
  assert!(matches!(
    fix
      .guard
      .find_task_by_item(anon, &WorkflowItemId::new().to_string())
      .await,
    Err(RevpoolError::Unauthorized)
  ));
  assert!(matches!(
    fix.guard.delete_pool_task(anon, &TaskId::new().to_string()).await,
    Err(RevpoolError::Unauthorized)
  ));
}

#[tokio::test]
async fn test_malformed_identifiers_are_bad_requests() {
  let fix = three_step_fixture().await;
  let actor = Actor::user(fix.reviewer1);

  assert!(matches!(
    fix.guard.claim_task(actor, "not-a-uuid").await,
    Err(RevpoolError::BadRequest { .. })
  ));
  assert!(matches!(
    fix.guard.list_pool_tasks(actor, "42").await,
    Err(RevpoolError::BadRequest { .. })
  ));
  assert!(matches!(
    fix.guard.find_task_by_item(Actor::admin(fix.admin), "").await,
    Err(RevpoolError::BadRequest { .. })
  ));
}

#[tokio::test]
async fn test_unknown_eperson_reference_is_unprocessable() {
  let fix = three_step_fixture().await;

  // Well-formed UUID, but no such identity: a bad query-parameter
  // reference, not a bad path.
  let ghost = EPersonId::new().to_string();
  let result = fix.guard.list_pool_tasks(Actor::admin(fix.admin), &ghost).await;
  assert!(matches!(result, Err(RevpoolError::UnprocessableEntity { .. })));
}

#[tokio::test]
async fn test_missing_task_path_is_not_found() {
  let fix = three_step_fixture().await;
  let result = fix
    .guard
    .claim_task(Actor::user(fix.reviewer1), &TaskId::new().to_string())
    .await;
  assert!(matches!(result, Err(RevpoolError::NotFound { .. })));
}

#[tokio::test]
async fn test_pool_tasks_cannot_be_deleted() {
  let fix = three_step_fixture().await;
  let pool_task = match fix.engine.submit(fix.collection, fix.submitter).await.unwrap() {
    SubmitOutcome::EnteredWorkflow { pool_task, .. } => pool_task,
    other => panic!("expected workflow entry, got {:?}", other),
  };

  let result = fix
    .guard
    .delete_pool_task(Actor::admin(fix.admin), &pool_task.id.to_string())
    .await;
  assert!(matches!(result, Err(RevpoolError::MethodNotAllowed { .. })));

  // The task is untouched and still claimable.
  fix
    .guard
    .claim_task(Actor::user(fix.reviewer1), &pool_task.id.to_string())
    .await
    .unwrap();
}

#[tokio::test]
async fn test_non_admin_may_only_query_own_tasks() {
  let fix = three_step_fixture().await;

  let result = fix
    .guard
    .list_claimed_tasks(Actor::user(fix.reviewer1), &fix.reviewer2.to_string())
    .await;
  assert!(matches!(result, Err(RevpoolError::Forbidden { .. })));

  // Admins may query anyone; the same query for oneself is fine.
  fix
    .guard
    .list_claimed_tasks(Actor::admin(fix.admin), &fix.reviewer2.to_string())
    .await
    .unwrap();
  fix
    .guard
    .list_claimed_tasks(Actor::user(fix.reviewer1), &fix.reviewer1.to_string())
    .await
    .unwrap();
}

#[tokio::test]
async fn test_find_task_by_item_is_admin_only_and_tracks_state() {
  let fix = three_step_fixture().await;
  let (item, pool_task) = match fix.engine.submit(fix.collection, fix.submitter).await.unwrap() {
    SubmitOutcome::EnteredWorkflow { item, pool_task } => (item, pool_task),
    other => panic!("expected workflow entry, got {:?}", other),
  };
  let item_uuid = item.id.to_string();

  let refused = fix
    .guard
    .find_task_by_item(Actor::user(fix.reviewer1), &item_uuid)
    .await;
  assert!(matches!(refused, Err(RevpoolError::Forbidden { .. })));

  let admin = Actor::admin(fix.admin);
  match fix.guard.find_task_by_item(admin, &item_uuid).await.unwrap() {
    Some(TaskRef::Pool(task)) => assert_eq!(task.id, pool_task.id),
    other => panic!("expected the live pool task, got {:?}", other),
  }

  let claimed = fix
    .guard
    .claim_task(Actor::user(fix.reviewer1), &pool_task.id.to_string())
    .await
    .unwrap();
  match fix.guard.find_task_by_item(admin, &item_uuid).await.unwrap() {
    Some(TaskRef::Claimed(task)) => assert_eq!(task.id, claimed.id),
    other => panic!("expected the live claimed task, got {:?}", other),
  }

  // Reject ends the workflow; the lookup reports "no content".
  fix
    .guard
    .perform_action(
      Actor::user(fix.reviewer1),
      &claimed.id.to_string(),
      Action::Reject { reason: "incomplete".into() },
    )
    .await
    .unwrap();
  let live = fix.guard.find_task_by_item(admin, &item_uuid).await.unwrap();
  assert!(live.is_none());
}

#[tokio::test]
async fn test_supervision_orders_grant_read_only_visibility() {
  let fix = three_step_fixture().await;
  let orders = SupervisionOrders::new(fix.groups.clone());

  let (item, pool_task) = match fix.engine.submit(fix.collection, fix.submitter).await.unwrap() {
    SubmitOutcome::EnteredWorkflow { item, pool_task } => (item, pool_task),
    other => panic!("expected workflow entry, got {:?}", other),
  };

  let supervisor = EPersonId::new();
  let supervisor_group = revpool::GroupId::new();
  fix.groups.add_member(supervisor, supervisor_group).await.unwrap();

  // Creation is admin-only.
  let refused = orders.create(Actor::user(fix.reviewer1), supervisor_group, item.id);
  assert!(matches!(refused, Err(RevpoolError::Forbidden { .. })));
  let order = orders
    .create(Actor::admin(fix.admin), supervisor_group, item.id)
    .unwrap();

  // The grant covers reading, and nothing else: the supervisor is still
  // not eligible to claim the step's pool task.
  assert!(orders.may_read(supervisor, item.id).await.unwrap());
  assert!(!orders.may_read(fix.reviewer2, item.id).await.unwrap());
  let claim = fix.engine.claim(pool_task.id, Actor::user(supervisor)).await;
  assert!(matches!(claim, Err(RevpoolError::Forbidden { .. })));

  orders.remove(Actor::admin(fix.admin), order.id).unwrap();
  assert!(!orders.may_read(supervisor, item.id).await.unwrap());
  let gone = orders.remove(Actor::admin(fix.admin), order.id);
  assert!(matches!(gone, Err(RevpoolError::NotFound { .. })));
}
