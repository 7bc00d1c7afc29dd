// revpool/src/services/group.rs

//! Defines the `GroupDirectory` trait for reviewer-eligibility checks,
//! and an in-memory implementation.

use crate::core::ids::{EPersonId, GroupId};
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// Answers "is user U a member of group G" and supports membership
/// mutation.
///
/// The engine queries membership live at claim time and at pool-task
/// query time, never cached at task-creation time, so a member added to
/// a reviewer group mid-workflow immediately sees and may claim the
/// step's outstanding pool task.
///
/// Failures are surfaced through `anyhow` and wrapped by the engine into
/// `RevpoolError::Service`.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
  async fn is_member(&self, user: EPersonId, group: GroupId) -> AnyResult<bool>;

  async fn add_member(&self, user: EPersonId, group: GroupId) -> AnyResult<()>;

  async fn remove_member(&self, user: EPersonId, group: GroupId) -> AnyResult<()>;
}

/// Group membership held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryGroupDirectory {
  members: RwLock<HashMap<GroupId, HashSet<EPersonId>>>,
}

impl InMemoryGroupDirectory {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl GroupDirectory for InMemoryGroupDirectory {
  async fn is_member(&self, user: EPersonId, group: GroupId) -> AnyResult<bool> {
    Ok(
      self
        .members
        .read()
        .get(&group)
        .map_or(false, |set| set.contains(&user)),
    )
  }

  async fn add_member(&self, user: EPersonId, group: GroupId) -> AnyResult<()> {
    self.members.write().entry(group).or_default().insert(user);
    Ok(())
  }

  async fn remove_member(&self, user: EPersonId, group: GroupId) -> AnyResult<()> {
    if let Some(set) = self.members.write().get_mut(&group) {
      set.remove(&user);
    }
    Ok(())
  }
}
