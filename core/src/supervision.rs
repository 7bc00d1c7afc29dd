// revpool/src/supervision.rs

//! Defines supervision orders: administrator-managed grants that let a
//! group read a submission outside the reviewer-group path.
//!
//! A supervision order confers visibility only. It never interacts with
//! the pool/claim state machine: supervisors cannot claim or act on tasks
//! through it.

use crate::core::actor::Actor;
use crate::core::ids::{EPersonId, GroupId, SupervisionOrderId, WorkflowItemId};
use crate::error::{RevpoolError, RevpoolResult};
use crate::services::GroupDirectory;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// A read-visibility grant of one workflow item to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisionOrder {
  pub id: SupervisionOrderId,
  pub group: GroupId,
  pub item: WorkflowItemId,
}

/// The set of live supervision orders.
pub struct SupervisionOrders {
  groups: Arc<dyn GroupDirectory>,
  orders: RwLock<HashMap<SupervisionOrderId, SupervisionOrder>>,
}

impl SupervisionOrders {
  pub fn new(groups: Arc<dyn GroupDirectory>) -> Self {
    Self {
      groups,
      orders: RwLock::new(HashMap::new()),
    }
  }

  /// Creates an order granting `group` read visibility of `item`.
  /// Administrator only.
  #[instrument(name = "SupervisionOrders::create", skip_all, fields(group = %group, item = %item), err(Display))]
  pub fn create(
    &self,
    actor: Actor,
    group: GroupId,
    item: WorkflowItemId,
  ) -> RevpoolResult<SupervisionOrder> {
    let (_user, admin) = actor.require_user()?;
    if !admin {
      return Err(RevpoolError::forbidden(
        "only administrators may manage supervision orders",
      ));
    }
    let order = SupervisionOrder {
      id: SupervisionOrderId::new(),
      group,
      item,
    };
    self.orders.write().insert(order.id, order.clone());
    event!(Level::INFO, order = %order.id, "Supervision order created.");
    Ok(order)
  }

  /// Destroys an order. Administrator only.
  #[instrument(name = "SupervisionOrders::remove", skip_all, fields(order = %order_id), err(Display))]
  pub fn remove(&self, actor: Actor, order_id: SupervisionOrderId) -> RevpoolResult<()> {
    let (_user, admin) = actor.require_user()?;
    if !admin {
      return Err(RevpoolError::forbidden(
        "only administrators may manage supervision orders",
      ));
    }
    self
      .orders
      .write()
      .remove(&order_id)
      .map(|_| ())
      .ok_or_else(|| RevpoolError::not_found(format!("supervisionorder {}", order_id)))
  }

  /// Orders currently attached to `item`.
  pub fn for_item(&self, item: WorkflowItemId) -> Vec<SupervisionOrder> {
    self
      .orders
      .read()
      .values()
      .filter(|order| order.item == item)
      .cloned()
      .collect()
  }

  /// Whether `user` may read `item` through some supervision order.
  /// Membership is resolved live against the group directory.
  pub async fn may_read(&self, user: EPersonId, item: WorkflowItemId) -> RevpoolResult<bool> {
    let grants = self.for_item(item);
    for order in grants {
      if self.groups.is_member(user, order.group).await? {
        return Ok(true);
      }
    }
    Ok(false)
  }
}
