// revpool/src/core/actor.rs

//! Defines the credential shape every engine and guard entry point receives.

use crate::core::ids::EPersonId;
use crate::error::{RevpoolError, RevpoolResult};

/// The caller of an operation, as established by the (excluded)
/// authentication layer.
///
/// `Anonymous` means no credentials at all; any task-reading or
/// task-mutating operation refuses it with `Unauthorized` before touching
/// state. Eligibility beyond that (group membership, task ownership, admin
/// rights) is decided per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
  Anonymous,
  User { id: EPersonId, admin: bool },
}

impl Actor {
  /// A regular authenticated user.
  pub fn user(id: EPersonId) -> Self {
    Actor::User { id, admin: false }
  }

  /// An authenticated administrator.
  pub fn admin(id: EPersonId) -> Self {
    Actor::User { id, admin: true }
  }

  /// Returns the authenticated identity, or `Unauthorized` for anonymous
  /// callers. Every guarded operation calls this first.
  pub fn require_user(&self) -> RevpoolResult<(EPersonId, bool)> {
    match self {
      Actor::Anonymous => Err(RevpoolError::Unauthorized),
      Actor::User { id, admin } => Ok((*id, *admin)),
    }
  }

  pub fn is_admin(&self) -> bool {
    matches!(self, Actor::User { admin: true, .. })
  }
}
