// revpool/src/core/ids.rs

//! Newtyped UUID identifiers for every entity the engine touches.
//!
//! Each newtype parses from the string form the REST-adjacent surface
//! receives; a syntactically invalid string is a `BadRequest`, never a
//! `NotFound` (existence is a separate question answered later).

use crate::error::{RevpoolError, RevpoolResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
  ($(#[$meta:meta])* $name:ident, $label:literal) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(pub Uuid);

    impl $name {
      /// Mints a fresh random identifier.
      pub fn new() -> Self {
        $name(Uuid::new_v4())
      }

      /// Parses the canonical string form. Malformed input is `BadRequest`.
      pub fn parse(s: &str) -> RevpoolResult<Self> {
        Uuid::parse_str(s).map($name).map_err(|_| {
          RevpoolError::bad_request(format!("malformed {} identifier: '{}'", $label, s))
        })
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl From<Uuid> for $name {
      fn from(value: Uuid) -> Self {
        $name(value)
      }
    }
  };
}

entity_id!(
  /// Identifies an EPerson (a submitter, reviewer, or administrator).
  EPersonId,
  "eperson"
);

entity_id!(
  /// Identifies a group of EPersons, e.g. a step's reviewer group.
  GroupId,
  "group"
);

entity_id!(
  /// Identifies a collection, the unit a workflow is configured against.
  CollectionId,
  "collection"
);

entity_id!(
  /// Identifies a submission undergoing (or having finished) review.
  WorkflowItemId,
  "workflowitem"
);

entity_id!(
  /// Identifies a pool task or a claimed task.
  TaskId,
  "task"
);

entity_id!(
  /// Identifies a supervision order.
  SupervisionOrderId,
  "supervisionorder"
);
