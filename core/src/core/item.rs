// revpool/src/core/item.rs

//! Defines the persisted record for a submission undergoing review.

use crate::core::ids::{CollectionId, EPersonId, WorkflowItemId};
use serde::{Deserialize, Serialize};

/// A submission under workflow review.
///
/// The record holds only what the engine needs to drive transitions; the
/// submission's metadata and files live in the (external) submission store.
/// The record is destroyed when the final step approves (item archived) or
/// any step rejects (item returned to the submitter's workspace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowItem {
  pub id: WorkflowItemId,
  pub collection: CollectionId,
  /// The original submitter; rejection returns the submission to them.
  pub submitter: EPersonId,
  /// 1-based ordinal of the step the item currently sits at.
  ///
  /// `None` only transiently: a record with no current step is about to be
  /// destroyed (archived or returned to workspace) within the same
  /// transition.
  pub current_step: Option<usize>,
}
