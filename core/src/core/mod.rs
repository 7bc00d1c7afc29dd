pub mod action;
pub mod actor;
pub mod ids;
pub mod item;
pub mod outcome;
pub mod step;
pub mod task;

// Re-export key types for easier access from other revpool modules (and lib.rs)
pub use action::{Action, ActionKind};
pub use actor::Actor;
pub use ids::{CollectionId, EPersonId, GroupId, SupervisionOrderId, TaskId, WorkflowItemId};
pub use item::WorkflowItem;
pub use outcome::{ActionOutcome, SubmitOutcome};
pub use step::{Step, StepConfig};
pub use task::{ClaimedTask, PoolTask, TaskRef};
