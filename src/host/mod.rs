//! Host-side collaborators: the view tree and the coordinator layout that
//! attaches behaviors to its children

mod coordinator;
mod view;

pub use coordinator::{Behavior, CoordinatorLayout, LayoutParams, NestedScrollOutcome};
pub use view::{ScrollRange, View, ViewId, ViewTree};
