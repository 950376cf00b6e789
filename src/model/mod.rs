//! Solution representation.
//!
//! - [`Action`]: a single planar grid displacement
//! - [`ActionSpace`]: the finite alphabet random actions are drawn from
//! - [`Solution`]: a fixed-length ordered sequence of actions

mod action;
mod solution;

pub use action::{Action, ActionSpace};
pub use solution::Solution;
