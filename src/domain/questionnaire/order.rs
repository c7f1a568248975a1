//! Presentation order allocation for conditional children.
//!
//! A child revealed by a parent option gets `parent * 100 + index`, so the
//! children of order 6 live at 601, 602, ... and never collide with roots
//! (which stay below 100) or with the children of another parent.

use thiserror::Error;

/// Multiplier separating a parent's order from its children's orders.
pub const CHILD_ORDER_MULTIPLIER: u32 = 100;

/// Largest 1-based child index a single parent can allocate.
pub const MAX_CHILD_INDEX: u32 = CHILD_ORDER_MULTIPLIER - 1;

/// Errors from order allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("child index {0} is out of range 1..={MAX_CHILD_INDEX}")]
    ChildIndexOutOfRange(u32),

    #[error("parent order {0} is too large to allocate children")]
    ParentOrderOverflow(u32),
}

/// Computes the order for the `child_index`-th child (1-based) of a parent.
pub fn child_order(parent_order: u32, child_index: u32) -> Result<u32, OrderError> {
    if !(1..=MAX_CHILD_INDEX).contains(&child_index) {
        return Err(OrderError::ChildIndexOutOfRange(child_index));
    }
    parent_order
        .checked_mul(CHILD_ORDER_MULTIPLIER)
        .and_then(|base| base.checked_add(child_index))
        .ok_or(OrderError::ParentOrderOverflow(parent_order))
}

/// Returns true if `order` is in the root range (below the first child slot).
pub fn is_root_order(order: u32) -> bool {
    order < CHILD_ORDER_MULTIPLIER
}
