//! Order index rules.
//!
//! Pads are ordered among their owner's pads and tasks among their pad's
//! tasks. New siblings are appended after the current maximum; an empty
//! parent starts at [`FIRST_ORDER`].

use crate::error::CoreError;

/// Order index given to the first child of an empty parent.
pub const FIRST_ORDER: i32 = 1;

/// Largest order index a caller may set explicitly.
///
/// Keeps the range above it free for appends, so `next_order` never
/// reaches `i32::MAX` in practice.
pub const MAX_EXPLICIT_ORDER: i32 = i32::MAX / 2;

/// Compute the order index for a new sibling from the current maximum.
///
/// # Examples
///
/// ```
/// use taskhive_core::ordering::next_order;
///
/// assert_eq!(next_order(None), 1);
/// assert_eq!(next_order(Some(4)), 5);
/// ```
pub fn next_order(current_max: Option<i32>) -> i32 {
    match current_max {
        Some(max) if max >= FIRST_ORDER => max.saturating_add(1),
        _ => FIRST_ORDER,
    }
}

/// Validate an order index supplied by the caller instead of computed.
pub fn validate_explicit_order(order: i32) -> Result<(), CoreError> {
    if !(FIRST_ORDER..=MAX_EXPLICIT_ORDER).contains(&order) {
        return Err(CoreError::Validation(format!(
            "task_item_order must be between {FIRST_ORDER} and {MAX_EXPLICIT_ORDER}, got {order}"
        )));
    }
    Ok(())
}
