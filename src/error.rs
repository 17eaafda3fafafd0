//! Errors returned by the containers.
//!
//! Every public operation validates its arguments before touching the tree,
//! so a rejected call never leaves a partially modified tree behind.
//! Removing a value that isn't present is not an error: it is a no-op.

use thiserror::Error;

/// The error returned when a position or a range doesn't fit the tree.
/// All variants are invalid arguments supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreapError {
    #[error("position {position} is out of bounds for a tree of length {len}")]
    PositionOutOfBounds { position: usize, len: usize },
    #[error("range [{start}, {end}] is invalid for a tree of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}

impl TreapError {
    /// Every error in this crate is an invalid argument.
    /// Internal invariant violations panic instead of being reported.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            TreapError::PositionOutOfBounds { .. } | TreapError::InvalidRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TreapError>;

/// `position` must be in `[0, len]`.
pub(crate) fn check_insert_position(position: usize, len: usize) -> Result<()> {
    if position > len {
        return Err(TreapError::PositionOutOfBounds { position, len });
    }
    Ok(())
}

/// `position` must be in `[0, len)`.
pub(crate) fn check_position(position: usize, len: usize) -> Result<()> {
    if position >= len {
        return Err(TreapError::PositionOutOfBounds { position, len });
    }
    Ok(())
}

/// The inclusive range `[start, end]` must be nonempty and inside `[0, len)`.
pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
    if start > end || end >= len {
        return Err(TreapError::InvalidRange { start, end, len });
    }
    Ok(())
}

#[test]
fn validation() {
    assert!(check_insert_position(3, 3).is_ok());
    assert_eq!(
        check_insert_position(4, 3),
        Err(TreapError::PositionOutOfBounds { position: 4, len: 3 })
    );
    assert!(check_position(2, 3).is_ok());
    assert!(check_position(3, 3).is_err());
    assert!(check_position(0, 0).is_err());
    assert!(check_range(1, 1, 2).is_ok());
    assert!(check_range(2, 1, 5).is_err());
    assert!(check_range(0, 5, 5).unwrap_err().is_invalid_argument());
}
