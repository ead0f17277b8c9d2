#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod color;
pub mod layer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use color::{Color, PICKUP_HIGHLIGHT};
pub use layer::{Layer, LayerMask};

/// Frame counter advanced once per interaction frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame of any session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// True on every `n`th frame (never when `n` is zero).
    pub fn every(self, n: u64) -> bool {
        n != 0 && self.0 % n == 0
    }
}

/// Errors raised by core lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A layer name that does not map to any [`Layer`].
    #[error("unknown layer '{0}'")]
    UnknownLayer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances() {
        assert_eq!(FrameTick::ZERO.advance(3), FrameTick(3));
    }

    #[test]
    fn every_matches_multiples_only() {
        assert!(FrameTick(0).every(60));
        assert!(FrameTick(120).every(60));
        assert!(!FrameTick(61).every(60));
        assert!(!FrameTick(10).every(0));
    }
}
