#![warn(missing_docs)]
//! Render-side state touched by interaction feedback: materials and outlines.
//!
//! Nothing here talks to a GPU. A renderer reads [`MeshRenderer`] each frame
//! and draws whatever materials and outline pass it currently holds.

mod material;
mod outline;

pub use material::{Material, MeshRenderer, OutlineStyle};
pub use outline::{EmissiveOutline, OutlineEffect, OutlineKind, ShellOutline};
