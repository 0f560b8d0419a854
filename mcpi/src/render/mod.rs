//! Snapshot rendering
//!
//! The coordinator only knows the [`SnapshotRenderer`] trait: given a
//! [`Frame`] it returns an opaque [`Snapshot`]. [`PngRenderer`] draws a
//! scatter plot of both classes over the unit square and base64-encodes it
//! for the browser.

mod config;
mod png;

pub use config::RenderConfig;
pub use png::PngRenderer;

use thiserror::Error;

use crate::domain::{Frame, Snapshot};

/// Errors produced while rendering a snapshot
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas size {size}px (minimum {min}px)")]
    InvalidSize { size: u32, min: u32 },

    #[error("Failed to encode snapshot image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Renderer failed: {0}")]
    Other(String),
}

/// Produces a snapshot from the accumulated samples
///
/// Implementations draw at most `frame.cap` points of each class but must
/// report the estimate over the full sets, which `Frame::snapshot` does.
pub trait SnapshotRenderer: Send + Sync {
    fn render(&self, frame: &Frame<'_>) -> Result<Snapshot, RenderError>;
}
