//! chartkit: interactive charting core.
//!
//! This crate provides the coordination layer of an interactive chart:
//! domain axis scaling with pan/zoom viewports, lockable selection models,
//! a chain of composable behaviors (nearest-datum selection, highlighting,
//! selection locking, viewport sliding), and accessibility node generation.
//! Paint, text layout, and platform input plumbing stay in the host.

pub mod a11y;
pub mod behavior;
pub mod core;
pub mod error;
pub mod selection;
pub mod telemetry;

pub use behavior::{CartesianChart, ChartBehavior, ChartState};
pub use error::{ChartError, ChartResult};
