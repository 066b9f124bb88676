//! Trellis: a box layout, clipping and gesture engine.
//!
//! Trellis sizes and positions a tree of widget boxes with heterogeneous
//! sizing policies, propagates clip rectangles so nested scrollable regions
//! never draw outside their bounds, and turns raw pointer samples into taps
//! and drags with inertia. It is single-threaded and recomputes layout
//! immediately whenever the tree is marked dirty, once per rendered frame.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Screen`] - The root controller that receives input and drives frames
//! - [`Core`] - The node arena and layout engine
//! - [`Widget`] - The trait implemented by all widgets
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse)
//! - [`layout`] - Per-node layout descriptors
//! - [`widgets`] - Containers and simple built-in widgets

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod geom;
pub mod layout;
pub mod logging;
pub mod widget;
pub mod widgets;

#[cfg(any(test, feature = "testing"))]
pub use core::testing;
// Re-export core application types
pub use core::{
    Context, Core, CoreContext, CoreViewContext, EngineConfig, NodeId, Screen, ViewContext,
};
pub use core::{backend, config, dump, error, event, gesture, metrics, node, render, state};

// Re-export widget trait and event outcome
pub use widget::{EventOutcome, Widget};
