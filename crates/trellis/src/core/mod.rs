//! Core types: the node arena, the layout passes, input and drawing.

// Core modules - public
/// Host collaborator traits.
pub mod backend;
/// Engine tuning.
pub mod config;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Pointer gesture state machine.
pub mod gesture;
/// Device metrics.
pub mod metrics;
/// Node data.
pub mod node;
/// Vertex generation and drawing.
pub mod render;
/// Shared node name types.
pub mod state;
/// Test doubles and harness.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Core modules - internal
/// Widget context traits and implementations.
pub mod context;
/// Node ID types.
pub mod id;
/// Measure and position passes.
pub mod pass;
/// Root controller.
pub mod screen;
/// Arena state and tree mutation.
pub mod world;

// Public exports from internal modules
pub use config::EngineConfig;
pub use context::{Context, CoreContext, CoreViewContext, ViewContext};
pub use id::NodeId;
pub use screen::Screen;
pub use world::Core;
