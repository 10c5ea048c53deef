//! Test harness for the annotation engine.
//!
//! Provides programmatic tools for scripting annotated scenes,
//! verifying render output at every step, and generating diagnostic
//! output.
//!
//! # Key Components
//!
//! - [`SceneBuilder`] — Fluent API for building and rendering annotated trees
//! - [`report`] — Structured text render reports and the `PART:` line stream
//! - [`helpers`] — Shape and scope-delta constructors
//! - [`assertions`] — Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use report::RenderReport;
pub use workflow::SceneBuilder;
