//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without
//! containing business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`log_layer`] - Tracing layer feeding the in-process log buffer
//! - [`runtime`] - Long-running monitor loop
//! - [`scheduler`] - Fixed-interval background tasks

pub mod bootstrap;
pub mod config;
pub mod log_layer;
pub mod runtime;
pub mod scheduler;
