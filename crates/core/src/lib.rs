//! Core business logic for Atrium.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The approval workflow engine's state machine, authorization policy, and the
//! contracts for action executors and notifiers live here.
//!
//! # Modules
//!
//! - `workflow` - Multi-step approval workflow engine

pub mod workflow;
