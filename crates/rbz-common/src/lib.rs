//! Common types and utilities for the rbz type checker.
//!
//! This crate provides foundational types used across all rbz crates:
//! - String interning (`Atom`, `NameInterner`)
//! - Limits shared by the binder and the solver

// String interning for constant names and literal payloads
pub mod interner;
pub use interner::{Atom, NameInterner};

// Centralized limits and thresholds
pub mod limits;
