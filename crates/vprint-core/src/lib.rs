//! Core types, color math, and error definitions for vprint.
//!
//! This crate provides the foundational types used across all other vprint crates:
//! - Identifier newtypes for variables, collections, modes, and nodes
//! - The variable data model (collections, modes, aliased values)
//! - Color normalization and its textual encodings
//! - Error types

pub mod errors;
pub mod types;
pub mod variables;

pub use errors::*;
pub use types::*;
pub use variables::*;
