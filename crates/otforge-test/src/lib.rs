//! Shared test fixtures for OTForge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It depends on `otforge-core` only, so the ranking crate can use it as a
//! dev-dependency without a cycle.
//!
//! - [`systems`] - Constraint sets and hand-scored candidates
//! - [`table`] - A GEN backed by fixed competitions
//! - [`cv`] - A small CV syllable-structure system with a real GEN
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! otforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use otforge_test::systems::{markedness_set, candidate};
//! use otforge_test::cv::CvSystem;
//! ```

pub mod cv;
pub mod systems;
pub mod table;

// Re-export commonly used types at crate root for convenience
pub use cv::CvSystem;
pub use systems::{candidate, markedness_set, typed_set};
pub use table::TableGen;
