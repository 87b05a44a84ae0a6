// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vendra sync engine.
//!
//! This crate provides the foundational trait definitions, error types,
//! remote fault taxonomy, and domain model used throughout the Vendra
//! workspace. All business logic lives on the remote platform; Vendra keeps a
//! cached, eventually-consistent copy of its rows and these are the types
//! that copy is made of.

pub mod error;
pub mod fault;
pub mod model;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VendraError;
pub use fault::FaultClass;
pub use types::{ChangeEvent, ChangeKind, MutationReport, Role, Session, SessionUser};

// Re-export all adapter traits at crate root.
pub use traits::{LocalStore, MediaStore, RealtimeFeed, RemoteStore};
