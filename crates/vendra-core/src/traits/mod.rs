// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators the sync engine
//! consumes: the remote relational platform, its realtime channel, the local
//! key-value persistence behind the read-state shadow, and the media bucket.
//!
//! All remote traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod local;
pub mod media;
pub mod realtime;
pub mod remote;

// Re-export all traits at the traits module level for convenience.
pub use local::LocalStore;
pub use media::MediaStore;
pub use realtime::RealtimeFeed;
pub use remote::RemoteStore;
