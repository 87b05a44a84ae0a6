// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vendra integration tests: in-memory fakes for the
//! remote store, the realtime feed, and local persistence, plus session
//! builders.

pub mod feed;
pub mod local;
pub mod remote;

pub use feed::MockFeed;
pub use local::MemoryStore;
pub use remote::{MockRemote, Op};

use chrono::{Duration, Utc};
use vendra_core::types::{Role, Session, SessionUser};

/// A session expiring an hour from now for the given role.
pub fn session(role: Role) -> Session {
    Session {
        access_token: "test-token".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        user: SessionUser {
            id: "00000000-0000-0000-0000-0000000000aa".to_string(),
            email: match role {
                Role::Admin => "admin@example.com".to_string(),
                Role::Customer => "customer@example.com".to_string(),
            },
            role,
        },
    }
}

pub fn admin_session() -> Session {
    session(Role::Admin)
}

pub fn customer_session() -> Session {
    session(Role::Customer)
}
