// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic three-phase optimistic update: stage a local change, run the
//! remote write, commit or revert.
//!
//! The staged change is visible to readers while the remote write is in
//! flight. On remote failure the displaced value is restored, so a failed
//! operation leaves the state exactly as it found it.

use tokio::sync::RwLock;

use vendra_core::VendraError;

/// Stage a local change, run `remote`, and revert the change on failure.
///
/// `stage` applies the change and returns the value it displaced, or `None`
/// when the target row is absent locally; the remote write still runs in that
/// case, there is just nothing to revert.
pub async fn commit_or_revert<S, T, Fut>(
    state: &RwLock<S>,
    stage: impl FnOnce(&mut S) -> Option<T>,
    revert: impl FnOnce(&mut S, T),
    remote: Fut,
) -> Result<(), VendraError>
where
    Fut: Future<Output = Result<(), VendraError>>,
{
    let displaced = {
        let mut guard = state.write().await;
        stage(&mut guard)
    };

    match remote.await {
        Ok(()) => Ok(()),
        Err(err) => {
            if let Some(prior) = displaced {
                let mut guard = state.write().await;
                revert(&mut guard, prior);
            }
            Err(err)
        }
    }
}
