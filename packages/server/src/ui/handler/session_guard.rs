//! Per-connection cleanup guard.

use std::sync::Arc;

use crate::{
    domain::{DisconnectOutcome, SessionId},
    usecase::DisconnectSessionUseCase,
};

/// Owns the disconnect of one session.
///
/// The connection task calls [`SessionGuard::release`] once its loops end.
/// If the task is dropped first (e.g. the runtime is shutting down), the
/// disconnect is spawned from `Drop` instead.
pub struct SessionGuard {
    session_id: SessionId,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    released: bool,
}

impl SessionGuard {
    pub fn new(
        session_id: SessionId,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    ) -> Self {
        Self {
            session_id,
            disconnect_session_usecase,
            released: false,
        }
    }

    /// Run the disconnect and disarm the guard.
    pub async fn release(mut self) -> DisconnectOutcome {
        let outcome = self
            .disconnect_session_usecase
            .execute(&self.session_id)
            .await;
        self.released = true;
        outcome
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let session_id = self.session_id.clone();
        let usecase = self.disconnect_session_usecase.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!("Session '{}' dropped without release", session_id);
                handle.spawn(async move {
                    usecase.execute(&session_id).await;
                });
            }
            Err(_) => {
                tracing::warn!("No runtime available to clean up session '{}'", session_id);
            }
        }
    }
}
