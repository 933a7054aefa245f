//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! `SignalingRegistry` をひとつの `Mutex` で保護し、全ての操作をその排他区間内で行います。
//! 排他区間ではマップの更新のみを行い、ネットワーク I/O は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisconnectOutcome, Identity, JoinOutcome, RepositoryError, Room, RoomName, Session, SessionId,
    SessionRepository, SignalingRegistry, Timestamp,
};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    registry: Arc<Mutex<SignalingRegistry>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new(registry: Arc<Mutex<SignalingRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(SignalingRegistry::new())))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register_session(&self, session: Session) -> Result<(), RepositoryError> {
        let mut registry = self.registry.lock().await;
        registry.register_session(session)
    }

    async fn remove_session(&self, session_id: &SessionId) -> DisconnectOutcome {
        let mut registry = self.registry.lock().await;
        registry.remove_session(session_id)
    }

    async fn contains_session(&self, session_id: &SessionId) -> bool {
        let registry = self.registry.lock().await;
        registry.contains_session(session_id)
    }

    async fn count_sessions(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.session_count()
    }

    async fn join_room(
        &self,
        session_id: &SessionId,
        identity: Identity,
        room_name: RoomName,
        joined_at: Timestamp,
    ) -> Result<JoinOutcome, RepositoryError> {
        let mut registry = self.registry.lock().await;
        registry.join(session_id, identity, room_name, joined_at)
    }

    async fn identity_of(&self, session_id: &SessionId) -> Option<Identity> {
        let registry = self.registry.lock().await;
        registry.identity_of(session_id).cloned()
    }

    async fn session_of(&self, identity: &Identity) -> Option<SessionId> {
        let registry = self.registry.lock().await;
        registry.session_of(identity).cloned()
    }

    async fn get_room(&self, room_name: &RoomName) -> Result<Room, RepositoryError> {
        let registry = self.registry.lock().await;
        registry
            .room(room_name)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_name.as_str().to_string()))
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let registry = self.registry.lock().await;
        let mut rooms: Vec<Room> = registry.rooms().cloned().collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }
}
